//! Client configuration.
//!
//! `ClientConfig` is an immutable value owned by the host. To change the
//! credential or endpoint, build a new config and a new `Api` from it.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::request::join_url;

pub const DEFAULT_API_URL: &str = "https://cloud-api.yandex.net";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_AUTH_SCHEME: &str = "OAuth";

/// Credential and endpoint for the disk API.
///
/// Deserializes with defaults for every missing field, so a stored settings
/// document only needs the keys the user changed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub auth_token: String,
    pub api_base_url: String,
    pub api_version: String,
    pub auth_scheme: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_token: String::new(),
            api_base_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(self, api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..self
        }
    }

    pub fn with_api_version(self, api_version: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            ..self
        }
    }

    pub fn with_auth_scheme(self, auth_scheme: impl Into<String>) -> Self {
        Self {
            auth_scheme: auth_scheme.into(),
            ..self
        }
    }

    /// Validate the endpoint and return `<api_base_url>/<api_version>`.
    pub fn base_url(&self) -> Result<String, ConfigError> {
        let raw = self.api_base_url.trim();
        if raw.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        let parsed = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        if parsed.cannot_be_a_base() || parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::NotABaseUrl(raw.to_string()));
        }
        Ok(join_url(raw, self.api_version.trim().trim_matches('/')))
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> Result<String, ConfigError> {
        let scheme = self.auth_scheme.trim();
        if scheme.is_empty() {
            return Err(ConfigError::EmptyAuthScheme);
        }
        Ok(format!("{scheme} {}", self.auth_token))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.auth_token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ClientConfig")
            .field("auth_token", &token)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("auth_scheme", &self.auth_scheme)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_public_api() {
        let config = ClientConfig::new("token");
        assert_eq!(config.base_url().unwrap(), "https://cloud-api.yandex.net/v1");
        assert_eq!(config.authorization().unwrap(), "OAuth token");
    }

    #[test]
    fn base_url_joins_version_once() {
        let config = ClientConfig::new("t")
            .with_base_url("http://127.0.0.1:8080/")
            .with_api_version("/v2/");
        assert_eq!(config.base_url().unwrap(), "http://127.0.0.1:8080/v2");
    }

    #[test]
    fn version_slashes_are_dropped() {
        let config = ClientConfig::new("t").with_api_version("v1/");
        assert_eq!(config.base_url().unwrap(), "https://cloud-api.yandex.net/v1");

        let config = ClientConfig::new("t")
            .with_base_url("http://localhost:3000/")
            .with_api_version("/");
        assert_eq!(config.base_url().unwrap(), "http://localhost:3000");
    }

    #[test]
    fn base_url_with_query_or_fragment_is_rejected() {
        for url in ["https://h.example?x=1", "https://h.example/api#top"] {
            let config = ClientConfig::new("t").with_base_url(url);
            match config.base_url() {
                Err(ConfigError::NotABaseUrl(rejected)) => assert_eq!(rejected, url),
                other => panic!("{url}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn empty_version_uses_bare_base() {
        let config = ClientConfig::new("t")
            .with_base_url("http://localhost:3000/api")
            .with_api_version("");
        assert_eq!(config.base_url().unwrap(), "http://localhost:3000/api");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let config = ClientConfig::new("t").with_base_url("  ");
        assert!(matches!(config.base_url(), Err(ConfigError::EmptyBaseUrl)));
    }

    #[test]
    fn unparsable_base_url_is_rejected() {
        let config = ClientConfig::new("t").with_base_url("not a url");
        assert!(matches!(config.base_url(), Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let config = ClientConfig::new("t").with_base_url("ftp://example.com");
        match config.base_url() {
            Err(ConfigError::UnsupportedScheme(scheme)) => assert_eq!(scheme, "ftp"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn custom_auth_scheme() {
        let config = ClientConfig::new("abc").with_auth_scheme("Bearer");
        assert_eq!(config.authorization().unwrap(), "Bearer abc");

        let config = ClientConfig::new("abc").with_auth_scheme("");
        assert!(matches!(config.authorization(), Err(ConfigError::EmptyAuthScheme)));
    }

    #[test]
    fn partial_settings_merge_over_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"auth_token":"stored"}"#).unwrap();
        assert_eq!(config.auth_token, "stored");
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.auth_scheme, DEFAULT_AUTH_SCHEME);
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
