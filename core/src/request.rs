//! Request builder: turns a registry entry into an `HttpRequest`.
//!
//! Pure functions only. The base URL has already been validated by
//! `ClientConfig::base_url`, so nothing here can fail.

use crate::http::HttpRequest;
use crate::scheme::ServiceDescriptor;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// The caller's intent for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub service: &'static ServiceDescriptor,
    /// Appended after `?` verbatim. Encoding is the caller's job.
    pub query: Option<String>,
}

impl RequestSpec {
    pub fn new(service: &'static ServiceDescriptor) -> Self {
        Self { service, query: None }
    }

    pub fn with_query(service: &'static ServiceDescriptor, query: impl Into<String>) -> Self {
        Self {
            service,
            query: Some(query.into()),
        }
    }
}

/// Join two URL pieces with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{base}/{path}")
}

/// Assemble the request for `spec` against `base_url`.
///
/// `authorization` is the complete header value, scheme included.
pub fn build_request(base_url: &str, spec: &RequestSpec, authorization: &str) -> HttpRequest {
    let url = join_url(base_url, spec.service.path);
    let url = match spec.query.as_deref() {
        Some(query) => format!("{url}?{query}"),
        None => url,
    };

    HttpRequest {
        method: spec.service.method,
        url,
        headers: vec![
            ("content-type".to_string(), CONTENT_TYPE_JSON.to_string()),
            ("authorization".to_string(), authorization.to_string()),
        ],
        body: None,
    }
}
