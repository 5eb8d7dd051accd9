//! Dispatch path and the resource client.
//!
//! # Design
//! `Api` owns the validated base URL, the `Authorization` value and a shared
//! transport. `Api::request` is the single dispatch path: build the request
//! from a registry entry, execute it, normalize any failure. `Resources`
//! exposes one method per remote operation and only picks the registry entry
//! and query for each.
//!
//! Nothing here is mutated after construction, so an `Api` can be shared
//! across concurrent calls without locking.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{normalize, ApiError, ConfigError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::request::{build_request, RequestSpec};
use crate::scheme::{disk, resources};
use crate::transport::Transport;

/// Transport-wrapping handle bound to one endpoint and credential.
#[derive(Clone)]
pub struct Api {
    base_url: String,
    authorization: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Api {
    /// Validate `config` and bind it to `transport`.
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        let base_url = config.base_url()?;
        let authorization = config.authorization()?;
        if config.auth_token.is_empty() {
            warn!(base_url = %base_url, "no auth token configured; requests will be rejected");
        }
        Ok(Self {
            base_url,
            authorization,
            transport,
        })
    }

    #[cfg(feature = "reqwest-transport")]
    pub fn with_reqwest(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::new(config, Arc::new(crate::transport::ReqwestTransport::new()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build(&self, spec: &RequestSpec) -> HttpRequest {
        build_request(&self.base_url, spec, &self.authorization)
    }

    /// Build, execute and normalize one call.
    pub async fn request(&self, spec: RequestSpec) -> Result<HttpResponse, ApiError> {
        let request = self.build(&spec);
        debug!(method = %request.method, url = %request.url, "dispatching request");

        let outcome = match self.transport.execute(&request).await {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => Err(TransportError::status(response.status, response.body)),
            Err(err) => Err(err),
        };

        outcome.map_err(|raw| {
            let err = normalize(&raw);
            warn!(
                method = %request.method,
                url = %request.url,
                kind = ?err.kind,
                code = ?err.code,
                "request failed"
            );
            err
        })
    }
}

/// Result of checking that a storage folder exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderStatus {
    Present(HttpResponse),
    Missing,
}

/// One method per remote resource operation.
///
/// File upload (upload URL and transfer) is not part of this client.
#[derive(Debug, Clone)]
pub struct Resources {
    api: Arc<Api>,
}

impl Resources {
    pub fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Disk-level metadata (sizes, quotas). Decode with `DiskInfo` if needed.
    pub async fn get_metadata(&self) -> Result<HttpResponse, ApiError> {
        self.api.request(RequestSpec::new(&disk::GET_DISK_INFO)).await
    }

    /// Metadata for `path`. Fails with `ErrorKind::NotFound` if it does not exist.
    pub async fn get_resource_info(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.api
            .request(RequestSpec::with_query(&resources::GET_METADATA, path_query(path)))
            .await
    }

    /// Create a folder at `path`.
    ///
    /// Whether an existing folder is an error is up to the remote; the disk
    /// API answers 409.
    pub async fn create_directory(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.api
            .request(RequestSpec::with_query(&resources::CREATE_DIRECTORY, path_query(path)))
            .await
    }

    /// Check `path`, reporting a missing folder as `FolderStatus::Missing`
    /// instead of an error. Every other failure propagates.
    pub async fn verify_folder(&self, path: &str) -> Result<FolderStatus, ApiError> {
        match self.get_resource_info(path).await {
            Ok(response) => Ok(FolderStatus::Present(response)),
            Err(err) if err.is_not_found() => {
                debug!(path, "storage folder is missing");
                Ok(FolderStatus::Missing)
            }
            Err(err) => Err(err),
        }
    }
}

fn path_query(path: &str) -> String {
    format!("path={path}")
}
