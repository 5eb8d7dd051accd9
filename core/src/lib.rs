//! Client core for a cloud disk REST API.
//!
//! # Overview
//! Remote operations are rows in a static registry (`scheme`). A single
//! dispatch path (`Api::request`) builds the request from a row, hands it to
//! a pluggable `Transport`, and normalizes failures into `ApiError`.
//! `Resources` is the user-facing API on top of that path.
//!
//! # Design
//! - Request building is pure; only the transport performs I/O.
//! - `ClientConfig` is immutable and validated when an `Api` is built.
//! - `ApiError::kind` separates a missing resource from other failures so
//!   callers can match instead of comparing status codes.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod scheme;
pub mod transport;
pub mod types;

pub use client::{Api, FolderStatus, Resources};
pub use config::ClientConfig;
pub use error::{normalize, ApiError, ConfigError, ErrorKind, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use request::{build_request, RequestSpec};
pub use scheme::{lookup, ServiceDescriptor};
pub use transport::Transport;
#[cfg(feature = "reqwest-transport")]
pub use transport::ReqwestTransport;
pub use types::{DiskInfo, ErrorBody, Link, Resource, ResourceType};
