//! Error types and the error normalizer.
//!
//! # Design
//! Transports report failures as `TransportError`, which may or may not carry
//! an HTTP status. `normalize` turns that into the stable `ApiError` shape
//! callers branch on. `NotFound` is its own kind because the usual reaction
//! to a missing folder (offer to create it) differs from every other failure.
//!
//! Normalization is total: an unmapped status keeps its code with no message,
//! and a missing status becomes `TransportFailure`. The raw transport detail
//! always survives in `ApiError::detail`.

use std::fmt;

use thiserror::Error;

/// Human-readable messages for the statuses the disk API documents.
pub static STATUS_MESSAGES: &[(u16, &str)] = &[
    (400, "Invalid request data"),
    (401, "Not authorized: the token is missing, invalid or expired"),
    (403, "API access denied"),
    (404, "The requested resource could not be found"),
    (406, "The resource cannot be represented in the requested format"),
    (409, "The resource already exists or its parent folder is missing"),
    (413, "File is too large to upload"),
    (423, "The resource is locked or under maintenance"),
    (429, "Too many requests"),
    (500, "Internal server error"),
    (503, "Service temporarily unavailable"),
    (507, "Not enough free space on the disk"),
];

pub fn status_message(status: u16) -> Option<&'static str> {
    STATUS_MESSAGES
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, message)| *message)
}

/// Raw failure reported by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error (status {status:?}): {detail}")]
pub struct TransportError {
    /// HTTP status when the remote answered, `None` for connection-level failures.
    pub status: Option<u16>,
    pub detail: String,
}

impl TransportError {
    pub fn status(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            detail: detail.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: detail.into(),
        }
    }
}

/// Discriminant for `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The remote answered 404.
    NotFound,
    /// Any other status with a known message.
    Rejected,
    /// A status absent from `STATUS_MESSAGES`.
    Unknown,
    /// No status at all: connection, TLS or timeout failure.
    TransportFailure,
    /// A 2xx body that did not decode into the requested type.
    InvalidPayload,
}

/// Normalized failure handed to callers of `Api` and `Resources`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    /// `None` when the status has no entry in `STATUS_MESSAGES`.
    pub message: Option<&'static str>,
    pub code: Option<u16>,
    /// Raw detail from the transport or decoder.
    pub detail: String,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.message, self.code) {
            (Some(message), Some(code)) => write!(f, "{message} (HTTP {code})"),
            (Some(message), None) => f.write_str(message),
            (None, Some(code)) => write!(f, "request failed with HTTP {code}: {}", self.detail),
            (None, None) => write!(f, "request failed: {}", self.detail),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        normalize(&err)
    }
}

/// Map a raw transport failure onto `ApiError`. Never panics.
pub fn normalize(raw: &TransportError) -> ApiError {
    let (kind, message) = match raw.status {
        None => (ErrorKind::TransportFailure, None),
        Some(404) => (ErrorKind::NotFound, status_message(404)),
        Some(code) => match status_message(code) {
            Some(message) => (ErrorKind::Rejected, Some(message)),
            None => (ErrorKind::Unknown, None),
        },
    };

    ApiError {
        kind,
        message,
        code: raw.status,
        detail: raw.detail.clone(),
    }
}

/// Invalid `ClientConfig`, reported when a client is constructed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API base URL is empty")]
    EmptyBaseUrl,

    #[error("invalid API base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API base URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("API base URL {0:?} cannot take a path: drop its query or fragment")]
    NotABaseUrl(String),

    #[error("authorization scheme is empty")]
    EmptyAuthScheme,
}
