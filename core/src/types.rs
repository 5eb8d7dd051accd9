//! Typed views over the disk API's JSON payloads.
//!
//! The client returns raw `HttpResponse` values; decode them with
//! `HttpResponse::json` into these when the caller needs fields. Unknown
//! fields are ignored so new remote fields do not break decoding.

use serde::{Deserialize, Serialize};

/// Disk-level metadata from `GET /disk`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiskInfo {
    pub total_space: u64,
    pub used_space: u64,
    #[serde(default)]
    pub trash_size: u64,
    #[serde(default)]
    pub is_paid: bool,
}

impl DiskInfo {
    pub fn free_space(&self) -> u64 {
        self.total_space.saturating_sub(self.used_space)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Dir,
    File,
}

/// Metadata for a file or folder from `GET /disk/resources`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl Resource {
    pub fn is_dir(&self) -> bool {
        self.resource_type == ResourceType::Dir
    }
}

/// Link returned by operations such as `PUT /disk/resources`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub method: String,
    #[serde(default)]
    pub templated: bool,
}

/// Error document the remote sends with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    pub description: String,
    pub error: String,
}
