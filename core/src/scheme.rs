//! Static table of remote operations.
//!
//! # Design
//! Each remote operation is a `(method, path)` pair registered under a
//! namespace. Adding an operation means adding a row here; the dispatch path
//! in `client` stays unchanged. The table is a `static`, so it is built at
//! compile time and shared read-only by every request.

use crate::http::HttpMethod;

/// A named remote operation: HTTP method plus path relative to the
/// versioned API root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceDescriptor {
    pub method: HttpMethod,
    pub path: &'static str,
}

impl ServiceDescriptor {
    pub const fn new(method: HttpMethod, path: &'static str) -> Self {
        Self { method, path }
    }
}

pub mod disk {
    use super::ServiceDescriptor;
    use crate::http::HttpMethod;

    pub const GET_DISK_INFO: ServiceDescriptor = ServiceDescriptor::new(HttpMethod::Get, "/disk");
}

pub mod resources {
    use super::ServiceDescriptor;
    use crate::http::HttpMethod;

    pub const GET_METADATA: ServiceDescriptor =
        ServiceDescriptor::new(HttpMethod::Get, "/disk/resources");

    pub const CREATE_DIRECTORY: ServiceDescriptor =
        ServiceDescriptor::new(HttpMethod::Put, "/disk/resources");
}

type Operations = &'static [(&'static str, ServiceDescriptor)];

/// `namespace -> operation -> descriptor`.
pub static REST_SCHEME: &[(&str, Operations)] = &[
    ("disk", &[("get_disk_info", disk::GET_DISK_INFO)]),
    (
        "resources",
        &[
            ("get_metadata", resources::GET_METADATA),
            ("create_directory", resources::CREATE_DIRECTORY),
        ],
    ),
];

/// Find a descriptor by namespace and operation name.
///
/// Typed callers should use the constants in [`disk`] and [`resources`]
/// directly; `None` here means the caller named an operation that was never
/// registered.
pub fn lookup(namespace: &str, operation: &str) -> Option<&'static ServiceDescriptor> {
    REST_SCHEME
        .iter()
        .find(|(name, _)| *name == namespace)
        .and_then(|(_, operations)| operations.iter().find(|(name, _)| *name == operation))
        .map(|(_, descriptor)| descriptor)
}
