//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for d3-docs-mcp plumbing.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when upstream content cannot be retrieved.
///
/// None of these are retried; the caller decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The upstream answered 404 for the requested resource.
    #[error("{what} not found: {url}")]
    NotFound { what: &'static str, url: String },
    /// The request exceeded the configured timeout.
    #[error("Timeout fetching {url}")]
    Timeout { url: String },
    /// Connection, TLS, or body-read failure.
    #[error("Network error fetching {url}: {message}")]
    Transport { url: String, message: String },
    /// Any non-success, non-404 status.
    #[error("Failed to fetch {url} (HTTP {status})")]
    Upstream { url: String, status: u16 },
    /// The requested path has no cache entry under the cache root.
    #[error("Invalid path '{path}'")]
    InvalidPath { path: String },
    /// The gallery page was fetched but yielded no examples.
    #[error("No examples found in gallery page: {url}")]
    EmptyGallery { url: String },
}

impl FetchError {
    /// Replace the generic "Resource" label of a 404 with a more specific one.
    pub(crate) fn describe(self, label: &'static str) -> Self {
        match self {
            Self::NotFound { url, .. } => Self::NotFound { what: label, url },
            other => other,
        }
    }
}
