//! # Cache Error Types

use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// None of these surface to callers of the coordinator's public API; they
/// exist so internal helpers propagate explicit results and every swallowed
/// failure reaches the log with its cause intact.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The source string could not be parsed as a URL.
    #[error("Invalid source URL: {0}")]
    InvalidSourceUrl(String),

    /// The cache root directory could not be established.
    #[error("Cache directory is not available")]
    CacheRootUnavailable,

    /// A storage or download-engine collaborator failed.
    #[error("Bridge error: {0}")]
    Bridge(#[from] bridge_traits::BridgeError),

    /// Internal error (should not occur in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
