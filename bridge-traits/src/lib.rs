//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host
//! platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the cache core and
//! platform-specific implementations. Each trait represents a capability the
//! core requires but that is provided differently per platform (desktop,
//! iOS, Android).
//!
//! ## Traits
//!
//! - [`FileSystemAccess`](storage::FileSystemAccess) - cache/staging
//!   directory roots, moves, deletion, enumeration
//! - [`DownloadEngine`](engine::DownloadEngine) - background byte transfer
//!   with delegate-based completion delivery
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Platform
//! implementations should convert their native errors to `BridgeError` and
//! include enough context (paths, identifiers) to act on.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks.

pub mod engine;
pub mod error;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use engine::{DownloadEngine, TransferDelegate, TransferTask};
pub use storage::{FileMetadata, FileSystemAccess};
