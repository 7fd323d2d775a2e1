//! # Stream Asset Cache Core
//!
//! Download-and-cache management for streaming media assets.
//!
//! ## Overview
//!
//! Given a remote media URL, the [`DownloadCoordinator`] starts a background
//! download through an injected [`DownloadEngine`], tracks the in-flight
//! transfer under a caller-chosen session identifier, persists the completed
//! payload into a local cache directory through an injected
//! [`FileSystemAccess`], and notifies the caller via callback once the
//! cached artifact is ready. Cache inspection (human-readable size) and
//! full-directory purge round out the surface.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │     DownloadCoordinator                │
//! │  - request_download()                  │
//! │  - cancel_download()                   │
//! │  - lookup_cache()                      │
//! │  - purge_cache() / cache_directory_size│
//! └────────┬───────────────────────────────┘
//!          │
//!          ├──> DownloadSession (one per request)
//!          ├──> DownloadEngine  (byte transfer, delegate events)
//!          └──> FileSystemAccess (cache directory)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_cache::{CacheConfig, DownloadCoordinator};
//! use std::sync::Arc;
//!
//! # async fn example(fs: Arc<dyn bridge_traits::FileSystemAccess>,
//! #                  engine: Arc<dyn bridge_traits::DownloadEngine>) {
//! let coordinator = Arc::new(DownloadCoordinator::new(CacheConfig::default(), fs, engine));
//! coordinator.initialize().await.expect("cache init");
//!
//! coordinator
//!     .request_download("session-1", "https://example.com/a.m3u8", Box::new(|url, path| {
//!         println!("{} cached at {}", url, path.display());
//!     }))
//!     .await;
//! # }
//! ```
//!
//! [`DownloadEngine`]: bridge_traits::DownloadEngine
//! [`FileSystemAccess`]: bridge_traits::FileSystemAccess

pub mod config;
pub mod coordinator;
pub mod error;
pub mod format;
pub mod key;
pub mod session;

// Re-export commonly used types
pub use config::CacheConfig;
pub use coordinator::{CompletionCallback, DownloadCoordinator, PurgeScope};
pub use error::{CacheError, Result};
pub use session::DownloadSession;
