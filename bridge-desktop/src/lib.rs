//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides production-ready implementations of the bridge
//! traits using desktop-appropriate libraries:
//! - `DownloadEngine` using `reqwest` streaming
//! - `FileSystemAccess` using `tokio::fs`
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ReqwestDownloadEngine, TokioFileSystem};
//! use bridge_traits::{DownloadEngine, FileSystemAccess};
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = ReqwestDownloadEngine::new();
//!     let fs = TokioFileSystem::new();
//!
//!     // Hand both to the cache coordinator
//! }
//! ```

mod engine;
mod filesystem;

pub use engine::ReqwestDownloadEngine;
pub use filesystem::{default_cache_dir, default_engine_asset_dir, TokioFileSystem};
