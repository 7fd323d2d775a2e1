//! Storage Abstraction
//!
//! Provides a platform-agnostic trait for the file I/O the cache core
//! performs: directory roots, existence checks, moves, deletion and
//! enumeration.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File metadata information
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub size: u64,
    pub modified_at: Option<i64>,
    pub is_directory: bool,
}

/// File system access trait
///
/// Abstracts file operations to support different platforms:
/// - Desktop: Direct filesystem access
/// - iOS/Android: Sandboxed app directories
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::FileSystemAccess;
///
/// async fn cached_path(fs: &dyn FileSystemAccess, name: &str) -> Result<Option<PathBuf>> {
///     let root = fs.cache_directory().await?;
///     let candidate = root.join(name);
///     Ok(fs.exists(&candidate).await?.then_some(candidate))
/// }
/// ```
#[async_trait]
pub trait FileSystemAccess: Send + Sync {
    /// Get the application-managed cache directory root
    ///
    /// Cached media artifacts live under this directory. The system may
    /// reclaim it when storage is low.
    async fn cache_directory(&self) -> Result<PathBuf>;

    /// Get the download engine's asset staging directory
    ///
    /// Partially-transferred and engine-managed artifacts live here; it is
    /// the target of the system-managed purge scope.
    async fn engine_asset_directory(&self) -> Result<PathBuf>;

    /// Check if a file or directory exists
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Get metadata for a file or directory
    async fn metadata(&self, path: &Path) -> Result<FileMetadata>;

    /// Create a directory and all parent directories if they don't exist
    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Move a file to a new location, replacing nothing that already exists
    async fn move_file(&self, from: &Path, to: &Path) -> Result<()>;

    /// Read entire file contents into memory
    async fn read_file(&self, path: &Path) -> Result<Bytes>;

    /// Write data to a file, creating it if it doesn't exist
    async fn write_file(&self, path: &Path, data: Bytes) -> Result<()>;

    /// Delete a file
    async fn delete_file(&self, path: &Path) -> Result<()>;

    /// Delete a directory and all its contents
    async fn delete_dir_all(&self, path: &Path) -> Result<()>;

    /// List all entries in a directory
    async fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>>;
}
