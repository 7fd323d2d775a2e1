//! # Download Coordinator
//!
//! Main orchestrator for downloading and caching streaming media assets.
//!
//! The coordinator owns the registry of in-flight downloads and their
//! pending completion callbacks, deduplicates requests, routes asynchronous
//! engine completion events back to the originating request, and mediates
//! all cache reads and writes through the injected collaborators.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bridge_traits::engine::{DownloadEngine, TransferDelegate};
use bridge_traits::error::BridgeError;
use bridge_traits::storage::FileSystemAccess;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::format::format_bytes;
use crate::key::{derive_cache_key, parse_source_url};
use crate::session::DownloadSession;

/// Completion callback invoked with `(original_url, cached_path)` once the
/// downloaded asset has been moved into the cache. Invoked at most once.
pub type CompletionCallback = Box<dyn FnOnce(String, PathBuf) + Send + 'static>;

/// Which storage root a purge targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurgeScope {
    /// The download engine's own asset staging store.
    SystemManaged,
    /// The application-managed cache directory.
    AppManaged,
}

/// In-flight download state, keyed by session identifier.
///
/// Both maps live behind one lock so request deduplication is a single
/// atomic check-then-insert and completion routing observes a consistent
/// view.
#[derive(Default)]
struct Registry {
    active: HashMap<String, DownloadSession>,
    pending: HashMap<String, CompletionCallback>,
}

/// Download coordinator for caching streaming media assets.
///
/// Per session identifier the lifecycle is `absent → active → absent`: a
/// request makes the identifier active, and completion (success or
/// failure) or cancellation returns it to absent. Failures never surface
/// to the caller; a request whose pipeline breaks simply never delivers
/// its callback, with the cause logged.
pub struct DownloadCoordinator {
    config: CacheConfig,
    fs: Arc<dyn FileSystemAccess>,
    engine: Arc<dyn DownloadEngine>,
    registry: Mutex<Registry>,
    cache_root: Mutex<Option<PathBuf>>,
}

impl DownloadCoordinator {
    /// Create a new coordinator.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache configuration
    /// * `fs` - Filesystem access for the cache directory
    /// * `engine` - Download engine performing the byte transfers
    pub fn new(
        config: CacheConfig,
        fs: Arc<dyn FileSystemAccess>,
        engine: Arc<dyn DownloadEngine>,
    ) -> Self {
        Self {
            config,
            fs,
            engine,
            registry: Mutex::new(Registry::default()),
            cache_root: Mutex::new(None),
        }
    }

    /// Initialize the coordinator: resolve and create the cache directory.
    ///
    /// If this fails (or is never called), cache lookups and download
    /// requests degrade to silent no-ops until it succeeds.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<()> {
        self.config
            .validate()
            .map_err(CacheError::Internal)?;

        let base = self.fs.cache_directory().await.map_err(|e| {
            error!(error = %e, "Failed to resolve cache directory");
            e
        })?;

        let root = base.join(&self.config.cache_directory);

        self.fs.create_dir_all(&root).await.map_err(|e| {
            error!(error = %e, path = ?root, "Failed to create cache directory");
            e
        })?;

        *self.cache_root.lock().await = Some(root.clone());

        info!(path = ?root, "Download coordinator initialized");
        Ok(())
    }

    /// Request a background download of `source_url`, keyed by `session_id`.
    ///
    /// The request is dropped silently when caching is disabled, when a
    /// download for `session_id` is already in flight, or when the asset is
    /// already cached (use [`lookup_cache`](Self::lookup_cache) to retrieve
    /// it; the callback does NOT fire for an already-cached asset).
    /// Results arrive only through `callback`, invoked after the asset has
    /// been persisted; if any step fails the callback never fires.
    pub async fn request_download(
        self: &Arc<Self>,
        session_id: &str,
        source_url: &str,
        callback: CompletionCallback,
    ) {
        if !self.config.enabled {
            debug!(session_id, "Caching disabled; download request dropped");
            return;
        }

        if let Err(e) = self.try_request(session_id, source_url, callback).await {
            warn!(session_id, error = %e, "Download request dropped");
        }
    }

    async fn try_request(
        self: &Arc<Self>,
        session_id: &str,
        source_url: &str,
        callback: CompletionCallback,
    ) -> Result<()> {
        // The lock is held across the cache probe and session start so a
        // concurrent duplicate request observes the in-flight entry.
        let mut registry = self.registry.lock().await;

        if registry.active.contains_key(session_id) {
            debug!(session_id, "Download already in flight; request dropped");
            return Ok(());
        }

        if let Some(path) = self.lookup_cache_inner(source_url).await? {
            debug!(session_id, path = ?path, "Asset already cached; request dropped");
            return Ok(());
        }

        let delegate = Arc::clone(self) as Arc<dyn TransferDelegate>;
        let session =
            DownloadSession::start(session_id, source_url, self.engine.as_ref(), delegate).await?;

        registry.active.insert(session_id.to_string(), session);
        registry.pending.insert(session_id.to_string(), callback);

        info!(session_id, "Download started");
        Ok(())
    }

    /// Cancel the in-flight download for `session_id`, if any.
    ///
    /// The pending callback is discarded and will never fire, even if the
    /// engine later reports a completion for this identifier. Idempotent.
    #[instrument(skip(self))]
    pub async fn cancel_download(&self, session_id: &str) {
        let mut registry = self.registry.lock().await;

        if let Some(mut session) = registry.active.remove(session_id) {
            session.cancel();
            registry.pending.remove(session_id);
            info!(session_id, "Download cancelled");
        }
    }

    /// Look up the cached artifact for `source_url`.
    ///
    /// Pure read; returns `None` when the asset is not cached or the cache
    /// is unavailable.
    pub async fn lookup_cache(&self, source_url: &str) -> Option<PathBuf> {
        match self.lookup_cache_inner(source_url).await {
            Ok(found) => found,
            Err(e) => {
                debug!(error = %e, "Cache lookup failed");
                None
            }
        }
    }

    async fn lookup_cache_inner(&self, source_url: &str) -> Result<Option<PathBuf>> {
        let root = self
            .cache_root()
            .await
            .ok_or(CacheError::CacheRootUnavailable)?;

        let url = parse_source_url(source_url)?;
        let path = root.join(derive_cache_key(&url));

        Ok(self.fs.exists(&path).await?.then_some(path))
    }

    /// Completion entry point, invoked by the download engine from its own
    /// task context once a transfer's payload is available at `temp_path`.
    ///
    /// Moves the payload into the cache under the key derived from the
    /// session's source URL, clears the session's registry entries, and
    /// delivers the pending callback exactly once. A completion for an
    /// unknown (cancelled) identifier is discarded.
    pub async fn on_download_completed(&self, session_id: &str, temp_path: &Path) {
        // Take both entries before any I/O; the callback must not run (and
        // cannot deadlock) under the registry lock.
        let (session, callback) = {
            let mut registry = self.registry.lock().await;
            let session = registry.active.remove(session_id);
            let callback = registry.pending.remove(session_id);
            (session, callback)
        };

        let Some(session) = session else {
            warn!(
                session_id,
                "Completion for unknown or cancelled session; discarding payload"
            );
            let _ = self.fs.delete_file(temp_path).await;
            return;
        };

        match self.persist_download(&session, temp_path).await {
            Ok(cached_path) => {
                info!(session_id, path = ?cached_path, "Download cached");
                if let Some(callback) = callback {
                    callback(session.source_url().to_string(), cached_path);
                }
            }
            Err(e) => {
                // Observable behavior on a failed move is that the caller's
                // callback simply never fires.
                error!(session_id, error = %e, "Failed to move download into cache");
            }
        }
    }

    /// Failure entry point, invoked by the download engine when a transfer
    /// cannot complete. Clears the registry entries; the callback never
    /// fires.
    pub async fn on_download_failed(&self, session_id: &str, cause: BridgeError) {
        let removed = {
            let mut registry = self.registry.lock().await;
            registry.pending.remove(session_id);
            registry.active.remove(session_id)
        };

        if removed.is_some() {
            warn!(session_id, error = %cause, "Download failed; no completion will be delivered");
        } else {
            debug!(session_id, error = %cause, "Failure for unknown session ignored");
        }
    }

    async fn persist_download(
        &self,
        session: &DownloadSession,
        temp_path: &Path,
    ) -> Result<PathBuf> {
        let root = self
            .cache_root()
            .await
            .ok_or(CacheError::CacheRootUnavailable)?;

        // Destination and lookup keys derive from the same canonical input:
        // the session's original source URL.
        let dest = root.join(derive_cache_key(session.source_url()));
        self.fs.move_file(temp_path, &dest).await?;

        // Re-resolve through the lookup path so the callback only ever
        // reports an entry that is actually present.
        self.lookup_cache_inner(session.source_url().as_str())
            .await?
            .ok_or_else(|| CacheError::Internal("cache entry missing after move".to_string()))
    }

    /// Delete every entry under the selected storage root.
    ///
    /// Runs on a background task, fire-and-forget; errors are logged, never
    /// surfaced. In-flight downloads are not touched: a download completing
    /// mid-purge will simply repopulate the directory.
    pub async fn purge_cache(&self, scope: PurgeScope) {
        let fs = Arc::clone(&self.fs);
        let app_root = self.cache_root().await;

        tokio::spawn(async move {
            info!(scope = ?scope, "Purging cache");
            if let Err(e) = Self::purge(fs, scope, app_root).await {
                error!(scope = ?scope, error = %e, "Cache purge failed");
            }
        });
    }

    async fn purge(
        fs: Arc<dyn FileSystemAccess>,
        scope: PurgeScope,
        app_root: Option<PathBuf>,
    ) -> Result<()> {
        let root = match scope {
            PurgeScope::AppManaged => app_root.ok_or(CacheError::CacheRootUnavailable)?,
            PurgeScope::SystemManaged => fs.engine_asset_directory().await?,
        };

        for entry in fs.list_directory(&root).await? {
            let is_directory = match fs.metadata(&entry).await {
                Ok(metadata) => metadata.is_directory,
                Err(e) => {
                    warn!(path = ?entry, error = %e, "Skipping unreadable cache entry");
                    continue;
                }
            };

            let result = if is_directory {
                fs.delete_dir_all(&entry).await
            } else {
                fs.delete_file(&entry).await
            };

            if let Err(e) = result {
                warn!(path = ?entry, error = %e, "Failed to delete cache entry");
            }
        }

        Ok(())
    }

    /// Human-readable total size of the cache directory (non-recursive).
    ///
    /// Returns `None` when the cache root cannot be established or
    /// enumerated.
    pub async fn cache_directory_size(&self) -> Option<String> {
        match self.cache_directory_size_inner().await {
            Ok(formatted) => Some(formatted),
            Err(e) => {
                error!(error = %e, "Failed to compute cache directory size");
                None
            }
        }
    }

    async fn cache_directory_size_inner(&self) -> Result<String> {
        let root = self
            .cache_root()
            .await
            .ok_or(CacheError::CacheRootUnavailable)?;

        let mut total = 0u64;
        for entry in self.fs.list_directory(&root).await? {
            // Entries whose metadata cannot be read are skipped, not fatal.
            match self.fs.metadata(&entry).await {
                Ok(metadata) if !metadata.is_directory => total += metadata.size,
                Ok(_) => {}
                Err(_) => continue,
            }
        }

        Ok(format_bytes(total))
    }

    async fn cache_root(&self) -> Option<PathBuf> {
        self.cache_root.lock().await.clone()
    }
}

#[async_trait]
impl TransferDelegate for DownloadCoordinator {
    async fn transfer_finished(&self, identifier: &str, temp_path: PathBuf) {
        self.on_download_completed(identifier, &temp_path).await;
    }

    async fn transfer_failed(&self, identifier: &str, error: BridgeError) {
        self.on_download_failed(identifier, error).await;
    }
}
