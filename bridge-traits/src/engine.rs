//! Download Engine Abstraction
//!
//! Contract for the subsystem that performs the actual byte transfer of a
//! media asset. The engine is handed a caller-chosen transfer identifier and
//! reports completion asynchronously through a delegate, tagged with that
//! identifier, so the consumer can correlate events back to the originating
//! request even though delivery happens on an arbitrary task.

use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;

use crate::error::{BridgeError, Result};

/// Receives transfer lifecycle events from a [`DownloadEngine`]
///
/// Implementations must tolerate being called from any task context and at
/// any time relative to the call that started the transfer, including after
/// the transfer was cancelled.
#[async_trait]
pub trait TransferDelegate: Send + Sync {
    /// The transfer finished and its payload is available at `temp_path`.
    ///
    /// Ownership of the temporary file passes to the delegate; the engine
    /// will not touch it again.
    async fn transfer_finished(&self, identifier: &str, temp_path: PathBuf);

    /// The transfer failed. No temporary file is handed over.
    async fn transfer_failed(&self, identifier: &str, error: BridgeError);
}

/// Handle to one in-flight transfer
pub trait TransferTask: Send + Sync {
    /// Request cancellation of the transfer. Idempotent; no delegate event
    /// is guaranteed to follow.
    fn cancel(&self);

    /// The identifier the transfer was started with
    fn identifier(&self) -> &str;
}

/// Background download engine trait
///
/// # Example
///
/// ```ignore
/// use bridge_traits::engine::DownloadEngine;
///
/// async fn start(engine: &dyn DownloadEngine, delegate: Arc<dyn TransferDelegate>) -> Result<()> {
///     let url = Url::parse("https://example.com/a.m3u8").unwrap();
///     let task = engine.start_transfer("session-1", url, delegate).await?;
///     task.cancel();
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait DownloadEngine: Send + Sync {
    /// Start a background transfer for `source_url`, identified by
    /// `identifier`, and begin delivering events to `delegate`.
    ///
    /// The transfer is already running when this returns; the returned
    /// handle only provides cancellation.
    async fn start_transfer(
        &self,
        identifier: &str,
        source_url: Url,
        delegate: std::sync::Arc<dyn TransferDelegate>,
    ) -> Result<Box<dyn TransferTask>>;
}
