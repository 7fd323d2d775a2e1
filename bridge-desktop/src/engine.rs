//! Download Engine Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    engine::{DownloadEngine, TransferDelegate, TransferTask},
    error::{BridgeError, Result},
};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::filesystem::default_engine_asset_dir;

/// Reqwest-based download engine implementation
///
/// Streams the response body to `<staging>/<identifier>.part` and reports
/// the outcome through the [`TransferDelegate`]. Cancellation aborts the
/// in-flight request and removes the partial file without any delegate
/// event, so a cancelled transfer stays silent.
pub struct ReqwestDownloadEngine {
    client: Client,
    staging_dir: PathBuf,
}

impl ReqwestDownloadEngine {
    /// Create a new engine with the default staging directory
    pub fn new() -> Self {
        Self::with_staging_dir(default_engine_asset_dir())
    }

    /// Create a new engine staging into `staging_dir`
    pub fn with_staging_dir(staging_dir: PathBuf) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent("stream-asset-cache/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            staging_dir,
        }
    }

    /// Create a new engine with a custom reqwest client
    pub fn with_client(client: Client, staging_dir: PathBuf) -> Self {
        Self {
            client,
            staging_dir,
        }
    }

    /// Identifiers are caller-chosen; keep them usable as file names.
    fn staging_file_name(identifier: &str) -> String {
        let safe: String = identifier
            .chars()
            .map(|c| if std::path::is_separator(c) { '_' } else { c })
            .collect();
        format!("{}.part", safe)
    }

    async fn run_transfer(client: Client, source_url: Url, temp_path: &Path) -> Result<()> {
        let response = client
            .get(source_url.clone())
            .send()
            .await
            .map_err(|e| BridgeError::TransferFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BridgeError::TransferFailed(format!(
                "HTTP {} for {}",
                response.status(),
                source_url
            )));
        }

        let mut file = tokio::fs::File::create(temp_path).await?;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| BridgeError::TransferFailed(e.to_string()))?;
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        Ok(())
    }
}

impl Default for ReqwestDownloadEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DownloadEngine for ReqwestDownloadEngine {
    async fn start_transfer(
        &self,
        identifier: &str,
        source_url: Url,
        delegate: Arc<dyn TransferDelegate>,
    ) -> Result<Box<dyn TransferTask>> {
        tokio::fs::create_dir_all(&self.staging_dir).await?;

        let temp_path = self.staging_dir.join(Self::staging_file_name(identifier));
        let token = CancellationToken::new();

        let client = self.client.clone();
        let task_token = token.clone();
        let id = identifier.to_string();
        let url = source_url.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = task_token.cancelled() => Err(BridgeError::TransferCancelled),
                r = Self::run_transfer(client, url, &temp_path) => r,
            };

            match result {
                Ok(()) => {
                    debug!(identifier = %id, path = ?temp_path, "Transfer finished");
                    delegate.transfer_finished(&id, temp_path).await;
                }
                Err(BridgeError::TransferCancelled) => {
                    debug!(identifier = %id, "Transfer cancelled");
                    let _ = tokio::fs::remove_file(&temp_path).await;
                }
                Err(e) => {
                    warn!(identifier = %id, error = %e, "Transfer failed");
                    let _ = tokio::fs::remove_file(&temp_path).await;
                    delegate.transfer_failed(&id, e).await;
                }
            }
        });

        debug!(identifier = %identifier, url = %source_url, "Started transfer");

        Ok(Box::new(ReqwestTransferTask {
            identifier: identifier.to_string(),
            token,
        }))
    }
}

struct ReqwestTransferTask {
    identifier: String,
    token: CancellationToken,
}

impl TransferTask for ReqwestTransferTask {
    fn cancel(&self) {
        self.token.cancel();
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_engine_creation() {
        let _engine = ReqwestDownloadEngine::new();
    }

    #[test]
    fn test_staging_file_name() {
        assert_eq!(
            ReqwestDownloadEngine::staging_file_name("session-1"),
            "session-1.part"
        );
        assert!(!ReqwestDownloadEngine::staging_file_name("a/b").contains('/'));
    }

    #[test]
    fn test_task_cancel_is_idempotent() {
        let task = ReqwestTransferTask {
            identifier: "s1".to_string(),
            token: CancellationToken::new(),
        };
        task.cancel();
        task.cancel();
        assert!(task.token.is_cancelled());
        assert_eq!(task.identifier(), "s1");
    }
}
