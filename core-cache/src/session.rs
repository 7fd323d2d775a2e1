//! Download session
//!
//! One `DownloadSession` owns exactly one engine transfer for one
//! `(session identifier, source URL)` pair, from start until cancellation
//! or completion.

use std::sync::Arc;

use bridge_traits::engine::{DownloadEngine, TransferDelegate, TransferTask};
use tracing::debug;
use url::Url;

use crate::error::Result;
use crate::key::parse_source_url;

/// A single in-flight download.
///
/// Construction resolves the source URL, hands the session identifier to the
/// engine as its background-transfer identifier (so completion events can be
/// correlated back by identifier) and starts the transfer immediately.
pub struct DownloadSession {
    identifier: String,
    source_url: Url,
    task: Option<Box<dyn TransferTask>>,
}

impl DownloadSession {
    pub(crate) async fn start(
        identifier: &str,
        source_url: &str,
        engine: &dyn DownloadEngine,
        delegate: Arc<dyn TransferDelegate>,
    ) -> Result<Self> {
        let source_url = parse_source_url(source_url)?;
        let task = engine
            .start_transfer(identifier, source_url.clone(), delegate)
            .await?;

        debug!(identifier = %identifier, url = %source_url, "Download session started");

        Ok(Self {
            identifier: identifier.to_string(),
            source_url,
            task: Some(task),
        })
    }

    /// Cancel the underlying transfer and release the task handle.
    /// Idempotent.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
            debug!(identifier = %self.identifier, "Download session cancelled");
        }
    }

    /// The session identifier the engine was configured with.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The parsed source URL this session is downloading.
    pub fn source_url(&self) -> &Url {
        &self.source_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::BridgeError;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoopDelegate;

    #[async_trait]
    impl TransferDelegate for NoopDelegate {
        async fn transfer_finished(&self, _identifier: &str, _temp_path: PathBuf) {}
        async fn transfer_failed(&self, _identifier: &str, _error: BridgeError) {}
    }

    struct CountingTask {
        cancels: Arc<AtomicUsize>,
        identifier: String,
    }

    impl TransferTask for CountingTask {
        fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }

        fn identifier(&self) -> &str {
            &self.identifier
        }
    }

    struct StubEngine {
        cancels: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DownloadEngine for StubEngine {
        async fn start_transfer(
            &self,
            identifier: &str,
            _source_url: Url,
            _delegate: Arc<dyn TransferDelegate>,
        ) -> bridge_traits::error::Result<Box<dyn TransferTask>> {
            Ok(Box::new(CountingTask {
                cancels: self.cancels.clone(),
                identifier: identifier.to_string(),
            }))
        }
    }

    #[tokio::test]
    async fn test_start_rejects_malformed_url() {
        let engine = StubEngine {
            cancels: Arc::new(AtomicUsize::new(0)),
        };
        let result =
            DownloadSession::start("s1", "definitely not a url", &engine, Arc::new(NoopDelegate))
                .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let cancels = Arc::new(AtomicUsize::new(0));
        let engine = StubEngine {
            cancels: cancels.clone(),
        };
        let mut session = DownloadSession::start(
            "s1",
            "https://example.com/a.m3u8",
            &engine,
            Arc::new(NoopDelegate),
        )
        .await
        .unwrap();

        session.cancel();
        session.cancel();
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
        assert_eq!(session.identifier(), "s1");
    }
}
