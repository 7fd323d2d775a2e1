//! Offline caching demonstration
//!
//! Downloads a media asset into the local cache and reports the cached path
//! and resulting cache size.
//!
//! Run with:
//! ```bash
//! cargo run --example offline_demo -- https://example.com/media/sample.ts
//! ```

use bridge_desktop::{ReqwestDownloadEngine, TokioFileSystem};
use bridge_traits::{DownloadEngine, FileSystemAccess};
use core_cache::{CacheConfig, DownloadCoordinator};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use std::env;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let config = LoggingConfig::default().with_format(LogFormat::Compact);
    init_logging(config).expect("Failed to initialize logging");

    let source_url = env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com/media/sample.ts".to_string());

    let fs = Arc::new(TokioFileSystem::new()) as Arc<dyn FileSystemAccess>;
    let engine = Arc::new(ReqwestDownloadEngine::new()) as Arc<dyn DownloadEngine>;

    let coordinator = Arc::new(DownloadCoordinator::new(CacheConfig::default(), fs, engine));
    coordinator.initialize().await.expect("cache init failed");

    if let Some(path) = coordinator.lookup_cache(&source_url).await {
        println!("already cached: {}", path.display());
        return;
    }

    let (tx, rx) = tokio::sync::oneshot::channel();
    coordinator
        .request_download(
            "offline-demo",
            &source_url,
            Box::new(move |origin, path| {
                let _ = tx.send((origin, path));
            }),
        )
        .await;

    match tokio::time::timeout(Duration::from_secs(60), rx).await {
        Ok(Ok((origin, path))) => {
            println!("cached {} -> {}", origin, path.display());
        }
        _ => {
            eprintln!("download did not complete");
            coordinator.cancel_download("offline-demo").await;
        }
    }

    if let Some(size) = coordinator.cache_directory_size().await {
        println!("cache size: {}", size);
    }
}
