//! Artifact GC Worker - 定期清理过期成品

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::ports::ArtifactStorePort;

/// Worker 配置
#[derive(Debug, Clone)]
pub struct ArtifactGcWorkerConfig {
    /// 清理间隔
    pub interval: Duration,
    /// 成品存活时间（秒）
    pub ttl_secs: u64,
}

impl Default for ArtifactGcWorkerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            ttl_secs: 3600,
        }
    }
}

/// 成品清理 Worker
pub struct ArtifactGcWorker {
    config: ArtifactGcWorkerConfig,
    artifact_store: Arc<dyn ArtifactStorePort>,
    shutdown: CancellationToken,
}

impl ArtifactGcWorker {
    pub fn new(
        config: ArtifactGcWorkerConfig,
        artifact_store: Arc<dyn ArtifactStorePort>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            config,
            artifact_store,
            shutdown,
        }
    }

    /// 启动 Worker，直到 shutdown 被触发
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            ttl_secs = self.config.ttl_secs,
            "ArtifactGcWorker started"
        );

        let mut ticker = tokio::time::interval(self.config.interval);
        // 第一次 tick 立即完成，跳过
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    self.sweep();
                }
            }
        }

        tracing::info!("ArtifactGcWorker stopped");
    }

    /// 执行一次清理，返回清理数量
    pub fn sweep(&self) -> usize {
        let evicted = self.artifact_store.evict_expired(self.config.ttl_secs);
        if evicted > 0 {
            tracing::info!(
                evicted = evicted,
                remaining = self.artifact_store.len(),
                "Expired artifacts evicted"
            );
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{RenderedArtifact, RunId};
    use crate::infrastructure::memory::InMemoryArtifactStore;

    #[test]
    fn test_sweep_keeps_fresh_artifacts() {
        let store = Arc::new(InMemoryArtifactStore::default());
        store.store(RunId::new(), RenderedArtifact::new("{\\rtf1 a}", "<p>a</p>"));

        let worker = ArtifactGcWorker::new(
            ArtifactGcWorkerConfig::default(),
            store.clone(),
            CancellationToken::new(),
        );
        assert_eq!(worker.sweep(), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let shutdown = CancellationToken::new();
        let worker = ArtifactGcWorker::new(
            ArtifactGcWorkerConfig {
                interval: Duration::from_millis(10),
                ttl_secs: 3600,
            },
            Arc::new(InMemoryArtifactStore::default()),
            shutdown.clone(),
        );

        let handle = tokio::spawn(worker.run());
        tokio::time::sleep(Duration::from_millis(30)).await;
        shutdown.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
