//! In-Memory Artifact Store Implementation

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::application::ports::{ArtifactSelector, ArtifactStorePort, StoreError};
use crate::domain::book::{ArtifactFormat, RenderedArtifact, RunId};

/// 默认最多保留的成品数量
pub const DEFAULT_MAX_ARTIFACTS: usize = 64;

#[derive(Debug, Clone)]
struct Entry {
    artifact: RenderedArtifact,
    stored_at: DateTime<Utc>,
    /// 写入序号，最大者为最新成品
    sequence: u64,
}

/// 内存成品仓库
///
/// 按 RunId 保存；`Latest` 指向最后一次写入的任务（后写覆盖先写）。
/// 超过容量时淘汰最早写入的成品。
pub struct InMemoryArtifactStore {
    entries: DashMap<RunId, Entry>,
    sequence: AtomicU64,
    max_entries: usize,
}

impl InMemoryArtifactStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            sequence: AtomicU64::new(0),
            max_entries: max_entries.max(1),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn store_at(&self, run_id: RunId, artifact: RenderedArtifact, stored_at: DateTime<Utc>) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.entries.insert(
            run_id,
            Entry {
                artifact,
                stored_at,
                sequence,
            },
        );
        tracing::info!(run_id = %run_id, sequence = sequence, "Artifact stored");

        while self.entries.len() > self.max_entries {
            match self.oldest() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                    tracing::debug!(run_id = %oldest, "Artifact evicted (capacity)");
                }
                None => break,
            }
        }
    }

    fn latest(&self) -> Option<RunId> {
        self.entries
            .iter()
            .max_by_key(|entry| entry.sequence)
            .map(|entry| *entry.key())
    }

    fn oldest(&self) -> Option<RunId> {
        self.entries
            .iter()
            .min_by_key(|entry| entry.sequence)
            .map(|entry| *entry.key())
    }
}

impl Default for InMemoryArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ARTIFACTS)
    }
}

impl ArtifactStorePort for InMemoryArtifactStore {
    fn store(&self, run_id: RunId, artifact: RenderedArtifact) {
        self.store_at(run_id, artifact, Utc::now());
    }

    fn retrieve(
        &self,
        selector: ArtifactSelector,
        format: ArtifactFormat,
    ) -> Result<String, StoreError> {
        let run_id = match selector {
            ArtifactSelector::Run(run_id) => run_id,
            ArtifactSelector::Latest => self.latest().ok_or(StoreError::NotFound)?,
        };

        self.entries
            .get(&run_id)
            .map(|entry| entry.artifact.get(format).to_string())
            .ok_or(StoreError::NotFound)
    }

    fn evict_expired(&self, ttl_secs: u64) -> usize {
        // 超出 chrono 可表示范围的 TTL 视为永不过期
        let Some(ttl) = i64::try_from(ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
        else {
            return 0;
        };
        let now = Utc::now();

        let expired: Vec<RunId> = self
            .entries
            .iter()
            .filter_map(|entry| {
                if now - entry.stored_at > ttl {
                    Some(*entry.key())
                } else {
                    None
                }
            })
            .collect();

        for run_id in &expired {
            self.entries.remove(run_id);
            tracing::debug!(run_id = %run_id, "Artifact evicted (expired)");
        }
        expired.len()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
