//! Artifact Store Port - 成品仓库
//!
//! 按生成任务保存成品，供下载接口读取

use thiserror::Error;

use crate::domain::book::{ArtifactFormat, RenderedArtifact, RunId};

/// 成品仓库错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No book generated yet")]
    NotFound,
}

/// 选择要读取的成品
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSelector {
    /// 最近一次成功写入的任务
    Latest,
    /// 指定任务
    Run(RunId),
}

impl From<Option<RunId>> for ArtifactSelector {
    fn from(run_id: Option<RunId>) -> Self {
        run_id.map(ArtifactSelector::Run).unwrap_or(ArtifactSelector::Latest)
    }
}

/// Artifact Store Port
///
/// 所有数据保存在内存中，进程退出即丢失
pub trait ArtifactStorePort: Send + Sync {
    /// 写入（覆盖）某个任务的成品，并使其成为最新成品
    fn store(&self, run_id: RunId, artifact: RenderedArtifact);

    /// 读取指定格式的成品文本
    fn retrieve(
        &self,
        selector: ArtifactSelector,
        format: ArtifactFormat,
    ) -> Result<String, StoreError>;

    /// 清理存放超过 ttl_secs 的成品，返回清理数量
    fn evict_expired(&self, ttl_secs: u64) -> usize;

    /// 当前保存的成品数量
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
