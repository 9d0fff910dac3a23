//! Progress Publisher Implementation
//!
//! 基于 tokio mpsc 的进度事件推送

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{ProgressSinkPort, SinkClosed};
use crate::domain::book::{ProgressEvent, RunId};

/// 单次生成任务的事件发布器
///
/// 通道容量即允许领先客户端的事件数；容量为 1 时，
/// 下一章开始前上一章的 draft 一定已被 SSE 流取走
pub struct ProgressPublisher {
    run_id: RunId,
    sender: mpsc::Sender<ProgressEvent>,
}

impl ProgressPublisher {
    /// 创建发布器及其接收端
    pub fn channel(run_id: RunId, capacity: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { run_id, sender }, receiver)
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }
}

#[async_trait]
impl ProgressSinkPort for ProgressPublisher {
    async fn emit(&self, event: ProgressEvent) -> Result<(), SinkClosed> {
        let status = event.status();
        self.sender.send(event).await.map_err(|_| {
            tracing::debug!(
                run_id = %self.run_id,
                status = status,
                "Failed to publish progress event (receiver dropped)"
            );
            SinkClosed
        })?;

        tracing::trace!(run_id = %self.run_id, status = status, "Progress event published");
        Ok(())
    }

    async fn closed(&self) {
        self.sender.closed().await
    }
}
