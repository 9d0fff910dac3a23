//! Progress Sink Port - 进度事件出口
//!
//! 编排器把进度事件写到这里；具体实现把事件转发给 SSE 连接

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::book::ProgressEvent;

/// 客户端已断开，事件无法送达
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Progress receiver closed")]
pub struct SinkClosed;

/// Progress Sink Port
#[async_trait]
pub trait ProgressSinkPort: Send + Sync {
    /// 发送一个事件；缓冲区满时等待消费方取走上一个事件
    async fn emit(&self, event: ProgressEvent) -> Result<(), SinkClosed>;

    /// 在接收方断开时完成
    async fn closed(&self);
}
