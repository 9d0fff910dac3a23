//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{LlmError, SinkClosed, StoreError};
use crate::domain::book::BookError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 成品未找到
    #[error("{0}")]
    NotFound(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 不支持的下载格式
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// 外部服务（LLM）错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 客户端断开，任务被取消
    #[error("Cancelled: {0}")]
    Cancelled(String),
}

impl ApplicationError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

impl From<BookError> for ApplicationError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::UnsupportedFormat(fmt) => Self::UnsupportedFormat(fmt),
            other => Self::ValidationError(other.to_string()),
        }
    }
}

impl From<LlmError> for ApplicationError {
    fn from(err: LlmError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        Self::NotFound(err.to_string())
    }
}

impl From<SinkClosed> for ApplicationError {
    fn from(_: SinkClosed) -> Self {
        Self::Cancelled("client disconnected".to_string())
    }
}
