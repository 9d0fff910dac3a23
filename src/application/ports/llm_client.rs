//! LLM Client Port - 对话补全抽象
//!
//! 定义调用大模型的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// LLM 调用错误（上游错误）
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// LLM Client Port
///
/// 给定提示词，返回模型的原始文本回答。不重试、不流式。
#[async_trait]
pub trait LlmClientPort: Send + Sync {
    /// 执行一次对话补全
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// 检查后端是否可用
    async fn health_check(&self) -> bool {
        true
    }
}
