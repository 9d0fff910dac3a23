//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（LlmClient、ArtifactStore、ProgressSink、MarkdownRenderer）
//! - commands: CQRS 命令及处理器（生成书籍）
//! - queries: CQRS 查询及处理器（下载成品）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{GenerateBookHandler, GenerateBookResponse},
    GenerateBook,
};

pub use error::ApplicationError;

pub use ports::{
    // Artifact store
    ArtifactSelector,
    ArtifactStorePort,
    StoreError,
    // LLM client
    LlmClientPort,
    LlmError,
    // Markdown renderer
    MarkdownRendererPort,
    // Progress sink
    ProgressSinkPort,
    SinkClosed,
};

pub use queries::{handlers::GetArtifactHandler, GetArtifact, GetArtifactResponse};
