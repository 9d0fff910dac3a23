//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_store;
mod llm_client;
mod markdown_renderer;
mod progress_sink;

pub use artifact_store::{ArtifactSelector, ArtifactStorePort, StoreError};
pub use llm_client::{LlmClientPort, LlmError};
pub use markdown_renderer::MarkdownRendererPort;
pub use progress_sink::{ProgressSinkPort, SinkClosed};
