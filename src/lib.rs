//! Bookwright - LLM 书籍生成服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Book Context: 主题、大纲、书稿、成品、进度事件
//! - 提示词模板、大纲解析、代码围栏清理
//!
//! 应用层 (application/):
//! - Ports: 端口定义（LlmClient, ArtifactStore, ProgressSink, MarkdownRenderer）
//! - Commands: GenerateBook 编排（大纲 → 章节 → 校对）
//! - Queries: GetArtifact 成品下载
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: SSE 生成接口 + 下载接口 + 静态页面
//! - Memory: ArtifactStore 内存实现
//! - Worker: ArtifactGcWorker 过期成品清理
//! - Adapters: OpenAI 兼容客户端、Fake 客户端、Markdown 渲染
//! - Events: 进度事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
