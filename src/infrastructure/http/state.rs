//! Application State
//!
//! 路由共享的端口与 Command/Query Handlers

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::{
    ArtifactStorePort, GenerateBookHandler, GetArtifactHandler, LlmClientPort,
    MarkdownRendererPort,
};

/// 事件流参数
#[derive(Debug, Clone, Copy)]
pub struct StreamOptions {
    /// keep-alive 注释间隔
    pub keep_alive: Duration,
    /// 允许领先客户端的事件数
    pub buffer: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            keep_alive: Duration::from_secs(15),
            buffer: 1,
        }
    }
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub llm: Arc<dyn LlmClientPort>,

    // ========== Command Handlers ==========
    /// 生成任务在独立 task 中运行，需要共享所有权
    pub generate_book_handler: Arc<GenerateBookHandler>,

    // ========== Query Handlers ==========
    pub get_artifact_handler: GetArtifactHandler,

    pub stream: StreamOptions,

    /// 服务关闭信号，进行中的生成任务收到后放弃
    pub shutdown: CancellationToken,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        llm: Arc<dyn LlmClientPort>,
        artifact_store: Arc<dyn ArtifactStorePort>,
        renderer: Arc<dyn MarkdownRendererPort>,
        stream: StreamOptions,
    ) -> Self {
        Self {
            llm: llm.clone(),
            generate_book_handler: Arc::new(GenerateBookHandler::new(
                llm,
                artifact_store.clone(),
                renderer,
            )),
            get_artifact_handler: GetArtifactHandler::new(artifact_store),
            stream,
            shutdown: CancellationToken::new(),
        }
    }

    /// 绑定服务关闭信号
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }
}
