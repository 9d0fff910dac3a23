//! Bookwright - LLM 书籍生成服务
//!
//! 启动顺序：配置 → 日志 → LLM 客户端 → 成品仓库 → GC Worker → HTTP 服务器

use std::sync::Arc;
use std::time::Duration;

use bookwright::application::{LlmClientPort, MarkdownRendererPort};
use bookwright::config::{load_config, print_config, AppConfig, LlmProvider};
use bookwright::infrastructure::adapters::{
    FakeLlmClient, OpenAiClient, OpenAiClientConfig, PlainTextRenderer, PulldownRenderer,
};
use bookwright::infrastructure::http::{AppState, HttpServer, ServerConfig, StreamOptions};
use bookwright::infrastructure::memory::InMemoryArtifactStore;
use bookwright::infrastructure::worker::{ArtifactGcWorker, ArtifactGcWorkerConfig};
use tokio_util::sync::CancellationToken;

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},bookwright={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_llm(config: &AppConfig) -> anyhow::Result<Arc<dyn LlmClientPort>> {
    let llm: Arc<dyn LlmClientPort> = match config.llm.provider {
        LlmProvider::Openai => {
            let client_config =
                OpenAiClientConfig::new(config.llm.base_url.clone(), config.llm.model.clone())
                    .with_api_key(config.llm.api_key.clone())
                    .with_timeout(config.llm.timeout_secs);
            Arc::new(OpenAiClient::new(client_config)?)
        }
        LlmProvider::Fake => {
            tracing::warn!("Using fake LLM backend, generated books are placeholders");
            Arc::new(FakeLlmClient::new(Duration::from_millis(
                config.llm.fake_latency_ms,
            )))
        }
    };
    Ok(llm)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Bookwright - LLM book generator");
    print_config(&config);

    // 创建 LLM 客户端
    let llm = build_llm(&config)?;
    if !llm.health_check().await {
        tracing::warn!(
            base_url = %config.llm.base_url,
            "LLM backend not reachable yet, outlines will fall back until it is"
        );
    }

    // 创建 HTML 渲染器
    let renderer: Arc<dyn MarkdownRendererPort> = if config.render.markdown {
        Arc::new(PulldownRenderer)
    } else {
        Arc::new(PlainTextRenderer)
    };

    // 创建成品仓库
    let artifact_store = InMemoryArtifactStore::new(config.gc.max_artifacts).arc();

    // 启动 GC Worker
    let shutdown = CancellationToken::new();
    if config.gc.enabled {
        let worker = ArtifactGcWorker::new(
            ArtifactGcWorkerConfig {
                interval: Duration::from_secs(config.gc.interval_secs),
                ttl_secs: config.gc.artifact_ttl_secs,
            },
            artifact_store.clone(),
            shutdown.clone(),
        );
        tokio::spawn(worker.run());
    }

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_dir(&config.server.static_files.dir);
    }
    let state = AppState::new(
        llm,
        artifact_store,
        renderer,
        StreamOptions {
            keep_alive: Duration::from_secs(config.stream.keep_alive_secs.max(1)),
            buffer: config.stream.buffer,
        },
    )
    .with_shutdown(shutdown.clone());

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    // 取消 token 会同时结束 GC Worker 和进行中的生成任务，SSE 连接随之关闭
    let server_shutdown = shutdown.clone();
    server
        .run_with_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
            server_shutdown.cancel();
        })
        .await?;

    shutdown.cancel();
    tracing::info!("Server shutdown complete");

    Ok(())
}
