//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM 后端配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// HTML 渲染配置
    #[serde(default)]
    pub render: RenderConfig,

    /// 事件流配置
    #[serde(default)]
    pub stream: StreamConfig,

    /// GC 配置
    #[serde(default)]
    pub gc: GcConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录（包含 index.html）
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_enabled() -> bool {
    true
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// LLM 后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI 兼容的 HTTP 服务（vLLM、Ollama 等）
    #[default]
    Openai,
    /// 内置假模型，不发任何请求
    Fake,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Openai => "openai",
            LlmProvider::Fake => "fake",
        }
    }
}

/// LLM 后端配置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// 后端类型
    #[serde(default)]
    pub provider: LlmProvider,

    /// API 基础 URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// API Key（本地 vLLM 通常为 "EMPTY"）
    #[serde(default = "default_llm_api_key")]
    pub api_key: String,

    /// 模型标识
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// 单次请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// 假模型的模拟延迟（毫秒）
    #[serde(default = "default_fake_latency")]
    pub fake_latency_ms: u64,
}

pub(crate) const DEFAULT_LLM_BASE_URL: &str = "http://localhost:11434/v1";
pub(crate) const DEFAULT_LLM_API_KEY: &str = "EMPTY";
pub(crate) const DEFAULT_LLM_MODEL: &str = "gpt-oss:20b";

fn default_llm_base_url() -> String {
    DEFAULT_LLM_BASE_URL.to_string()
}

fn default_llm_api_key() -> String {
    DEFAULT_LLM_API_KEY.to_string()
}

fn default_llm_model() -> String {
    DEFAULT_LLM_MODEL.to_string()
}

fn default_llm_timeout() -> u64 {
    600
}

fn default_fake_latency() -> u64 {
    200
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            base_url: default_llm_base_url(),
            api_key: default_llm_api_key(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
            fake_latency_ms: default_fake_latency(),
        }
    }
}

/// HTML 渲染配置
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// 是否按 Markdown 渲染；关闭时转义后放进 <pre>
    #[serde(default = "default_markdown")]
    pub markdown: bool,
}

fn default_markdown() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            markdown: default_markdown(),
        }
    }
}

/// 事件流配置
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// SSE keep-alive 注释间隔（秒）
    #[serde(default = "default_keep_alive")]
    pub keep_alive_secs: u64,

    /// 允许领先客户端的事件数
    #[serde(default = "default_buffer")]
    pub buffer: usize,
}

fn default_keep_alive() -> u64 {
    15
}

fn default_buffer() -> usize {
    1
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            keep_alive_secs: default_keep_alive(),
            buffer: default_buffer(),
        }
    }
}

/// GC（成品清理）配置
#[derive(Debug, Clone, Deserialize)]
pub struct GcConfig {
    /// 是否启用自动 GC
    #[serde(default = "default_gc_enabled")]
    pub enabled: bool,

    /// GC 间隔时间（秒）
    #[serde(default = "default_gc_interval")]
    pub interval_secs: u64,

    /// 成品存活时间（秒）
    #[serde(default = "default_artifact_ttl")]
    pub artifact_ttl_secs: u64,

    /// 最多保留的成品数量
    #[serde(default = "default_max_artifacts")]
    pub max_artifacts: usize,
}

fn default_gc_enabled() -> bool {
    true
}

fn default_gc_interval() -> u64 {
    300 // 5 分钟
}

fn default_artifact_ttl() -> u64 {
    3600 // 1 小时
}

fn default_max_artifacts() -> usize {
    64
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            enabled: default_gc_enabled(),
            interval_secs: default_gc_interval(),
            artifact_ttl_secs: default_artifact_ttl(),
            max_artifacts: default_max_artifacts(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
