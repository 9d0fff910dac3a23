//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值（旧版环境变量 VLLM_API_BASE / VLLM_API_KEY / MODEL_NAME 会替换 LLM 默认值）

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{
    AppConfig, LlmProvider, DEFAULT_LLM_API_KEY, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL,
};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "BOOKWRIGHT";

/// 读取旧版环境变量，未设置或为空时使用默认值
fn legacy_env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `BOOKWRIGHT_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `BOOKWRIGHT_SERVER__PORT=8080`
/// - `BOOKWRIGHT_LLM__BASE_URL=http://vllm:8000/v1`
/// - `BOOKWRIGHT_LLM__MODEL=llama3`
/// - `BOOKWRIGHT_LLM__PROVIDER=fake`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("server.static_files.enabled", true)?
        .set_default("server.static_files.dir", "web")?
        .set_default("llm.provider", "openai")?
        .set_default(
            "llm.base_url",
            legacy_env_or("VLLM_API_BASE", DEFAULT_LLM_BASE_URL),
        )?
        .set_default(
            "llm.api_key",
            legacy_env_or("VLLM_API_KEY", DEFAULT_LLM_API_KEY),
        )?
        .set_default("llm.model", legacy_env_or("MODEL_NAME", DEFAULT_LLM_MODEL))?
        .set_default("llm.timeout_secs", 600)?
        .set_default("llm.fake_latency_ms", 200)?
        .set_default("render.markdown", true)?
        .set_default("stream.keep_alive_secs", 15)?
        .set_default("stream.buffer", 1)?
        .set_default("gc.enabled", true)?
        .set_default("gc.interval_secs", 300)?
        .set_default("gc.artifact_ttl_secs", 3600)?
        .set_default("gc.max_artifacts", 64)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: BOOKWRIGHT_LLM__BASE_URL=http://vllm:8000/v1
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.llm.provider == LlmProvider::Openai {
        if config.llm.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "LLM base URL cannot be empty".to_string(),
            ));
        }
        if config.llm.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "LLM model cannot be empty".to_string(),
            ));
        }
    }

    if config.llm.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "LLM timeout cannot be 0".to_string(),
        ));
    }

    if config.gc.enabled && (config.gc.interval_secs == 0 || config.gc.artifact_ttl_secs == 0) {
        return Err(ConfigError::ValidationError(
            "GC interval and artifact TTL cannot be 0 when GC is enabled".to_string(),
        ));
    }

    if config.gc.max_artifacts == 0 {
        return Err(ConfigError::ValidationError(
            "max_artifacts cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!(
        "Static Files: {} ({:?})",
        config.server.static_files.enabled,
        config.server.static_files.dir
    );
    tracing::info!("LLM Provider: {}", config.llm.provider.as_str());
    tracing::info!("LLM Base URL: {}", config.llm.base_url);
    tracing::info!("LLM Model: {}", config.llm.model);
    tracing::info!("LLM Timeout: {}s", config.llm.timeout_secs);
    tracing::info!("Markdown Rendering: {}", config.render.markdown);
    tracing::info!("GC Enabled: {}", config.gc.enabled);
    if config.gc.enabled {
        tracing::info!("GC Interval: {}s", config.gc.interval_secs);
        tracing::info!("Artifact TTL: {}s", config.gc.artifact_ttl_secs);
    }
    tracing::info!("Max Artifacts: {}", config.gc.max_artifacts);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_base_url() {
        let mut config = AppConfig::default();
        config.llm.base_url = "  ".to_string();
        assert!(validate_config(&config).is_err());

        // 假模型不需要后端地址
        config.llm.provider = LlmProvider::Fake;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_gc_interval() {
        let mut config = AppConfig::default();
        config.gc.interval_secs = 0;
        assert!(validate_config(&config).is_err());

        config.gc.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_capacity() {
        let mut config = AppConfig::default();
        config.gc.max_artifacts = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 8080\n\n[llm]\nprovider = \"fake\"\nmodel = \"tiny\"\n\n[render]\nmarkdown = false"
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.provider, LlmProvider::Fake);
        assert_eq!(config.llm.model, "tiny");
        assert!(!config.render.markdown);
        // 未覆盖的项保持默认
        assert_eq!(config.gc.artifact_ttl_secs, 3600);
        assert_eq!(config.stream.keep_alive_secs, 15);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 0").unwrap();
        assert!(matches!(
            load_config_from_path(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_legacy_env_or_ignores_blank_values() {
        const NAME: &str = "BOOKWRIGHT_TEST_LEGACY_ONLY";

        std::env::remove_var(NAME);
        assert_eq!(legacy_env_or(NAME, "fallback"), "fallback");

        std::env::set_var(NAME, "   ");
        assert_eq!(legacy_env_or(NAME, "fallback"), "fallback");

        std::env::set_var(NAME, "http://vllm:8000/v1");
        assert_eq!(legacy_env_or(NAME, "fallback"), "http://vllm:8000/v1");

        std::env::remove_var(NAME);
    }

    #[test]
    fn test_legacy_env_replaces_llm_defaults() {
        std::env::set_var("VLLM_API_BASE", "http://vllm:8000/v1");
        std::env::set_var("VLLM_API_KEY", "sk-legacy");
        std::env::set_var("MODEL_NAME", "llama3");

        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let loaded = load_config_from_path(Some(file.path()));

        std::env::remove_var("VLLM_API_BASE");
        std::env::remove_var("VLLM_API_KEY");
        std::env::remove_var("MODEL_NAME");

        let config = loaded.unwrap();
        assert_eq!(config.llm.base_url, "http://vllm:8000/v1");
        assert_eq!(config.llm.api_key, "sk-legacy");
        assert_eq!(config.llm.model, "llama3");
    }
}
