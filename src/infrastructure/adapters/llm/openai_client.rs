//! OpenAI-Compatible Client - 调用 OpenAI 兼容的对话补全服务
//!
//! 实现 LlmClientPort trait，适用于 vLLM / Ollama / OpenAI 等兼容后端
//!
//! 外部 API:
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [{"role": "system", ...}, {"role": "user", ...}]}
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{LlmClientPort, LlmError};
use crate::domain::SYSTEM_PROMPT;

/// 对话消息
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// 对话补全请求体
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI 兼容客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// API 基础 URL（包含 /v1）
    pub base_url: String,
    /// API Key，为空或 "EMPTY" 时不发送 Authorization
    pub api_key: String,
    /// 模型标识
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for OpenAiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/v1".to_string(),
            api_key: "EMPTY".to_string(),
            model: "gpt-oss:20b".to_string(),
            timeout_secs: 600,
        }
    }
}

impl OpenAiClientConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// OpenAI 兼容客户端
pub struct OpenAiClient {
    client: Client,
    config: OpenAiClientConfig,
}

impl OpenAiClient {
    /// 创建新的客户端
    pub fn new(config: OpenAiClientConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取对话补全 URL
    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// 获取模型列表 URL（健康检查）
    fn models_url(&self) -> String {
        format!("{}/models", self.config.base_url.trim_end_matches('/'))
    }

    fn api_key(&self) -> Option<&str> {
        let key = self.config.api_key.trim();
        if key.is_empty() || key == "EMPTY" {
            None
        } else {
            Some(key)
        }
    }
}

#[async_trait]
impl LlmClientPort for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending chat completion request"
        );

        let mut request = self.client.post(self.completions_url()).json(&body);
        if let Some(key) = self.api_key() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else if e.is_connect() {
                LlmError::NetworkError(format!("Cannot connect to LLM backend: {}", e))
            } else {
                LlmError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to decode response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))?;

        tracing::info!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            response_len = content.len(),
            "Chat completion finished"
        );

        Ok(content)
    }

    async fn health_check(&self) -> bool {
        let mut request = self.client.get(self.models_url()).timeout(Duration::from_secs(5));
        if let Some(key) = self.api_key() {
            request = request.bearer_auth(key);
        }
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAiClient {
        let config = OpenAiClientConfig::new(format!("{}/v1", server.uri()), "test-model")
            .with_api_key("secret")
            .with_timeout(5);
        OpenAiClient::new(config).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = OpenAiClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.api_key, "EMPTY");
        assert_eq!(config.model, "gpt-oss:20b");
    }

    #[test]
    fn test_urls_tolerate_trailing_slash() {
        let client = OpenAiClient::new(OpenAiClientConfig::new("http://host:8000/v1/", "m")).unwrap();
        assert_eq!(client.completions_url(), "http://host:8000/v1/chat/completions");
        assert_eq!(client.models_url(), "http://host:8000/v1/models");
        assert_eq!(client.api_key(), None);
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": "Write a haiku"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Old pond"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).complete("Write a haiku").await.unwrap();
        assert_eq!(reply, "Old pond");
    }

    #[tokio::test]
    async fn test_non_success_status_is_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("hi").await.unwrap_err();
        match err {
            LlmError::ServiceError(msg) => assert!(msg.contains("overloaded")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_content_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // 端口 9 (discard) 上通常没有服务
        let client = OpenAiClient::new(
            OpenAiClientConfig::new("http://127.0.0.1:9/v1", "m").with_timeout(5),
        )
        .unwrap();
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::NetworkError(_) | LlmError::Timeout));
        assert!(!client.health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_uses_models_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        assert!(client_for(&server).health_check().await);
    }
}
