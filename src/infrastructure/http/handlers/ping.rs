//! Ping Handler
//!
//! 健康检查，同时探测 LLM 后端是否可达

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// "ok" 或 "unreachable"；不影响 status
    pub llm: &'static str,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let llm = if state.llm.health_check().await {
        "ok"
    } else {
        "unreachable"
    };

    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        llm,
    })
}

#[cfg(test)]
mod tests {
    use crate::application::{LlmClientPort, LlmError};
    use crate::infrastructure::adapters::PlainTextRenderer;
    use crate::infrastructure::http::routes::create_routes;
    use crate::infrastructure::http::state::{AppState, StreamOptions};
    use crate::infrastructure::memory::InMemoryArtifactStore;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    /// 后端始终不可达
    struct OfflineLlm;

    #[async_trait]
    impl LlmClientPort for OfflineLlm {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::NetworkError("connection refused".to_string()))
        }

        async fn health_check(&self) -> bool {
            false
        }
    }

    async fn ping(llm: Arc<dyn LlmClientPort>) -> (StatusCode, Value) {
        let state = AppState::new(
            llm,
            InMemoryArtifactStore::default().arc(),
            Arc::new(PlainTextRenderer),
            StreamOptions::default(),
        );
        let response = create_routes()
            .with_state(Arc::new(state))
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_ping_reports_unreachable_backend() {
        let (status, body) = ping(Arc::new(OfflineLlm)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
                "llm": "unreachable"
            })
        );
    }

    #[tokio::test]
    async fn test_ping_reports_healthy_backend() {
        let llm = Arc::new(crate::infrastructure::adapters::FakeLlmClient::default());
        let (_, body) = ping(llm).await;
        assert_eq!(body["llm"], "ok");
    }
}
