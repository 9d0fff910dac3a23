//! HTTP Routes
//!
//! API Endpoints:
//! - /generate            POST  提交主题（表单字段 topic），返回 SSE 进度事件流
//! - /download            GET   下载 RTF（等同 /download/rtf）
//! - /download/{format}   GET   下载成品，format 为 rtf 或 html；可选 ?run=<uuid>
//! - /api/ping            GET   健康检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::generate))
        .route("/download", get(handlers::download_default))
        .route("/download/:format", get(handlers::download))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/ping", get(handlers::ping))
}
