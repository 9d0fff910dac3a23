//! Download Handlers - 成品下载

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::GetArtifact;
use crate::domain::book::{ArtifactFormat, RunId};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DownloadParams {
    /// 指定生成任务；缺省时取最近一次完成的成品
    pub run: Option<Uuid>,
}

/// GET /download/{format}
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(format): Path<String>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    serve_artifact(&state, format, params)
}

/// GET /download，等同 /download/rtf
pub async fn download_default(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    serve_artifact(&state, ArtifactFormat::default().to_string(), params)
}

fn serve_artifact(
    state: &AppState,
    format: String,
    params: DownloadParams,
) -> Result<Response, ApiError> {
    let query = GetArtifact {
        format,
        run_id: params.run.map(RunId::from_uuid),
    };

    let result = state.get_artifact_handler.handle(query)?;

    tracing::debug!(
        format = %result.format,
        size = result.data.len(),
        "Serving artifact"
    );

    let disposition = format!("attachment; filename=\"{}\"", result.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, result.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        result.data,
    )
        .into_response())
}
