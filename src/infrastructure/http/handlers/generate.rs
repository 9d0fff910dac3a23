//! Generate Handler - 书籍生成 + SSE 进度事件流
//!
//! 生成任务在独立 task 中运行，通过有界通道把事件交给 SSE 响应。
//! 客户端断开后通道关闭，任务在下一次模型调用或事件推送时放弃。

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Form,
};
use futures_util::stream::Stream;
use serde::Deserialize;
use std::sync::Arc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};

use crate::application::{ApplicationError, GenerateBook};
use crate::domain::book::Topic;
use crate::infrastructure::events::ProgressPublisher;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成表单，接受 urlencoded 与 multipart 两种编码
#[derive(Debug, Default, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub topic: String,
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for GenerateForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(form) = Form::<GenerateForm>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(form);
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        // 只取第一个 topic 字段，其余字段忽略
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            if field.name() == Some("topic") {
                let topic = field.text().await.map_err(IntoResponse::into_response)?;
                return Ok(Self { topic });
            }
        }

        Ok(Self::default())
    }
}

/// POST /generate
pub async fn generate(
    State(state): State<Arc<AppState>>,
    form: GenerateForm,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let topic = Topic::new(&form.topic).map_err(ApplicationError::from)?;
    let command = GenerateBook::new(topic);
    let run_id = command.run_id;

    let (publisher, receiver) = ProgressPublisher::channel(run_id, state.stream.buffer);
    let handler = state.generate_book_handler.clone();
    let shutdown = state.shutdown.clone();

    tokio::spawn(async move {
        // 服务关闭时放弃生成，publisher 随之释放，SSE 流结束
        let result = tokio::select! {
            result = handler.handle(command, &publisher) => result,
            _ = shutdown.cancelled() => {
                tracing::info!(run_id = %run_id, "Book generation aborted by shutdown");
                return;
            }
        };

        match result {
            Ok(response) => {
                tracing::debug!(
                    run_id = %response.run_id,
                    chapter_count = response.chapter_count,
                    manuscript_len = response.manuscript_len,
                    "Progress stream finished"
                );
            }
            Err(e) if e.is_cancelled() => {
                tracing::info!(run_id = %run_id, "Book generation cancelled by client");
            }
            Err(e) => {
                tracing::error!(run_id = %run_id, error = %e, "Book generation failed");
            }
        }
    });

    let stream = ReceiverStream::new(receiver).map(|event| Event::default().json_data(event));

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(state.stream.keep_alive)))
}
