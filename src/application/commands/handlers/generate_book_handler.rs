//! GenerateBook Handler - 书籍生成编排
//!
//! 三个阶段依次执行：
//! 1. 大纲：请求 JSON 章节标题数组，解析失败或模型不可用时退回默认两章大纲
//! 2. 章节：按大纲顺序逐章请求正文，每章写完立即推送 draft 事件
//! 3. 定稿：整本书稿交给模型校对并转为 RTF，同时本地渲染 HTML
//!
//! 全部成功后写入成品仓库，最后推送 complete 事件。
//! 第二、三阶段的模型错误直接终止本次生成，不保存任何部分结果。
//! 每次模型调用都与客户端连接绑定：连接断开时立即放弃调用。

use std::sync::Arc;

use crate::application::commands::GenerateBook;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtifactStorePort, LlmClientPort, LlmError, MarkdownRendererPort, ProgressSinkPort,
    SinkClosed,
};
use crate::domain::book::{
    ChapterSection, ChapterTitle, Manuscript, ProgressEvent, RenderedArtifact, RunId, Topic,
};
use crate::domain::{
    chapter_prompt, fallback_outline, outline_prompt, parse_outline, proofread_prompt,
};

/// 生成结果摘要
#[derive(Debug, Clone)]
pub struct GenerateBookResponse {
    pub run_id: RunId,
    pub chapter_count: usize,
    pub manuscript_len: usize,
}

/// GenerateBook Handler（书籍编排器）
pub struct GenerateBookHandler {
    llm: Arc<dyn LlmClientPort>,
    artifact_store: Arc<dyn ArtifactStorePort>,
    renderer: Arc<dyn MarkdownRendererPort>,
}

impl GenerateBookHandler {
    pub fn new(
        llm: Arc<dyn LlmClientPort>,
        artifact_store: Arc<dyn ArtifactStorePort>,
        renderer: Arc<dyn MarkdownRendererPort>,
    ) -> Self {
        Self {
            llm,
            artifact_store,
            renderer,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateBook,
        sink: &dyn ProgressSinkPort,
    ) -> Result<GenerateBookResponse, ApplicationError> {
        let GenerateBook { run_id, topic } = command;

        tracing::info!(run_id = %run_id, topic = %topic, "Book generation started");

        // 1. 大纲
        sink.emit(ProgressEvent::thinking(
            "Consulting the muse... Generating topic list...",
        ))
        .await?;
        let outline = self.generate_outline(run_id, &topic, sink).await?;
        let total = outline.len();
        sink.emit(ProgressEvent::thinking(format!(
            "Outline generated: {} chapters identified.",
            total
        )))
        .await?;

        // 2. 逐章撰写
        let mut manuscript = Manuscript::new(topic.clone());
        for (index, title) in outline.into_iter().enumerate() {
            sink.emit(ProgressEvent::thinking(format!(
                "Writing {} ({}/{})...",
                title,
                index + 1,
                total
            )))
            .await?;

            let section = self.write_chapter(run_id, index, title, &topic, sink).await?;
            let rendered = manuscript.append(section);
            sink.emit(ProgressEvent::draft(rendered)).await?;
        }

        // 3. 校对 + RTF，HTML 由本地渲染
        sink.emit(ProgressEvent::thinking(
            "Proofreading and formatting to RTF...",
        ))
        .await?;
        let formatted_document = self.proofread(run_id, manuscript.text(), sink).await?;
        let html = self.renderer.render(manuscript.text());

        let chapter_count = manuscript.chapter_count();
        let manuscript_len = manuscript.text().len();
        self.artifact_store
            .store(run_id, RenderedArtifact::new(formatted_document, html));

        tracing::info!(
            run_id = %run_id,
            chapter_count = chapter_count,
            manuscript_len = manuscript_len,
            "Book generation completed"
        );

        // 成品已写入，客户端此时断开不影响结果
        if sink
            .emit(ProgressEvent::complete("Book generation complete!", run_id))
            .await
            .is_err()
        {
            tracing::debug!(run_id = %run_id, "Client gone before complete event");
        }

        Ok(GenerateBookResponse {
            run_id,
            chapter_count,
            manuscript_len,
        })
    }

    /// 第一阶段：生成大纲，任何解析或模型错误都退回默认大纲
    pub async fn generate_outline(
        &self,
        run_id: RunId,
        topic: &Topic,
        sink: &dyn ProgressSinkPort,
    ) -> Result<Vec<ChapterTitle>, SinkClosed> {
        let outline = match self.ask(&outline_prompt(topic), sink).await? {
            Ok(response) => match parse_outline(&response) {
                Ok(outline) => outline,
                Err(e) => {
                    tracing::warn!(
                        run_id = %run_id,
                        error = %e,
                        "Outline unparseable, using fallback outline"
                    );
                    fallback_outline(topic)
                }
            },
            Err(e) => {
                tracing::warn!(
                    run_id = %run_id,
                    error = %e,
                    "Outline request failed, using fallback outline"
                );
                fallback_outline(topic)
            }
        };

        tracing::debug!(run_id = %run_id, chapters = outline.len(), "Outline ready");
        Ok(outline)
    }

    /// 第二阶段：撰写单个章节
    async fn write_chapter(
        &self,
        run_id: RunId,
        index: usize,
        title: ChapterTitle,
        topic: &Topic,
        sink: &dyn ProgressSinkPort,
    ) -> Result<ChapterSection, ApplicationError> {
        let content = self
            .ask(&chapter_prompt(&title, topic), sink)
            .await?
            .map_err(|e| {
                tracing::error!(
                    run_id = %run_id,
                    chapter_index = index,
                    chapter = %title,
                    error = %e,
                    "Chapter request failed"
                );
                ApplicationError::from(e)
            })?;

        tracing::debug!(
            run_id = %run_id,
            chapter_index = index,
            content_len = content.len(),
            "Chapter written"
        );
        Ok(ChapterSection::new(title, &content))
    }

    /// 第三阶段：校对并转换为 RTF（原样保存，不做结构校验）
    async fn proofread(
        &self,
        run_id: RunId,
        manuscript: &str,
        sink: &dyn ProgressSinkPort,
    ) -> Result<String, ApplicationError> {
        self.ask(&proofread_prompt(manuscript), sink)
            .await?
            .map_err(|e| {
                tracing::error!(run_id = %run_id, error = %e, "Proofread request failed");
                ApplicationError::from(e)
            })
    }

    /// 调用模型；客户端断开时放弃调用
    async fn ask(
        &self,
        prompt: &str,
        sink: &dyn ProgressSinkPort,
    ) -> Result<Result<String, LlmError>, SinkClosed> {
        tokio::select! {
            biased;
            _ = sink.closed() => Err(SinkClosed),
            result = self.llm.complete(prompt) => Ok(result),
        }
    }
}
