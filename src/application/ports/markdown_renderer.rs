//! Markdown Renderer Port - 书稿转 HTML

/// Markdown Renderer Port
///
/// 把纯文本书稿渲染为 HTML，不依赖模型输出
pub trait MarkdownRendererPort: Send + Sync {
    fn render(&self, manuscript: &str) -> String;
}
