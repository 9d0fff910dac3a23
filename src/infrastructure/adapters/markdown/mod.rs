//! Markdown Adapter - 书稿转 HTML 的两种实现

mod plain_text_renderer;
mod pulldown_renderer;

pub use plain_text_renderer::PlainTextRenderer;
pub use pulldown_renderer::PulldownRenderer;
