//! Book Context - 书籍限界上下文
//!
//! 职责:
//! - 选题与章节标题的校验
//! - 书稿聚合（按大纲顺序追加章节）
//! - 成品（RTF + HTML）与下载格式
//! - 生成过程中的进度事件

mod aggregate;
mod entities;
mod errors;
mod events;
mod value_objects;

pub use aggregate::Manuscript;
pub use entities::{ArtifactFormat, ChapterSection, RenderedArtifact};
pub use errors::BookError;
pub use events::ProgressEvent;
pub use value_objects::{ChapterTitle, RunId, Topic};
