//! Book Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BookError;

/// 生成任务唯一标识
///
/// 每次 POST /generate 分配一个，作为成品仓库的 key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 书籍选题
///
/// 首尾空白会被去掉，去掉后不能为空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic(String);

impl Topic {
    pub fn new(topic: impl AsRef<str>) -> Result<Self, BookError> {
        let topic = topic.as_ref().trim();
        if topic.is_empty() {
            return Err(BookError::EmptyTopic);
        }
        Ok(Self(topic.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 章节标题（来自大纲，顺序决定书稿章节顺序，不要求唯一）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterTitle(String);

impl ChapterTitle {
    pub fn new(title: impl AsRef<str>) -> Result<Self, BookError> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(BookError::EmptyChapterTitle);
        }
        Ok(Self(title.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChapterTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
