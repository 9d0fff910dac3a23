//! Book Context - Aggregate Root

use super::{ChapterSection, Topic};

/// Manuscript 聚合根
///
/// 不变量:
/// - 章节只能按大纲顺序追加，不能修改或删除
/// - text 恒等于所有已追加章节渲染结果按顺序拼接
#[derive(Debug, Clone)]
pub struct Manuscript {
    topic: Topic,
    sections: Vec<ChapterSection>,
    text: String,
}

impl Manuscript {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            sections: Vec::new(),
            text: String::new(),
        }
    }

    /// 追加一个章节，返回该章节的渲染结果（即 draft 事件内容）
    pub fn append(&mut self, section: ChapterSection) -> String {
        let rendered = section.render();
        self.text.push_str(&rendered);
        self.sections.push(section);
        rendered
    }

    // Getters
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn sections(&self) -> &[ChapterSection] {
        &self.sections
    }

    pub fn chapter_count(&self) -> usize {
        self.sections.len()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
