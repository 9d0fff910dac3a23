//! Book Commands

use crate::domain::book::{RunId, Topic};

/// 生成书籍命令
#[derive(Debug, Clone)]
pub struct GenerateBook {
    pub run_id: RunId,
    pub topic: Topic,
}

impl GenerateBook {
    pub fn new(topic: Topic) -> Self {
        Self {
            run_id: RunId::new(),
            topic,
        }
    }
}
