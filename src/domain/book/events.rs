//! Book Context - Progress Events

use serde::{Deserialize, Serialize};

use super::RunId;

/// 生成过程中的进度事件
///
/// 序列化为带 `status` 字段的 JSON 对象，直接作为 SSE 的 data 负载：
/// - `{"status":"thinking","message":"..."}`
/// - `{"status":"draft","content":"..."}`
/// - `{"status":"complete","message":"...","run_id":"..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// 阶段提示
    Thinking { message: String },
    /// 一个章节的渲染结果
    Draft { content: String },
    /// 生成完成，成品已可下载
    Complete { message: String, run_id: RunId },
}

impl ProgressEvent {
    pub fn thinking(message: impl Into<String>) -> Self {
        Self::Thinking {
            message: message.into(),
        }
    }

    pub fn draft(content: impl Into<String>) -> Self {
        Self::Draft {
            content: content.into(),
        }
    }

    pub fn complete(message: impl Into<String>, run_id: RunId) -> Self {
        Self::Complete {
            message: message.into(),
            run_id,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ProgressEvent::Thinking { .. } => "thinking",
            ProgressEvent::Draft { .. } => "draft",
            ProgressEvent::Complete { .. } => "complete",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ProgressEvent::Complete { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_thinking_wire_shape() {
        let value = serde_json::to_value(ProgressEvent::thinking("Consulting")).unwrap();
        assert_eq!(value, json!({"status": "thinking", "message": "Consulting"}));
    }

    #[test]
    fn test_draft_wire_shape() {
        let value = serde_json::to_value(ProgressEvent::draft("\n\n## A\n\nB\n")).unwrap();
        assert_eq!(value, json!({"status": "draft", "content": "\n\n## A\n\nB\n"}));
    }

    #[test]
    fn test_complete_carries_run_id() {
        let run_id = RunId::new();
        let event = ProgressEvent::complete("done", run_id);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["status"], "complete");
        assert_eq!(value["message"], "done");
        assert_eq!(value["run_id"], run_id.to_string());
        assert!(event.is_complete());
        assert_eq!(event.status(), "complete");
    }
}
