//! Fake LLM Client - 离线演示与测试用的模型
//!
//! 不调用任何外部服务，按提示词类型返回固定格式的回答：
//! 大纲返回 JSON 数组，章节返回一段正文，校对返回包在代码围栏里的 RTF

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{LlmClientPort, LlmError};

const OUTLINE_MARKER: &str = "Create a detailed book outline";
const PROOFREAD_MARKER: &str = "TEXT TO PROCESS:\n";
const CHAPTER_MARKER: &str = "for the chapter: '";

/// Fake LLM Client
pub struct FakeLlmClient {
    /// 每次调用的模拟延迟
    latency: Duration,
}

impl FakeLlmClient {
    pub fn new(latency: Duration) -> Self {
        tracing::info!(latency_ms = latency.as_millis() as u64, "FakeLlmClient initialized");
        Self { latency }
    }

    fn outline() -> String {
        r#"["Chapter 1: Foundations", "Chapter 2: In Practice", "Chapter 3: Looking Ahead"]"#
            .to_string()
    }

    fn chapter(prompt: &str) -> String {
        let title = prompt
            .split_once(CHAPTER_MARKER)
            .and_then(|(_, rest)| rest.split_once('\''))
            .map(|(title, _)| title)
            .unwrap_or("this chapter");
        format!(
            "This is placeholder prose for {}. It stands in for the text a real model would write.\n\n\
             A second paragraph keeps the layout realistic.",
            title
        )
    }

    fn proofread(prompt: &str) -> String {
        let manuscript = prompt
            .split_once(PROOFREAD_MARKER)
            .map(|(_, text)| text)
            .unwrap_or_default();

        let mut rtf = String::from("```rtf\n{\\rtf1\\ansi\\deff0 {\\fonttbl {\\f0 Times New Roman;}}\\f0\\fs24\n");
        for line in manuscript.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match line.strip_prefix("## ") {
                Some(heading) => {
                    rtf.push_str(&format!("{{\\b\\fs32 {}}}\\par\n", escape_rtf(heading)))
                }
                None => rtf.push_str(&format!("{}\\par\n", escape_rtf(line))),
            }
        }
        rtf.push_str("}\n```");
        rtf
    }
}

impl Default for FakeLlmClient {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

fn escape_rtf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            c if c.is_ascii() => out.push(c),
            // RTF 的 \uN 以 UTF-16 码元计数，BMP 之外的字符拆成代理对
            c => {
                for unit in c.encode_utf16(&mut [0u16; 2]) {
                    out.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
    out
}

#[async_trait]
impl LlmClientPort for FakeLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        tracing::debug!(prompt_len = prompt.len(), "FakeLlmClient: returning canned reply");

        // 模拟推理延迟
        tokio::time::sleep(self.latency).await;

        let reply = if prompt.starts_with(OUTLINE_MARKER) {
            Self::outline()
        } else if prompt.contains(PROOFREAD_MARKER) {
            Self::proofread(prompt)
        } else {
            Self::chapter(prompt)
        };
        Ok(reply)
    }
}
