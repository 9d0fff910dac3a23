//! Book Context - Entities

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{BookError, ChapterTitle};

/// 章节片段 - 书稿的最小组成单位
///
/// 渲染形式固定为 `"\n\n## {title}\n\n{content}\n"`，content 已去掉首尾空白。
/// 同一字符串既作为 draft 事件推送给客户端，也拼入最终书稿。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSection {
    title: ChapterTitle,
    content: String,
}

impl ChapterSection {
    pub fn new(title: ChapterTitle, raw_content: &str) -> Self {
        Self {
            title,
            content: raw_content.trim().to_string(),
        }
    }

    pub fn title(&self) -> &ChapterTitle {
        &self.title
    }

    /// 渲染为 Markdown 片段（二级标题 + 正文）
    pub fn render(&self) -> String {
        format!("\n\n## {}\n\n{}\n", self.title, self.content)
    }
}

/// 成品：同一份书稿的两种渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// 模型输出的 RTF 原文（不做结构校验）
    pub formatted_document: String,
    /// 本地由书稿渲染的 HTML
    pub html: String,
}

impl RenderedArtifact {
    pub fn new(formatted_document: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            formatted_document: formatted_document.into(),
            html: html.into(),
        }
    }

    pub fn get(&self, format: ArtifactFormat) -> &str {
        match format {
            ArtifactFormat::Rtf => &self.formatted_document,
            ArtifactFormat::Html => &self.html,
        }
    }
}

/// 下载格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    #[default]
    Rtf,
    Html,
}

impl ArtifactFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactFormat::Rtf => "rtf",
            ArtifactFormat::Html => "html",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactFormat::Rtf => "application/rtf",
            ArtifactFormat::Html => "text/html; charset=utf-8",
        }
    }

    /// 下载文件名，如 `generated_book.rtf`
    pub fn file_name(&self) -> String {
        format!("generated_book.{}", self.as_str())
    }
}

impl FromStr for ArtifactFormat {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rtf" => Ok(ArtifactFormat::Rtf),
            "html" => Ok(ArtifactFormat::Html),
            other => Err(BookError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_render_trims_body() {
        let title = ChapterTitle::new("Chapter 1: Origins").unwrap();
        let section = ChapterSection::new(title, "\n  Water flowed downhill.  \n\n");
        assert_eq!(
            section.render(),
            "\n\n## Chapter 1: Origins\n\nWater flowed downhill.\n"
        );
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("rtf".parse::<ArtifactFormat>(), Ok(ArtifactFormat::Rtf));
        assert_eq!("html".parse::<ArtifactFormat>(), Ok(ArtifactFormat::Html));
        assert_eq!(
            "xml".parse::<ArtifactFormat>(),
            Err(BookError::UnsupportedFormat("xml".to_string()))
        );
        // 大小写敏感，与路由参数保持一致
        assert!("HTML".parse::<ArtifactFormat>().is_err());
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ArtifactFormat::Rtf.file_name(), "generated_book.rtf");
        assert_eq!(ArtifactFormat::Html.file_name(), "generated_book.html");
        assert_eq!(ArtifactFormat::Rtf.content_type(), "application/rtf");
        assert!(ArtifactFormat::Html.content_type().starts_with("text/html"));
    }

    #[test]
    fn test_artifact_get_by_format() {
        let artifact = RenderedArtifact::new("{\\rtf1 x}", "<p>x</p>");
        assert_eq!(artifact.get(ArtifactFormat::Rtf), "{\\rtf1 x}");
        assert_eq!(artifact.get(ArtifactFormat::Html), "<p>x</p>");
    }
}
