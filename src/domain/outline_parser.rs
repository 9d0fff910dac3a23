//! 大纲解析器
//!
//! 把模型对大纲提示词的回答解析成有序的章节标题列表。
//! 解析是严格的：只接受非空的字符串数组，且每个标题去掉空白后非空。

use thiserror::Error;

use super::book::{ChapterTitle, Topic};
use super::code_fence::strip_code_fences;

/// 大纲解析错误（只在内部使用，调用方会退回默认大纲）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutlineParseError {
    #[error("No JSON array found in response")]
    NoJsonArray,

    #[error("Invalid JSON array: {0}")]
    InvalidJson(String),

    #[error("Outline is empty")]
    Empty,

    #[error("Chapter title at index {0} is blank")]
    BlankTitle(usize),
}

/// 解析模型返回的大纲
///
/// 解析顺序：
/// 1. 去掉代码围栏后整体按 `Vec<String>` 解码
/// 2. 失败则截取第一个 `[` 到最后一个 `]` 之间的内容再解码
/// 3. 校验列表非空、标题非空
pub fn parse_outline(response: &str) -> Result<Vec<ChapterTitle>, OutlineParseError> {
    let cleaned = strip_code_fences(response);

    let titles = match serde_json::from_str::<Vec<String>>(&cleaned) {
        Ok(titles) => titles,
        Err(_) => {
            let start = cleaned.find('[').ok_or(OutlineParseError::NoJsonArray)?;
            let end = cleaned.rfind(']').ok_or(OutlineParseError::NoJsonArray)?;
            if end < start {
                return Err(OutlineParseError::NoJsonArray);
            }
            serde_json::from_str::<Vec<String>>(&cleaned[start..=end])
                .map_err(|e| OutlineParseError::InvalidJson(e.to_string()))?
        }
    };

    if titles.is_empty() {
        return Err(OutlineParseError::Empty);
    }

    titles
        .iter()
        .enumerate()
        .map(|(index, title)| {
            ChapterTitle::new(title).map_err(|_| OutlineParseError::BlankTitle(index))
        })
        .collect()
}

/// 默认大纲（两章），解析失败或模型不可用时使用
pub fn fallback_outline(topic: &Topic) -> Vec<ChapterTitle> {
    [
        format!("Chapter 1: {} Overview", topic),
        format!("Chapter 2: Deep Dive into {}", topic),
    ]
    .iter()
    .filter_map(|title| ChapterTitle::new(title).ok())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(outline: &[ChapterTitle]) -> Vec<&str> {
        outline.iter().map(|t| t.as_str()).collect()
    }

    #[test]
    fn test_plain_json_array() {
        let outline = parse_outline(r#"["Chapter 1: Origins", "Chapter 2: Engineering"]"#).unwrap();
        assert_eq!(titles(&outline), vec!["Chapter 1: Origins", "Chapter 2: Engineering"]);
    }

    #[test]
    fn test_array_embedded_in_chatter() {
        let response = "Sure! Here is your outline:\n[\"Intro\", \"Middle\", \"End\"]\nHope it helps [really].";
        // 最后一个 `]` 属于尾部闲聊，截取结果不是合法 JSON
        assert!(matches!(
            parse_outline(response),
            Err(OutlineParseError::InvalidJson(_))
        ));

        let response = "Sure! Here is your outline:\n[\"Intro\", \"Middle\", \"End\"]\nEnjoy.";
        let outline = parse_outline(response).unwrap();
        assert_eq!(titles(&outline), vec!["Intro", "Middle", "End"]);
    }

    #[test]
    fn test_fenced_array() {
        let response = "```json\n[\"A\", \"B\"]\n```";
        let outline = parse_outline(response).unwrap();
        assert_eq!(titles(&outline), vec!["A", "B"]);
    }

    #[test]
    fn test_titles_are_trimmed_and_order_kept() {
        let outline = parse_outline(r#"["  Z ", "A", "Z"]"#).unwrap();
        assert_eq!(titles(&outline), vec!["Z", "A", "Z"]);
    }

    #[test]
    fn test_rejects_missing_array() {
        assert_eq!(parse_outline("no outline here"), Err(OutlineParseError::NoJsonArray));
        assert_eq!(parse_outline("] backwards ["), Err(OutlineParseError::NoJsonArray));
        assert_eq!(parse_outline(""), Err(OutlineParseError::NoJsonArray));
    }

    #[test]
    fn test_rejects_wrong_element_types() {
        assert!(matches!(
            parse_outline("[1, 2, 3]"),
            Err(OutlineParseError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_outline(r#"[{"title": "A"}]"#),
            Err(OutlineParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert_eq!(parse_outline("[]"), Err(OutlineParseError::Empty));
        assert_eq!(
            parse_outline(r#"["A", "   "]"#),
            Err(OutlineParseError::BlankTitle(1))
        );
    }

    #[test]
    fn test_fallback_outline() {
        let topic = Topic::new("Roman Aqueducts").unwrap();
        let outline = fallback_outline(&topic);
        assert_eq!(
            titles(&outline),
            vec![
                "Chapter 1: Roman Aqueducts Overview",
                "Chapter 2: Deep Dive into Roman Aqueducts"
            ]
        );
    }
}
