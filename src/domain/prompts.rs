//! 提示词模板
//!
//! 三个阶段各一个提示词；系统提示词在所有调用中共用。

use super::book::{ChapterTitle, Topic};

/// 系统提示词
pub const SYSTEM_PROMPT: &str = "You are an expert author and editor.";

/// 第一阶段：生成大纲（要求只返回 JSON 字符串数组）
pub fn outline_prompt(topic: &Topic) -> String {
    format!(
        "Create a detailed book outline for the topic: '{topic}'. \
         Return ONLY a valid JSON list of strings, where each string is a chapter title. \
         Do not add markdown formatting or extra text. \
         Example format: [\"Chapter 1: Introduction\", \"Chapter 2: History\"]"
    )
}

/// 第二阶段：撰写单个章节正文
pub fn chapter_prompt(chapter: &ChapterTitle, topic: &Topic) -> String {
    format!(
        "Write a detailed set of paragraphs for the chapter: '{chapter}' \
         based on the main book topic: '{topic}'. \
         Provide rich, informative content. \
         Do not include the chapter title in the output, just the body text."
    )
}

/// 第三阶段：校对并转换为 RTF
pub fn proofread_prompt(manuscript: &str) -> String {
    format!(
        "Act as a professional editor and formatter. \
         1. Proofread the text below for grammar and flow. \
         2. Convert the entire text into valid RTF (Rich Text Format) code. \
         Ensure it has a header, appropriate font settings, and formatting for Chapters and Paragraphs. \
         Return ONLY the raw RTF code starting with {{\\rtf and ending with }}.\
         \n\nTEXT TO PROCESS:\n{manuscript}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_prompt_mentions_topic_and_json() {
        let prompt = outline_prompt(&Topic::new("Roman Aqueducts").unwrap());
        assert!(prompt.contains("'Roman Aqueducts'"));
        assert!(prompt.contains("JSON list of strings"));
    }

    #[test]
    fn test_chapter_prompt_mentions_both() {
        let prompt = chapter_prompt(
            &ChapterTitle::new("Chapter 1: Origins").unwrap(),
            &Topic::new("Roman Aqueducts").unwrap(),
        );
        assert!(prompt.contains("'Chapter 1: Origins'"));
        assert!(prompt.contains("'Roman Aqueducts'"));
    }

    #[test]
    fn test_proofread_prompt_embeds_manuscript() {
        let prompt = proofread_prompt("\n\n## A\n\nBody\n");
        assert!(prompt.contains("starting with {\\rtf and ending with }."));
        assert!(prompt.ends_with("TEXT TO PROCESS:\n\n\n## A\n\nBody\n"));
    }
}
