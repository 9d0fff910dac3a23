//! 代码围栏清理
//!
//! 模型经常把整段输出包在 ```` ```rtf ... ``` ```` 里，下载前需要去掉。

const FENCE: &str = "```";

#[inline]
fn is_language_tag_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '+' | '-')
}

/// 去掉所有三反引号围栏标记（连同紧跟的语言标签），再去掉首尾空白
///
/// 反复清理直到文本中不再出现三反引号，因此对结果再次调用不会产生变化。
pub fn strip_code_fences(text: &str) -> String {
    let mut current = text.to_string();

    while current.contains(FENCE) {
        let mut cleaned = String::with_capacity(current.len());
        let mut rest = current.as_str();

        while let Some(pos) = rest.find(FENCE) {
            cleaned.push_str(&rest[..pos]);
            let after_fence = &rest[pos + FENCE.len()..];
            let tag_len = after_fence
                .find(|c: char| !is_language_tag_char(c))
                .unwrap_or(after_fence.len());
            rest = &after_fence[tag_len..];
        }
        cleaned.push_str(rest);

        current = cleaned;
    }

    current.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tagged_fence() {
        let text = "```rtf\n{\\rtf1\\ansi Hello}\n```";
        assert_eq!(strip_code_fences(text), "{\\rtf1\\ansi Hello}");
    }

    #[test]
    fn test_strips_untagged_fence() {
        assert_eq!(strip_code_fences("```\n{\\rtf1 x}\n```\n"), "{\\rtf1 x}");
    }

    #[test]
    fn test_clean_text_only_trimmed() {
        assert_eq!(strip_code_fences("  {\\rtf1 clean}\n"), "{\\rtf1 clean}");
    }

    #[test]
    fn test_rtf_control_words_survive() {
        // `{` 不是语言标签字符，RTF 头不会被误删
        assert_eq!(strip_code_fences("```{\\rtf1 x}```"), "{\\rtf1 x}");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "```rtf\n{\\rtf1 a}\n```",
            "`` ```rtf `",
            "`````````",
            "````rtf\nbody\n````",
            "plain",
            "",
        ];
        for sample in samples {
            let once = strip_code_fences(sample);
            assert!(!once.contains(FENCE), "fence left in {:?}", once);
            assert_eq!(strip_code_fences(&once), once);
        }
    }
}
