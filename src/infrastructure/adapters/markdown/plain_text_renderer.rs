//! Plain Text Renderer - 不解析 Markdown，转义后放进 <pre>

use crate::application::ports::MarkdownRendererPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

/// HTML 转义（& < > " '）
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

impl MarkdownRendererPort for PlainTextRenderer {
    fn render(&self, manuscript: &str) -> String {
        format!("<pre>{}</pre>", escape_html(manuscript))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_in_pre() {
        assert_eq!(PlainTextRenderer.render("## A\n"), "<pre>## A\n</pre>");
    }

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            PlainTextRenderer.render("<b>\"Tom\" & 'Jerry'</b>"),
            "<pre>&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;</pre>"
        );
    }
}
