//! Pulldown Renderer - 基于 pulldown-cmark 的 Markdown 渲染

use pulldown_cmark::{html, Options, Parser};

use crate::application::ports::MarkdownRendererPort;

/// CommonMark + 表格、脚注、删除线扩展
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownRenderer;

impl PulldownRenderer {
    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options
    }
}

impl MarkdownRendererPort for PulldownRenderer {
    fn render(&self, manuscript: &str) -> String {
        let parser = Parser::new_ext(manuscript, Self::options());
        let mut output = String::with_capacity(manuscript.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_headings_become_h2() {
        let html = PulldownRenderer.render("\n\n## Chapter 1: Origins\n\nRome needed water.\n");
        assert!(html.contains("<h2>Chapter 1: Origins</h2>"));
        assert!(html.contains("<p>Rome needed water.</p>"));
    }

    #[test]
    fn test_tables_enabled() {
        let html = PulldownRenderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_raw_angle_brackets_in_text_are_escaped() {
        let html = PulldownRenderer.render("5 < 6 & 7");
        assert!(html.contains("5 &lt; 6 &amp; 7"));
    }
}
