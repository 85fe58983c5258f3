use std::panic;

use pulldown_cmark::{html, Options, Parser};

use engine_logging::engine_warn;

/// Inputs above this size are refused instead of handed to the parser.
pub const DEFAULT_MAX_RENDER_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("document is {actual} bytes, above the {max_bytes} byte render limit")]
    TooLarge { max_bytes: usize, actual: usize },
    #[error("markdown converter panicked: {0}")]
    Panicked(String),
}

pub trait Renderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// GitHub-flavored Markdown to HTML via `pulldown-cmark`.
///
/// Tables, task lists, strikethrough and footnotes are on. Headings get no
/// generated ids, and a single newline stays a soft break rather than `<br>`.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    max_bytes: usize,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::with_max_bytes(DEFAULT_MAX_RENDER_BYTES)
    }
}

impl MarkdownRenderer {
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_FOOTNOTES
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        if markdown.len() > self.max_bytes {
            return Err(RenderError::TooLarge {
                max_bytes: self.max_bytes,
                actual: markdown.len(),
            });
        }

        panic::catch_unwind(|| {
            let parser = Parser::new_ext(markdown, Self::options());
            let mut out = String::with_capacity(markdown.len() * 3 / 2);
            html::push_html(&mut out, parser);
            out
        })
        .map_err(|payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            engine_warn!("Markdown converter panicked: {}", reason);
            RenderError::Panicked(reason)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        MarkdownRenderer::default().render(markdown).unwrap()
    }

    #[test]
    fn headings_have_no_generated_ids() {
        let html = render("# Intro\n\n## Intro\n");
        assert!(html.contains("<h1>Intro</h1>"));
        assert!(html.contains("<h2>Intro</h2>"));
        assert!(!html.contains("id="));
    }

    #[test]
    fn single_newline_is_not_a_line_break() {
        let html = render("first\nsecond\n");
        assert_eq!(html, "<p>first\nsecond</p>\n");
    }

    #[test]
    fn tables_are_rendered() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn task_lists_are_rendered() {
        let html = render("- [x] done\n- [ ] todo\n");
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("checked"));
    }

    #[test]
    fn oversized_input_is_refused() {
        let renderer = MarkdownRenderer::with_max_bytes(4);
        assert_eq!(
            renderer.render("# Hello"),
            Err(RenderError::TooLarge {
                max_bytes: 4,
                actual: 7
            })
        );
    }
}
