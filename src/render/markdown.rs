//! Markdown reconstruction ("copy as markdown").
//!
//! Walks the parsed tree, never the emitted HTML. Headings come out as bold
//! text, rules as a blank line, and italic always uses the underscore form.

use super::reconstruct::{Flavor, Reconstructor};
use super::{RenderOptions, RenderResult, RenderStats};
use crate::model::Document;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> RenderResult {
    MarkdownRenderer::new(options.clone()).render_with_stats(doc)
}

/// Markdown renderer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> String {
        Reconstructor::new(&self.options, Flavor::Markdown).render(doc)
    }

    /// Render a document to Markdown with statistics.
    pub fn render_with_stats(&self, doc: &Document) -> RenderResult {
        let content = self.render(doc);
        let stats = if self.options.collect_stats {
            RenderStats::from_document(doc)
        } else {
            RenderStats::default()
        };
        RenderResult::new(content, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn md(text: &str) -> String {
        to_markdown(&parse(text), &RenderOptions::default())
    }

    #[test]
    fn test_heading_becomes_bold() {
        assert_eq!(md("# Title\n\nHello **world**"), "**Title**\n\nHello **world**");
    }

    #[test]
    fn test_inline_markers() {
        assert_eq!(
            md("*it* and `code` and [docs](https://x.io)"),
            "_it_ and `code` and [docs](https://x.io)"
        );
    }

    #[test]
    fn test_nested_list_indent() {
        assert_eq!(md("- a\n    1. b\n- c"), "- a\n  1. b\n- c");
    }

    #[test]
    fn test_ordered_start_is_kept() {
        assert_eq!(
            md("1. a\n\nsome text\n\n2. b"),
            "1. a\n\nsome text\n\n2. b"
        );
    }

    #[test]
    fn test_rule_is_dropped() {
        assert_eq!(md("a\n\n---\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_table() {
        assert_eq!(
            md("A | B\n--|--\n1 | 2"),
            "| A | B |\n| --- | --- |\n| 1 | 2 |"
        );
    }

    #[test]
    fn test_custom_marker() {
        let options = RenderOptions::new().with_list_marker('*');
        assert_eq!(to_markdown(&parse("- a\n- b"), &options), "* a\n* b");
    }

    #[test]
    fn test_with_stats() {
        let options = RenderOptions::new().with_stats(true);
        let result = to_markdown_with_stats(&parse("- a\n- b"), &options);
        assert_eq!(result.content, "- a\n- b");
        assert_eq!(result.stats.list_item_count, 2);
    }
}
