//! HTML rendering for chat messages.

use std::fmt::Write;

use crate::model::{Block, Document, InlineContent, List, Table, TableRow};

use super::inline::{escape_html, StyleState, HTML_MARKERS};
use super::{RenderOptions, RenderResult, RenderStats};

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> String {
    HtmlRenderer::new(options.clone()).render(doc)
}

/// HTML renderer.
///
/// Output is a flat fragment without whitespace between elements. Every
/// text node and attribute value is escaped.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to HTML.
    pub fn render(&self, doc: &Document) -> String {
        let mut output = String::new();
        for block in &doc.blocks {
            self.render_block(&mut output, block);
        }
        output
    }

    /// Render a document to HTML with statistics.
    pub fn render_with_stats(&self, doc: &Document) -> RenderResult {
        RenderResult::new(self.render(doc), RenderStats::from_document(doc))
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        match block {
            Block::Heading { level, content } => {
                let _ = write!(output, "<h{}>", level);
                self.render_inline(output, content);
                let _ = write!(output, "</h{}>", level);
            }
            Block::Paragraph { content } => {
                output.push_str("<p>");
                self.render_inline(output, content);
                output.push_str("</p>");
            }
            Block::List(list) => self.render_list(output, list),
            Block::Table(table) => self.render_table(output, table),
            Block::Rule => output.push_str("<hr>"),
        }
    }

    fn render_list(&self, output: &mut String, list: &List) {
        let tag = list.kind.tag();
        match list.start {
            Some(start) => {
                let _ = write!(output, "<{} start=\"{}\">", tag, start);
            }
            None => {
                let _ = write!(output, "<{}>", tag);
            }
        }

        for item in &list.items {
            output.push_str("<li>");
            self.render_inline(output, &item.content);
            for child in &item.children {
                self.render_list(output, child);
            }
            output.push_str("</li>");
        }

        let _ = write!(output, "</{}>", tag);
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        output.push_str("<table><thead>");
        self.render_row(output, &table.header, "th");
        output.push_str("</thead><tbody>");
        for row in &table.rows {
            self.render_row(output, row, "td");
        }
        output.push_str("</tbody></table>");
    }

    fn render_row(&self, output: &mut String, row: &TableRow, tag: &str) {
        output.push_str("<tr>");
        for cell in &row.cells {
            let _ = write!(output, "<{}>", tag);
            self.render_inline(output, &cell.content);
            let _ = write!(output, "</{}>", tag);
        }
        output.push_str("</tr>");
    }

    fn render_inline(&self, output: &mut String, content: &[InlineContent]) {
        let mut state = StyleState::new(HTML_MARKERS);

        for item in content {
            match item {
                InlineContent::Text(run) => state.write_run(output, run, false, escape_html),
                InlineContent::Link { content, url } => {
                    state.close(output);
                    self.open_link(output, url);
                    let mut inner = StyleState::new(HTML_MARKERS);
                    for run in content {
                        inner.write_run(output, run, false, escape_html);
                    }
                    inner.close(output);
                    output.push_str("</a>");
                }
                InlineContent::LineBreak => {
                    state.close(output);
                    output.push_str("<br>");
                }
            }
        }

        state.close(output);
    }

    fn open_link(&self, output: &mut String, url: &str) {
        output.push_str("<a href=\"");
        escape_html(url, output);
        output.push('"');
        if let Some(ref target) = self.options.link_target {
            output.push_str(" target=\"");
            escape_html(target, output);
            output.push('"');
        }
        if let Some(ref rel) = self.options.link_rel {
            output.push_str(" rel=\"");
            escape_html(rel, output);
            output.push('"');
        }
        output.push('>');
    }
}
