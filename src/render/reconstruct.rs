//! Tree walk shared by the Markdown, readable-text and speech emitters.

use std::fmt::Write;

use crate::model::{Block, Document, InlineContent, List, ListKind, Table, TableRow};

use super::inline::{verbatim, Markers, StyleState, MARKDOWN_MARKERS, PLAIN_MARKERS};
use super::{CleanupOptions, CleanupPipeline, RenderOptions};

/// Which text variant to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flavor {
    /// Re-parseable Markdown ("copy as markdown")
    Markdown,
    /// Human-readable text with bullets ("copy as plain text")
    Readable,
    /// Symbol-free text for speech synthesis
    Speech,
}

#[derive(Debug, Clone, Copy)]
struct Context {
    inside_list_item: bool,
    depth: usize,
}

impl Context {
    const TOP: Context = Context {
        inside_list_item: false,
        depth: 0,
    };
}

pub(crate) struct Reconstructor<'a> {
    options: &'a RenderOptions,
    flavor: Flavor,
}

impl<'a> Reconstructor<'a> {
    pub fn new(options: &'a RenderOptions, flavor: Flavor) -> Self {
        Self { options, flavor }
    }

    pub fn render(&self, doc: &Document) -> String {
        let mut output = String::new();
        for block in &doc.blocks {
            self.render_block(&mut output, block, Context::TOP);
        }
        self.cleanup().process(&output)
    }

    fn cleanup(&self) -> CleanupPipeline {
        let options = match self.flavor {
            Flavor::Speech => CleanupOptions {
                trim_line_ends: true,
                ..self.options.cleanup.clone()
            },
            _ => self.options.cleanup.clone(),
        };
        CleanupPipeline::new(options)
    }

    fn markers(&self) -> Markers {
        match self.flavor {
            Flavor::Markdown => MARKDOWN_MARKERS,
            Flavor::Readable | Flavor::Speech => PLAIN_MARKERS,
        }
    }

    fn render_block(&self, output: &mut String, block: &Block, ctx: Context) {
        match block {
            Block::Heading { content, .. } => {
                output.push_str("\n\n");
                self.render_inline(output, content, ctx, self.flavor == Flavor::Markdown);
                output.push_str("\n\n");
            }
            Block::Paragraph { content } => {
                self.render_inline(output, content, ctx, false);
                if !ctx.inside_list_item {
                    output.push_str("\n\n");
                }
            }
            Block::List(list) => {
                self.render_list(output, list, ctx.depth);
                if ctx.depth == 0 {
                    output.push('\n');
                }
            }
            Block::Table(table) => {
                self.render_table(output, table);
                output.push('\n');
            }
            Block::Rule => match self.flavor {
                Flavor::Speech => output.push_str(" \n\n"),
                _ => output.push_str("\n\n"),
            },
        }
    }

    fn render_list(&self, output: &mut String, list: &List, depth: usize) {
        let indent = match self.flavor {
            Flavor::Speech => String::new(),
            _ => " ".repeat(self.options.list_indent * depth),
        };
        let mut number = list.first_number();

        for item in &list.items {
            if !item.content.is_empty() {
                let marker = self.item_marker(list.kind, number);
                output.push_str(&indent);
                output.push_str(&marker);
                let item_ctx = Context {
                    inside_list_item: true,
                    depth,
                };
                self.render_inline(output, &item.content, item_ctx, false);
                output.push('\n');
            }
            if list.kind.is_ordered() {
                number += 1;
            }
            for child in &item.children {
                self.render_list(output, child, depth + 1);
            }
        }
    }

    fn item_marker(&self, kind: ListKind, number: u32) -> String {
        match (self.flavor, kind) {
            (Flavor::Speech, _) => String::new(),
            (_, ListKind::Ordered) => format!("{}. ", number),
            (Flavor::Markdown, ListKind::Unordered) => format!("{} ", self.options.list_marker),
            (Flavor::Readable, ListKind::Unordered) => format!("{} ", self.options.bullet),
        }
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        match self.flavor {
            Flavor::Markdown => {
                self.render_pipe_row(output, &table.header);
                output.push('|');
                for _ in 0..table.column_count().max(1) {
                    output.push_str(" --- |");
                }
                output.push('\n');
                for row in &table.rows {
                    self.render_pipe_row(output, row);
                }
            }
            Flavor::Readable => {
                for row in std::iter::once(&table.header).chain(&table.rows) {
                    self.render_joined_row(output, row, " | ");
                }
            }
            Flavor::Speech => {
                for row in std::iter::once(&table.header).chain(&table.rows) {
                    self.render_joined_row(output, row, ", ");
                }
            }
        }
    }

    fn render_pipe_row(&self, output: &mut String, row: &TableRow) {
        output.push('|');
        for cell in &row.cells {
            output.push(' ');
            self.render_inline(output, &cell.content, Context::TOP, false);
            output.push_str(" |");
        }
        output.push('\n');
    }

    fn render_joined_row(&self, output: &mut String, row: &TableRow, separator: &str) {
        for (i, cell) in row.cells.iter().enumerate() {
            if i > 0 {
                output.push_str(separator);
            }
            self.render_inline(output, &cell.content, Context::TOP, false);
        }
        output.push('\n');
    }

    fn render_inline(
        &self,
        output: &mut String,
        content: &[InlineContent],
        ctx: Context,
        force_bold: bool,
    ) {
        let mut state = StyleState::new(self.markers());

        for item in content {
            match item {
                InlineContent::Text(run) => state.write_run(output, run, force_bold, verbatim),
                InlineContent::Link { content, url } => {
                    state.close(output);
                    if self.flavor == Flavor::Markdown {
                        output.push('[');
                    }
                    let mut inner = StyleState::new(self.markers());
                    for run in content {
                        inner.write_run(output, run, force_bold, verbatim);
                    }
                    inner.close(output);
                    match self.flavor {
                        Flavor::Markdown => {
                            let _ = write!(output, "]({})", url);
                        }
                        Flavor::Readable => {
                            let _ = write!(output, " ({})", url);
                        }
                        Flavor::Speech => {}
                    }
                }
                InlineContent::LineBreak => {
                    state.close(output);
                    output.push('\n');
                    if ctx.inside_list_item && self.flavor != Flavor::Speech {
                        output.push_str(&" ".repeat(self.options.list_indent * (ctx.depth + 1)));
                    }
                }
            }
        }

        state.close(output);
    }
}
