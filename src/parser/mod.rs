//! Markdown parsing module.
//!
//! Turns a chat message into a [`Document`]. Parsing is total: any input
//! produces a document, with unrecognised syntax kept as literal text.

mod inline;
mod list;
mod options;
mod segment;
mod table;

pub use inline::parse_inline;
pub use list::ListCounters;
pub use options::ParseOptions;

use crate::model::{Block, Document, InlineContent};
use list::{build_lists, ListEntry};
use segment::{segment, Segment};

/// Markdown parser for chat messages.
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: ParseOptions,
}

impl MarkdownParser {
    /// Create a parser with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse one message. List numbering starts fresh.
    pub fn parse(&self, text: &str) -> Document {
        let mut counters = ListCounters::new();
        self.parse_with_counters(text, &mut counters)
    }

    /// Parse one message, continuing list numbering from `counters`.
    pub fn parse_with_counters(&self, text: &str, counters: &mut ListCounters) -> Document {
        let mut doc = Document::new();

        for segment in segment(text, &self.options) {
            match segment {
                Segment::Rule => doc.add_block(Block::Rule),
                Segment::Heading { level, text } => {
                    doc.add_block(Block::heading(level, parse_inline(&text)));
                }
                Segment::Table(raw) => doc.add_block(Block::Table(raw.build())),
                Segment::ListRun(lines) => {
                    let entries = lines
                        .into_iter()
                        .map(|line| ListEntry {
                            kind: line.kind,
                            level: line.level,
                            content: parse_inline(&line.text),
                        })
                        .collect();
                    for list in build_lists(entries, counters) {
                        doc.add_block(Block::List(list));
                    }
                }
                Segment::Paragraph(lines) => {
                    doc.add_block(Block::paragraph(self.paragraph_content(&lines)));
                }
            }
        }

        log::debug!("Parsed message into {} block(s)", doc.block_count());
        doc
    }

    fn paragraph_content(&self, lines: &[String]) -> Vec<InlineContent> {
        if !self.options.preserve_line_breaks {
            return parse_inline(&lines.join(" "));
        }

        let mut content = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                content.push(InlineContent::LineBreak);
            }
            content.extend(parse_inline(line));
        }
        content
    }
}

/// Parse a message with default options.
pub fn parse(text: &str) -> Document {
    MarkdownParser::default().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListKind, TextRun};

    #[test]
    fn test_parse_mixed_blocks() {
        let doc = parse("# Title\n\nSome **bold** text\n\n- a\n- b\n\n---");
        assert_eq!(doc.block_count(), 4);
        assert!(doc.blocks[0].is_heading());
        assert!(doc.blocks[1].is_paragraph());
        assert!(doc.blocks[2].is_list());
        assert_eq!(doc.blocks[3], Block::Rule);
    }

    #[test]
    fn test_paragraph_lines_fold() {
        let doc = parse("one\ntwo");
        assert_eq!(
            doc.blocks[0],
            Block::paragraph(vec![InlineContent::text("one two")])
        );
    }

    #[test]
    fn test_preserve_line_breaks() {
        let parser = MarkdownParser::new(ParseOptions::new().with_line_breaks(true));
        let doc = parser.parse("one\n*two*");
        assert_eq!(
            doc.blocks[0],
            Block::paragraph(vec![
                InlineContent::text("one"),
                InlineContent::LineBreak,
                InlineContent::Text(TextRun::italic("two")),
            ])
        );
    }

    #[test]
    fn test_numbering_continues_across_paragraph() {
        let doc = parse("1. a\n\nsome text\n\n2. b");
        match (&doc.blocks[0], &doc.blocks[2]) {
            (Block::List(first), Block::List(second)) => {
                assert_eq!(first.kind, ListKind::Ordered);
                assert_eq!(first.start, None);
                assert_eq!(second.start, Some(2));
            }
            other => panic!("unexpected blocks: {:?}", other),
        }
    }

    #[test]
    fn test_parse_with_shared_counters() {
        let parser = MarkdownParser::default();
        let mut counters = ListCounters::new();
        parser.parse_with_counters("1. a\n2. b", &mut counters);
        let doc = parser.parse_with_counters("1. c", &mut counters);
        match &doc.blocks[0] {
            Block::List(list) => assert_eq!(list.start, Some(3)),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("  \n\n  ").is_empty());
    }
}
