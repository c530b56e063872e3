//! Rendering result with statistics.

use crate::model::{Block, Document, List};
use serde::{Deserialize, Serialize};

/// Result of rendering a message, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (HTML, Markdown, text)
    pub content: String,

    /// Render statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: RenderStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics about a rendered message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of lists, nested lists included
    pub list_count: u32,

    /// Number of list items, carrier items excluded
    pub list_item_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of horizontal rules
    pub rule_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the blocks of a document and the words of its plain text.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for block in &doc.blocks {
            match block {
                Block::Heading { .. } => stats.heading_count += 1,
                Block::Paragraph { .. } => stats.paragraph_count += 1,
                Block::List(list) => stats.add_list(list),
                Block::Table(_) => stats.table_count += 1,
                Block::Rule => stats.rule_count += 1,
            }
        }
        stats.count_text(&doc.plain_text());
        stats
    }

    fn add_list(&mut self, list: &List) {
        self.list_count += 1;
        for item in &list.items {
            if !item.content.is_empty() {
                self.list_item_count += 1;
            }
            for child in &item.children {
                self.add_list(child);
            }
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.rule_count += other.rule_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
