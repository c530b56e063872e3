//! Block-level types.

use super::{inline_text, InlineContent, List, Table};
use serde::{Deserialize, Serialize};

/// A content block of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (level 1-6)
    Heading {
        /// Heading level
        level: u8,
        /// Heading text
        content: Vec<InlineContent>,
    },

    /// A paragraph of text
    Paragraph {
        /// Paragraph text
        content: Vec<InlineContent>,
    },

    /// A (possibly nested) list
    List(List),

    /// A table
    Table(Table),

    /// A horizontal rule / separator
    Rule,
}

impl Block {
    /// Create a heading block, clamping the level to 1-6.
    pub fn heading(level: u8, content: Vec<InlineContent>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            content,
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(content: Vec<InlineContent>) -> Self {
        Block::Paragraph { content }
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph { .. })
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this block is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Block::List(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { content, .. } | Block::Paragraph { content } => inline_text(content),
            Block::List(list) => list_text(list),
            Block::Table(table) => table.plain_text(),
            Block::Rule => String::new(),
        }
    }
}

fn list_text(list: &List) -> String {
    let mut lines = Vec::new();
    for item in &list.items {
        lines.push(inline_text(&item.content));
        for child in &item.children {
            lines.push(list_text(child));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListItem, ListKind};

    #[test]
    fn test_block_variants() {
        let h = Block::heading(9, vec![InlineContent::text("Title")]);
        assert!(h.is_heading());
        assert!(matches!(h, Block::Heading { level: 6, .. }));
        assert!(!Block::Rule.is_paragraph());
    }

    #[test]
    fn test_list_plain_text() {
        let mut list = List::new(ListKind::Unordered);
        list.items.push(ListItem::text("one"));
        list.items.push(ListItem::text("two"));
        assert_eq!(Block::List(list).plain_text(), "one\ntwo");
    }
}
