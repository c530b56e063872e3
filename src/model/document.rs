//! Document-level types.

use super::Block;
use serde::{Deserialize, Serialize};

/// A parsed message: the intermediate tree shared by every emitter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Blocks in reading order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InlineContent;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn test_document_plain_text_skips_rules() {
        let mut doc = Document::new();
        doc.add_block(Block::paragraph(vec![InlineContent::text("First")]));
        doc.add_block(Block::Rule);
        doc.add_block(Block::paragraph(vec![InlineContent::text("Second")]));
        assert_eq!(doc.plain_text(), "First\n\nSecond");
    }
}
