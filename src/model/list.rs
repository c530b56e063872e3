//! List types.

use super::InlineContent;
use serde::{Deserialize, Serialize};

/// Kind of list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Numbered list (`1.` / `1)`)
    Ordered,
    /// Bulleted list (`-`, `*`, `+`)
    Unordered,
}

impl ListKind {
    /// HTML tag name for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }

    /// Check if this is an ordered list.
    pub fn is_ordered(self) -> bool {
        matches!(self, ListKind::Ordered)
    }
}

/// A nested list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Ordered or unordered
    pub kind: ListKind,

    /// Explicit start number when numbering continues from an earlier list
    pub start: Option<u32>,

    /// Items in the list
    pub items: Vec<ListItem>,
}

impl List {
    /// Create an empty list.
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            start: None,
            items: Vec::new(),
        }
    }

    /// Create an ordered list continuing at `start`.
    pub fn continuing(start: u32) -> Self {
        Self {
            kind: ListKind::Ordered,
            start: Some(start),
            items: Vec::new(),
        }
    }

    /// The number of the first item (1 unless continuing).
    pub fn first_number(&self) -> u32 {
        self.start.unwrap_or(1)
    }

    /// Total number of items including nested lists.
    pub fn total_items(&self) -> usize {
        self.items
            .iter()
            .map(|item| 1 + item.children.iter().map(List::total_items).sum::<usize>())
            .sum()
    }

    /// Maximum nesting depth (1 for a flat list).
    pub fn depth(&self) -> usize {
        1 + self
            .items
            .iter()
            .flat_map(|item| &item.children)
            .map(List::depth)
            .max()
            .unwrap_or(0)
    }
}

/// An item of a nested list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Inline content of the item
    pub content: Vec<InlineContent>,

    /// Lists nested under this item
    pub children: Vec<List>,
}

impl ListItem {
    /// Create an item with content and no children.
    pub fn new(content: Vec<InlineContent>) -> Self {
        Self {
            content,
            children: Vec::new(),
        }
    }

    /// Create an item with plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![InlineContent::text(text)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_counts() {
        let mut inner = List::new(ListKind::Ordered);
        inner.items.push(ListItem::text("b"));
        inner.items.push(ListItem::text("c"));

        let mut outer = List::new(ListKind::Unordered);
        let mut first = ListItem::text("a");
        first.children.push(inner);
        outer.items.push(first);
        outer.items.push(ListItem::text("d"));

        assert_eq!(outer.total_items(), 4);
        assert_eq!(outer.depth(), 2);
    }

    #[test]
    fn test_first_number() {
        assert_eq!(List::new(ListKind::Ordered).first_number(), 1);
        assert_eq!(List::continuing(4).first_number(), 4);
    }
}
