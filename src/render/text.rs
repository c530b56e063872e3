//! Readable plain-text reconstruction ("copy as plain text").

use super::reconstruct::{Flavor, Reconstructor};
use super::RenderOptions;
use crate::model::Document;

/// Convert a document to readable plain text.
///
/// Style markers are dropped, bullets become `•`, links are written as
/// `text (url)` and table cells are joined with ` | `.
pub fn to_text(doc: &Document, options: &RenderOptions) -> String {
    Reconstructor::new(options, Flavor::Readable).render(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn text(input: &str) -> String {
        to_text(&parse(input), &RenderOptions::default())
    }

    #[test]
    fn test_to_text() {
        assert_eq!(
            text("# Title\n\nSome **bold** and `code`."),
            "Title\n\nSome bold and code."
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(text("- a\n    1. b\n    2. c\n- d"), "• a\n  1. b\n  2. c\n• d");
    }

    #[test]
    fn test_links_and_tables() {
        assert_eq!(
            text("See [docs](https://x.io)\n\nA | B\n--|--\n1 | 2"),
            "See docs (https://x.io)\n\nA | B\n1 | 2"
        );
    }
}
