//! Spoken-text rendering.

use super::reconstruct::{Flavor, Reconstructor};
use super::RenderOptions;
use crate::model::Document;

/// Convert a document to text suitable for speech synthesis.
///
/// No Markdown symbols, bullets or list numbers survive; links are reduced
/// to their text and table cells are read as a comma-separated row.
pub fn to_speech_text(doc: &Document, options: &RenderOptions) -> String {
    Reconstructor::new(options, Flavor::Speech).render(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn speech(input: &str) -> String {
        to_speech_text(&parse(input), &RenderOptions::default())
    }

    #[test]
    fn test_strips_symbols() {
        assert_eq!(
            speech("# Hi\n\n**Bold** and [link](https://x.io)\n\n- a\n- b\n\n---\n\n1. x"),
            "Hi\n\nBold and link\n\na\nb\n\nx"
        );
    }

    #[test]
    fn test_table_rows() {
        assert_eq!(speech("A | B\n--|--\n1 | 2"), "A, B\n1, 2");
    }
}
