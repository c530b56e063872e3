//! Inline-level types: styled text runs, links and line breaks.

use serde::{Deserialize, Serialize};

/// Inline content within a heading, paragraph, list item or table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// A hyperlink
    Link {
        /// Link text as styled runs
        content: Vec<TextRun>,
        /// Link target
        url: String,
    },

    /// An explicit line break
    LineBreak,
}

impl InlineContent {
    /// Create a plain text item.
    pub fn text(text: impl Into<String>) -> Self {
        InlineContent::Text(TextRun::new(text))
    }

    /// Create a link whose text is a single unstyled run.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        InlineContent::Link {
            content: vec![TextRun::new(text)],
            url: url.into(),
        }
    }

    /// Plain text of this item, without any markup.
    pub fn plain_text(&self) -> String {
        match self {
            InlineContent::Text(run) => run.text.clone(),
            InlineContent::Link { content, .. } => runs_text(content),
            InlineContent::LineBreak => "\n".to_string(),
        }
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                italic: true,
                ..Default::default()
            },
        )
    }

    /// Create an inline code run.
    pub fn code(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                code: true,
                ..Default::default()
            },
        )
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    /// Strong emphasis
    pub bold: bool,

    /// Emphasis
    pub italic: bool,

    /// Inline code span
    pub code: bool,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.code
    }
}

/// Concatenate the text of a slice of runs.
pub fn runs_text(runs: &[TextRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

/// Concatenate the plain text of inline content.
pub fn inline_text(content: &[InlineContent]) -> String {
    content.iter().map(InlineContent::plain_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_plain_text() {
        let content = vec![
            InlineContent::text("See "),
            InlineContent::Text(TextRun::bold("the")),
            InlineContent::text(" "),
            InlineContent::link("docs", "https://example.com"),
        ];
        assert_eq!(inline_text(&content), "See the docs");
    }

    #[test]
    fn test_text_style() {
        assert!(!TextStyle::default().has_styling());
        assert!(TextRun::code("x").style.has_styling());
        assert!(TextRun::italic("x").style.italic);
    }
}
