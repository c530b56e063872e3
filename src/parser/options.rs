//! Parsing options and configuration.

/// Options for parsing Markdown messages.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Keep single line breaks inside paragraphs instead of folding them into spaces
    pub preserve_line_breaks: bool,

    /// Columns of indentation per list nesting level
    pub indent_width: usize,

    /// Recognise pipe tables
    pub tables: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable line break preservation.
    pub fn with_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Set the indentation width per list level (minimum 1).
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width.max(1);
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, tables: bool) -> Self {
        self.tables = tables;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            preserve_line_breaks: false,
            indent_width: 4,
            tables: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .with_line_breaks(true)
            .with_indent_width(0)
            .with_tables(false);

        assert!(options.preserve_line_breaks);
        assert_eq!(options.indent_width, 1);
        assert!(!options.tables);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert!(!options.preserve_line_breaks);
        assert_eq!(options.indent_width, 4);
        assert!(options.tables);
    }
}
