//! Text cleanup pipeline for copied text and assistant replies.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

fn filler_opener_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?i:okay|ok|alright|sure)\b[,\s:;\-]*").unwrap())
}

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Collapse blank lines and trim
    #[default]
    Minimal,
    /// Minimal + Unicode NFC, replacement-character removal, line-end trimming
    Standard,
    /// Standard + removal of a conversational opener ("Okay, ...")
    Reply,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Strip trailing whitespace from every line
    pub trim_line_ends: bool,

    /// Remove a leading "Okay", "Ok", "Alright" or "Sure"
    pub strip_filler_opener: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Reply => Self::reply(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: false,
            remove_replacement_char: false,
            trim_line_ends: false,
            strip_filler_opener: false,
            max_consecutive_newlines: 2,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: true,
            trim_line_ends: true,
            ..Self::minimal()
        }
    }

    /// Cleanup for generated replies.
    pub fn reply() -> Self {
        Self {
            strip_filler_opener: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::minimal()
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Get the pipeline options.
    pub fn options(&self) -> &CleanupOptions {
        &self.options
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.trim_line_ends {
            result = result
                .lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n");
        }

        if self.options.strip_filler_opener {
            result = filler_opener_regex()
                .replace(result.trim_start(), "")
                .into_owned();
        }

        if self.options.max_consecutive_newlines > 0 {
            result = self.limit_newlines(&result);
        }

        result.trim().to_string()
    }

    fn limit_newlines(&self, text: &str) -> String {
        let max = self.options.max_consecutive_newlines as usize;
        let pattern = format!(r"\n{{{},}}", max + 1);
        let re = Regex::new(&pattern).unwrap();
        let replacement = "\n".repeat(max);
        re.replace_all(text, replacement.as_str()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_collapses_newlines() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        assert_eq!(pipeline.process("\n\na\n\n\n\nb\n\n"), "a\n\nb");
        assert_eq!(pipeline.process("a\nb"), "a\nb");
    }

    #[test]
    fn test_unicode_normalization() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        let result = pipeline.process("cafe\u{0301}");
        assert_eq!(result, "caf\u{e9}");
    }

    #[test]
    fn test_remove_replacement_char() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("Hello\u{FFFD}World"), "HelloWorld");
    }

    #[test]
    fn test_trim_line_ends() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("a  \n  b\t"), "a\n  b");
    }

    #[test]
    fn test_reply_strips_filler_opener() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Reply);
        assert_eq!(pipeline.process("  Okay, here it is."), "here it is.");
        assert_eq!(pipeline.process("sure: done"), "done");
        assert_eq!(pipeline.process("OK - fine\n\n\n\nnext"), "fine\n\nnext");
        assert_eq!(pipeline.process("Surely not"), "Surely not");
        assert_eq!(pipeline.process("Okay"), "");
    }

    #[test]
    fn test_standard_keeps_opener() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("Okay, here"), "Okay, here");
    }
}
