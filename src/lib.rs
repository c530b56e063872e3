//! # chatmark
//!
//! Markdown rendering, clipboard reconstruction and conversation core for
//! voice chat clients.
//!
//! A reply is parsed once into a [`Document`]. HTML for display, Markdown
//! and readable text for the clipboard, and speech text for the
//! synthesizer are all emitted from that same tree, so copying a message
//! never re-parses rendered HTML.
//!
//! ## Quick Start
//!
//! ```
//! use chatmark::{render_to_html, to_readable_text};
//!
//! let reply = "Steps:\n\n1. Mix\n2. **Bake**";
//! let html = render_to_html(reply);
//! assert!(html.contains("<ol><li>Mix</li><li><strong>Bake</strong></li></ol>"));
//!
//! let text = to_readable_text(reply);
//! assert_eq!(text, "Steps:\n\n1. Mix\n2. Bake");
//! ```
//!
//! ## Features
//!
//! - **Sequential numbering**: ordered lists interrupted by prose keep counting
//! - **Nested lists**: indentation drives nesting, mixed kinds per level
//! - **Tables**: pipe tables with a header separator row
//! - **Copy formats**: Markdown, readable text and speech text
//! - **Chat core**: validation, bounded history and prompt assembly
//! - **Parallel processing**: Uses Rayon for batch rendering

pub mod chat;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod speech;

// Re-export commonly used types
pub use chat::{
    ChatMessage, ChatOptions, ChatReply, ChatService, ConversationStore, GenerateError,
    Generator, InMemoryStore, Role,
};
pub use error::{Error, Result};
pub use model::{
    Block, Document, InlineContent, List, ListItem, ListKind, Table, TableCell, TableRow, TextRun,
    TextStyle,
};
pub use parser::{ListCounters, MarkdownParser, ParseOptions};
pub use render::{
    CleanupOptions, CleanupPreset, JsonFormat, RenderOptions, RenderResult, RenderStats,
};
pub use speech::{select_voice, SpeechConfig, Voice};

use rayon::prelude::*;

/// Render a Markdown message to HTML with default options.
///
/// # Example
///
/// ```
/// use chatmark::render_to_html;
///
/// let html = render_to_html("1. a\n\nsome text\n\n2. b");
/// assert!(html.contains("<ol start=\"2\">"));
/// ```
pub fn render_to_html(markdown: &str) -> String {
    render::to_html(&parser::parse(markdown), &RenderOptions::default())
}

/// Convert a Markdown message to clean Markdown for the clipboard.
///
/// Headings become bold lines and numbering is made explicit.
///
/// # Example
///
/// ```
/// use chatmark::to_markdown;
///
/// assert_eq!(to_markdown("# Title\n\nBody"), "**Title**\n\nBody");
/// ```
pub fn to_markdown(markdown: &str) -> String {
    render::to_markdown(&parser::parse(markdown), &RenderOptions::default())
}

/// Convert a Markdown message to human-readable plain text.
///
/// # Example
///
/// ```
/// use chatmark::to_readable_text;
///
/// let text = to_readable_text("- see [docs](https://example.com)");
/// assert_eq!(text, "• see docs (https://example.com)");
/// ```
pub fn to_readable_text(markdown: &str) -> String {
    render::to_text(&parser::parse(markdown), &RenderOptions::default())
}

/// Convert a Markdown message to text suitable for a speech synthesizer.
pub fn to_speech_text(markdown: &str) -> String {
    render::to_speech_text(&parser::parse(markdown), &RenderOptions::default())
}

/// Convert a Markdown message to its document tree as JSON.
///
/// # Example
///
/// ```
/// use chatmark::{to_json, JsonFormat};
///
/// let json = to_json("Hello", JsonFormat::Compact).unwrap();
/// assert!(json.contains("Hello"));
/// ```
pub fn to_json(markdown: &str, format: JsonFormat) -> Result<String> {
    render::to_json(&parser::parse(markdown), format)
}

/// Render many messages to HTML in parallel.
///
/// Each message gets its own list counters; output order matches input.
pub fn render_batch<S: AsRef<str> + Sync>(messages: &[S]) -> Vec<String> {
    let options = RenderOptions::default();
    messages
        .par_iter()
        .map(|message| render::to_html(&parser::parse(message.as_ref()), &options))
        .collect()
}

/// Builder for rendering messages with custom options.
///
/// # Example
///
/// ```
/// use chatmark::Chatmark;
///
/// let message = Chatmark::new()
///     .with_line_breaks()
///     .with_list_indent(4)
///     .without_link_target()
///     .render("line one\nline two");
///
/// assert_eq!(message.html(), "<p>line one<br>line two</p>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Chatmark {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Chatmark {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep single line breaks inside paragraphs.
    pub fn with_line_breaks(mut self) -> Self {
        self.parse_options = self.parse_options.with_line_breaks(true);
        self
    }

    /// Set the columns of indentation per nesting level when parsing.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.parse_options = self.parse_options.with_indent_width(width);
        self
    }

    /// Disable table detection.
    pub fn without_tables(mut self) -> Self {
        self.parse_options = self.parse_options.with_tables(false);
        self
    }

    /// Set the spaces of indentation per level in copied lists.
    pub fn with_list_indent(mut self, indent: usize) -> Self {
        self.render_options = self.render_options.with_list_indent(indent);
        self
    }

    /// Omit the `target` attribute from links.
    pub fn without_link_target(mut self) -> Self {
        self.render_options = self.render_options.with_link_target(None);
        self
    }

    /// Set cleanup preset for text output.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Parse options in use.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// Render options in use.
    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Parse and render a message.
    pub fn render(&self, markdown: &str) -> RenderedMessage {
        let document = MarkdownParser::new(self.parse_options.clone()).parse(markdown);
        RenderedMessage::from_parts(markdown, document, self.render_options.clone())
    }
}

/// A rendered chat message.
///
/// Keeps the original Markdown and the parsed tree next to the HTML so
/// copy output is produced without reading the HTML back.
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    source: String,
    html: String,
    document: Document,
    render_options: RenderOptions,
}

impl RenderedMessage {
    /// Render a message with default options.
    pub fn from_markdown(markdown: &str) -> Self {
        Chatmark::default().render(markdown)
    }

    fn from_parts(source: &str, document: Document, render_options: RenderOptions) -> Self {
        let html = render::to_html(&document, &render_options);
        log::debug!(
            "Rendered {} block(s) into {} bytes of HTML",
            document.block_count(),
            html.len()
        );
        Self {
            source: source.to_string(),
            html,
            document,
            render_options,
        }
    }

    /// The HTML for display.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The original Markdown, verbatim.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed document tree.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Clean Markdown for the clipboard.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Human-readable plain text for the clipboard.
    pub fn to_readable_text(&self) -> String {
        render::to_text(&self.document, &self.render_options)
    }

    /// Text for the speech synthesizer.
    pub fn to_speech_text(&self) -> String {
        render::to_speech_text(&self.document, &self.render_options)
    }

    /// The document tree as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Statistics for the parsed document.
    pub fn stats(&self) -> RenderStats {
        RenderStats::from_document(&self.document)
    }
}
