//! Rendering module for converting parsed messages to output formats.

mod cleanup;
mod html;
mod inline;
mod json;
mod markdown;
mod options;
mod reconstruct;
mod result;
mod speech;
mod text;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use html::{to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::{RenderResult, RenderStats};
pub use speech::to_speech_text;
pub use text::to_text;
