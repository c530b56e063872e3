//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Options for rendering a parsed message.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// `target` attribute for links in HTML output (None = omit)
    pub link_target: Option<String>,

    /// `rel` attribute for links in HTML output (None = omit)
    pub link_rel: Option<String>,

    /// Spaces of indentation per nesting level in copied lists
    pub list_indent: usize,

    /// Marker for unordered items in Markdown output
    pub list_marker: char,

    /// Marker for unordered items in readable text
    pub bullet: char,

    /// Final cleanup applied to text output
    pub cleanup: CleanupOptions,

    /// Collect render statistics
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link target attribute.
    pub fn with_link_target(mut self, target: Option<&str>) -> Self {
        self.link_target = target.map(str::to_string);
        self
    }

    /// Set the link rel attribute.
    pub fn with_link_rel(mut self, rel: Option<&str>) -> Self {
        self.link_rel = rel.map(str::to_string);
        self
    }

    /// Set the indentation per list level.
    pub fn with_list_indent(mut self, indent: usize) -> Self {
        self.list_indent = indent;
        self
    }

    /// Set the Markdown list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set the readable-text bullet character.
    pub fn with_bullet(mut self, bullet: char) -> Self {
        self.bullet = bullet;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = CleanupOptions::from_preset(preset);
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            link_target: Some("_blank".to_string()),
            link_rel: Some("noopener".to_string()),
            list_indent: 2,
            list_marker: '-',
            bullet: '•',
            cleanup: CleanupOptions::minimal(),
            collect_stats: false,
        }
    }
}
