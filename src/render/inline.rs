//! Style marker bookkeeping shared by the emitters.
//!
//! Bold always wraps italic. A run whose bold flag differs from the open
//! state closes italic first so markers never interleave.
//!
//! Markdown emphasis only parses back when its markers hug text, so the
//! Markdown markers keep whitespace outside italic spans and switch to
//! `*` when a span starts inside a word.

use crate::model::TextRun;

/// Opening and closing markers for each style.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Markers {
    pub bold: (&'static str, &'static str),
    pub italic: (&'static str, &'static str),
    pub code: (&'static str, &'static str),
    /// Italic markers for a span that starts right after a letter or digit
    pub italic_intraword: (&'static str, &'static str),
    /// Keep leading and trailing whitespace outside italic markers
    pub hoist_whitespace: bool,
}

pub(crate) const HTML_MARKERS: Markers = Markers {
    bold: ("<strong>", "</strong>"),
    italic: ("<em>", "</em>"),
    code: ("<code>", "</code>"),
    italic_intraword: ("<em>", "</em>"),
    hoist_whitespace: false,
};

pub(crate) const MARKDOWN_MARKERS: Markers = Markers {
    bold: ("**", "**"),
    italic: ("_", "_"),
    code: ("`", "`"),
    italic_intraword: ("*", "*"),
    hoist_whitespace: true,
};

pub(crate) const PLAIN_MARKERS: Markers = Markers {
    bold: ("", ""),
    italic: ("", ""),
    code: ("", ""),
    italic_intraword: ("", ""),
    hoist_whitespace: false,
};

/// Open bold/italic state while writing a sequence of runs.
#[derive(Debug)]
pub(crate) struct StyleState {
    markers: Markers,
    bold: bool,
    italic: bool,
    italic_close: &'static str,
    /// Whitespace held back until the open italic span is closed or continued
    pending: String,
}

impl StyleState {
    pub fn new(markers: Markers) -> Self {
        Self {
            markers,
            bold: false,
            italic: false,
            italic_close: markers.italic.1,
            pending: String::new(),
        }
    }

    /// Move from the open styles to `bold`/`italic`, writing markers.
    pub fn transition(&mut self, out: &mut String, bold: bool, italic: bool) {
        if self.italic && (!italic || self.bold != bold) {
            out.push_str(self.italic_close);
            self.italic = false;
        }
        out.push_str(&self.pending);
        self.pending.clear();
        if self.bold != bold {
            out.push_str(if bold {
                self.markers.bold.0
            } else {
                self.markers.bold.1
            });
            self.bold = bold;
        }
        if italic && !self.italic {
            let intraword = out.chars().next_back().is_some_and(char::is_alphanumeric);
            let (open, close) = if intraword {
                self.markers.italic_intraword
            } else {
                self.markers.italic
            };
            out.push_str(open);
            self.italic_close = close;
            self.italic = true;
        }
    }

    /// Close every open style.
    pub fn close(&mut self, out: &mut String) {
        self.transition(out, false, false);
    }

    /// Write one run. Code runs are atomic.
    pub fn write_run<F>(&mut self, out: &mut String, run: &TextRun, force_bold: bool, escape: F)
    where
        F: Fn(&str, &mut String),
    {
        let bold = run.style.bold || force_bold;
        let italic = run.style.italic;
        let mut text = run.text.as_str();

        if self.markers.hoist_whitespace && italic && !run.style.code {
            let opens = !self.italic || self.bold != bold;
            let trimmed = text.trim_start();
            if opens && trimmed.len() < text.len() {
                self.transition(out, bold, false);
                escape(&text[..text.len() - trimmed.len()], out);
                text = trimmed;
            }
            if opens && text.is_empty() {
                return;
            }
        }

        self.transition(out, bold, italic);
        if run.style.code {
            out.push_str(self.markers.code.0);
            escape(text, out);
            out.push_str(self.markers.code.1);
        } else {
            escape(text, out);
        }

        if self.markers.hoist_whitespace && self.italic {
            let kept = out.trim_end().len();
            self.pending.push_str(&out[kept..]);
            out.truncate(kept);
        }
    }
}

/// Escape text for HTML element content and attribute values.
pub(crate) fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Copy text unchanged.
pub(crate) fn verbatim(text: &str, out: &mut String) {
    out.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextStyle;

    fn write(runs: &[TextRun], markers: Markers) -> String {
        let mut out = String::new();
        let mut state = StyleState::new(markers);
        for run in runs {
            state.write_run(&mut out, run, false, verbatim);
        }
        state.close(&mut out);
        out
    }

    #[test]
    fn test_nested_markers() {
        let both = TextStyle {
            bold: true,
            italic: true,
            code: false,
        };
        let runs = [
            TextRun::bold("a "),
            TextRun::styled("b", both),
            TextRun::bold(" c"),
            TextRun::new(" d"),
        ];
        assert_eq!(
            write(&runs, HTML_MARKERS),
            "<strong>a <em>b</em> c</strong> d"
        );
        assert_eq!(write(&runs, MARKDOWN_MARKERS), "**a _b_ c** d");
    }

    #[test]
    fn test_italic_reopens_inside_bold() {
        let both = TextStyle {
            bold: true,
            italic: true,
            code: false,
        };
        let runs = [TextRun::italic("a"), TextRun::styled("b", both)];
        assert_eq!(write(&runs, MARKDOWN_MARKERS), "_a_**_b_**");
    }

    #[test]
    fn test_italic_whitespace_stays_outside_markers() {
        let runs = [
            TextRun::italic(" see "),
            TextRun::new("["),
        ];
        assert_eq!(write(&runs, MARKDOWN_MARKERS), " _see_ [");
        assert_eq!(write(&runs, HTML_MARKERS), "<em> see </em>[");

        let runs = [TextRun::italic("a "), TextRun::italic("b ")];
        assert_eq!(write(&runs, MARKDOWN_MARKERS), "_a b_ ");

        let runs = [TextRun::new("x"), TextRun::italic("  ")];
        assert_eq!(write(&runs, MARKDOWN_MARKERS), "x  ");
    }

    #[test]
    fn test_intraword_italic_uses_star() {
        let runs = [
            TextRun::new("word"),
            TextRun::italic("it"),
            TextRun::new(" here "),
            TextRun::italic("b"),
        ];
        assert_eq!(write(&runs, MARKDOWN_MARKERS), "word*it* here _b_");
        assert_eq!(write(&runs, HTML_MARKERS), "word<em>it</em> here <em>b</em>");
    }

    #[test]
    fn test_code_run() {
        let runs = [TextRun::new("run "), TextRun::code("ls")];
        assert_eq!(write(&runs, MARKDOWN_MARKERS), "run `ls`");
        assert_eq!(write(&runs, PLAIN_MARKERS), "run ls");
    }

    #[test]
    fn test_escape_html() {
        let mut out = String::new();
        escape_html("<a href=\"x\">Tom & Jerry's</a>", &mut out);
        assert_eq!(
            out,
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }
}
