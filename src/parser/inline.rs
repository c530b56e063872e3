//! Inline span processing.
//!
//! Spans are recognised by ordered passes over the text: code, strong
//! (`**` then `__`), emphasis (`*` then `_`) and finally links. Each pass
//! rewrites what it recognises into private-use sentinel characters so
//! that later passes never see the delimiters an earlier pass consumed.
//! A final tokeniser turns the marked string into styled runs.

use std::str::Chars;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::model::{InlineContent, TextRun, TextStyle};

const CODE_OPEN: char = '\u{E000}';
const CODE_CLOSE: char = '\u{E001}';
const STRONG_STAR_OPEN: char = '\u{E002}';
const STRONG_STAR_CLOSE: char = '\u{E003}';
const STRONG_UNDER_OPEN: char = '\u{E004}';
const STRONG_UNDER_CLOSE: char = '\u{E005}';
const EM_STAR_OPEN: char = '\u{E006}';
const EM_STAR_CLOSE: char = '\u{E007}';
const EM_UNDER_OPEN: char = '\u{E008}';
const EM_UNDER_CLOSE: char = '\u{E009}';
const LINK_OPEN: char = '\u{E00A}';
const LINK_TEXT: char = '\u{E00B}';
const LINK_CLOSE: char = '\u{E00C}';

fn is_sentinel(c: char) -> bool {
    (CODE_OPEN..=LINK_CLOSE).contains(&c)
}

fn code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").unwrap())
}

fn strong_star_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").unwrap())
}

fn strong_under_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"__(.+?)__").unwrap())
}

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap())
}

/// Parse the inline spans of a single line of text.
///
/// Never fails: anything that does not form a complete span stays literal.
pub fn parse_inline(text: &str) -> Vec<InlineContent> {
    let clean: String = text.chars().filter(|c| !is_sentinel(*c)).collect();
    if clean.is_empty() {
        return Vec::new();
    }

    let mut codes = Vec::new();
    let marked = mark_code(&clean, &mut codes);
    let marked = mark_strong(&marked);
    let marked = mark_emphasis(&marked, '*', EM_STAR_OPEN, EM_STAR_CLOSE);
    let marked = mark_emphasis(&marked, '_', EM_UNDER_OPEN, EM_UNDER_CLOSE);
    let mut urls = Vec::new();
    let marked = mark_links(&marked, &codes, &mut urls);

    Tokenizer::new(&codes, &urls).run(&marked)
}

fn mark_code(text: &str, codes: &mut Vec<String>) -> String {
    code_regex()
        .replace_all(text, |caps: &Captures| {
            codes.push(caps[1].to_string());
            format!("{}{}{}", CODE_OPEN, codes.len() - 1, CODE_CLOSE)
        })
        .into_owned()
}

fn mark_strong(text: &str) -> String {
    let text = strong_star_regex().replace_all(text, |caps: &Captures| {
        format!("{}{}{}", STRONG_STAR_OPEN, &caps[1], STRONG_STAR_CLOSE)
    });
    strong_under_regex()
        .replace_all(&text, |caps: &Captures| {
            format!("{}{}{}", STRONG_UNDER_OPEN, &caps[1], STRONG_UNDER_CLOSE)
        })
        .into_owned()
}

fn mark_links(text: &str, codes: &[String], urls: &mut Vec<String>) -> String {
    link_regex()
        .replace_all(text, |caps: &Captures| {
            urls.push(restore_markup(&caps[2], codes).trim().to_string());
            format!(
                "{}{}{}{}{}",
                LINK_OPEN,
                urls.len() - 1,
                LINK_TEXT,
                &caps[1],
                LINK_CLOSE
            )
        })
        .into_owned()
}

/// Check whether `text` is wholly wrapped in a single pair of `marker`
/// characters (`* not a list *`), allowing padding inside the pair.
pub(crate) fn is_wrapped_emphasis(text: &str, marker: char) -> bool {
    wrapped_interior(&text.chars().collect::<Vec<_>>(), marker).is_some()
}

fn wrapped_interior(chars: &[char], marker: char) -> Option<String> {
    if chars.len() < 3 || chars[0] != marker || chars[chars.len() - 1] != marker {
        return None;
    }
    let interior = &chars[1..chars.len() - 1];
    if interior.contains(&marker) || interior.iter().all(|c| c.is_whitespace()) {
        return None;
    }
    Some(interior.iter().collect::<String>().trim().to_string())
}

fn mark_emphasis(text: &str, marker: char, open: char, close: char) -> String {
    let chars: Vec<char> = text.chars().collect();

    if let Some(interior) = wrapped_interior(&chars, marker) {
        return format!("{}{}{}", open, interior, close);
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == marker && opens_emphasis(&chars, i, marker) {
            if let Some(j) = closing_emphasis(&chars, i, marker) {
                out.push(open);
                out.extend(&chars[i + 1..j]);
                out.push(close);
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn opens_emphasis(chars: &[char], i: usize, marker: char) -> bool {
    if i > 0 {
        let prev = chars[i - 1];
        if prev == marker {
            return false;
        }
        // intraword underscores (snake_case) stay literal
        if marker == '_' && prev.is_alphanumeric() {
            return false;
        }
    }
    match chars.get(i + 1) {
        Some(&next) => next != marker && !next.is_whitespace(),
        None => false,
    }
}

fn closing_emphasis(chars: &[char], open: usize, marker: char) -> Option<usize> {
    let j = (open + 1..chars.len()).find(|&k| chars[k] == marker || chars[k] == '\n')?;
    if chars[j] != marker || j == open + 1 || chars[j - 1].is_whitespace() {
        return None;
    }
    match chars.get(j + 1) {
        None => Some(j),
        Some(&next) if next != marker && !next.is_alphanumeric() => Some(j),
        _ => None,
    }
}

/// Turn sentinel markup back into the Markdown it replaced.
fn restore_markup(text: &str, codes: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            CODE_OPEN => {
                if let Some(code) = read_index(&mut chars, CODE_CLOSE).and_then(|i| codes.get(i)) {
                    out.push('`');
                    out.push_str(code);
                    out.push('`');
                }
            }
            STRONG_STAR_OPEN | STRONG_STAR_CLOSE => out.push_str("**"),
            STRONG_UNDER_OPEN | STRONG_UNDER_CLOSE => out.push_str("__"),
            EM_STAR_OPEN | EM_STAR_CLOSE => out.push('*'),
            EM_UNDER_OPEN | EM_UNDER_CLOSE => out.push('_'),
            _ => out.push(c),
        }
    }
    out
}

fn read_index(chars: &mut Chars<'_>, end: char) -> Option<usize> {
    let digits: String = chars.by_ref().take_while(|c| *c != end).collect();
    digits.parse().ok()
}

struct Tokenizer<'a> {
    codes: &'a [String],
    urls: &'a [String],
    out: Vec<InlineContent>,
    link: Option<(Option<usize>, Vec<TextRun>)>,
    buf: String,
    strong: u32,
    em: u32,
}

impl<'a> Tokenizer<'a> {
    fn new(codes: &'a [String], urls: &'a [String]) -> Self {
        Self {
            codes,
            urls,
            out: Vec::new(),
            link: None,
            buf: String::new(),
            strong: 0,
            em: 0,
        }
    }

    fn run(mut self, marked: &str) -> Vec<InlineContent> {
        let mut chars = marked.chars();
        while let Some(c) = chars.next() {
            match c {
                CODE_OPEN => {
                    self.flush();
                    let code = read_index(&mut chars, CODE_CLOSE).and_then(|i| self.codes.get(i));
                    if let Some(code) = code {
                        let style = TextStyle {
                            code: true,
                            ..self.style()
                        };
                        self.push_run(TextRun::styled(code.clone(), style));
                    }
                }
                STRONG_STAR_OPEN | STRONG_UNDER_OPEN => {
                    self.flush();
                    self.strong += 1;
                }
                STRONG_STAR_CLOSE | STRONG_UNDER_CLOSE => {
                    self.flush();
                    self.strong = self.strong.saturating_sub(1);
                }
                EM_STAR_OPEN | EM_UNDER_OPEN => {
                    self.flush();
                    self.em += 1;
                }
                EM_STAR_CLOSE | EM_UNDER_CLOSE => {
                    self.flush();
                    self.em = self.em.saturating_sub(1);
                }
                LINK_OPEN => {
                    self.flush();
                    let index = read_index(&mut chars, LINK_TEXT);
                    self.link = Some((index, Vec::new()));
                }
                LINK_CLOSE => {
                    self.flush();
                    self.finish_link();
                }
                _ => self.buf.push(c),
            }
        }
        self.flush();
        self.finish_link();
        self.out
    }

    fn style(&self) -> TextStyle {
        TextStyle {
            bold: self.strong > 0,
            italic: self.em > 0,
            code: false,
        }
    }

    fn flush(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buf);
        let style = self.style();
        if !style.italic {
            self.push_run(TextRun::styled(text, style));
            return;
        }

        // Italic runs never start or end with whitespace; the edges fall
        // back to the surrounding style.
        let outside = TextStyle {
            italic: false,
            ..style
        };
        let body = text.trim();
        let start = text.len() - text.trim_start().len();
        let end = start + body.len();
        if start > 0 {
            self.push_run(TextRun::styled(&text[..start], outside));
        }
        if !body.is_empty() {
            self.push_run(TextRun::styled(body, style));
        }
        if end < text.len() {
            self.push_run(TextRun::styled(&text[end..], outside));
        }
    }

    fn push_run(&mut self, run: TextRun) {
        if let Some((_, runs)) = self.link.as_mut() {
            if let Some(prev) = runs.last_mut() {
                if prev.style == run.style && !run.style.code {
                    prev.text.push_str(&run.text);
                    return;
                }
            }
            runs.push(run);
            return;
        }
        if let Some(InlineContent::Text(prev)) = self.out.last_mut() {
            if prev.style == run.style && !run.style.code {
                prev.text.push_str(&run.text);
                return;
            }
        }
        self.out.push(InlineContent::Text(run));
    }

    fn finish_link(&mut self) {
        if let Some((index, content)) = self.link.take() {
            let url = index
                .and_then(|i| self.urls.get(i))
                .cloned()
                .unwrap_or_default();
            self.out.push(InlineContent::Link { content, url });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(content: &[InlineContent]) -> Vec<(String, TextStyle)> {
        content
            .iter()
            .filter_map(|c| match c {
                InlineContent::Text(run) => Some((run.text.clone(), run.style)),
                _ => None,
            })
            .collect()
    }

    fn style(bold: bool, italic: bool, code: bool) -> TextStyle {
        TextStyle { bold, italic, code }
    }

    #[test]
    fn test_plain_text() {
        let content = parse_inline("Hello, world!");
        assert_eq!(content, vec![InlineContent::text("Hello, world!")]);
    }

    #[test]
    fn test_bold_and_italic() {
        let content = parse_inline("a **b** and *c* or __d__ _e_");
        assert_eq!(
            runs(&content),
            vec![
                ("a ".to_string(), style(false, false, false)),
                ("b".to_string(), style(true, false, false)),
                (" and ".to_string(), style(false, false, false)),
                ("c".to_string(), style(false, true, false)),
                (" or ".to_string(), style(false, false, false)),
                ("d".to_string(), style(true, false, false)),
                (" ".to_string(), style(false, false, false)),
                ("e".to_string(), style(false, true, false)),
            ]
        );
    }

    #[test]
    fn test_code_is_immune() {
        let content = parse_inline("use `**raw**` here");
        assert_eq!(
            runs(&content)[1],
            ("**raw**".to_string(), style(false, false, true))
        );
    }

    #[test]
    fn test_bold_spans_code() {
        let content = parse_inline("**run `cargo` now**");
        let r = runs(&content);
        assert_eq!(r[0], ("run ".to_string(), style(true, false, false)));
        assert_eq!(r[1], ("cargo".to_string(), style(true, false, true)));
        assert_eq!(r[2], (" now".to_string(), style(true, false, false)));
    }

    #[test]
    fn test_wrapped_emphasis() {
        let content = parse_inline("* not a list *");
        assert_eq!(
            runs(&content),
            vec![("not a list".to_string(), style(false, true, false))]
        );
    }

    #[test]
    fn test_spaced_asterisks_stay_literal() {
        let content = parse_inline("2 * 3 * 4");
        assert_eq!(content, vec![InlineContent::text("2 * 3 * 4")]);
    }

    #[test]
    fn test_intraword_underscore_literal() {
        let content = parse_inline("call snake_case_name now");
        assert_eq!(content, vec![InlineContent::text("call snake_case_name now")]);
    }

    #[test]
    fn test_unclosed_markers_literal() {
        let content = parse_inline("**bold without end and *half");
        assert_eq!(
            content,
            vec![InlineContent::text("**bold without end and *half")]
        );
    }

    #[test]
    fn test_link() {
        let content = parse_inline("see [docs](https://example.com/a_b_c) now");
        assert_eq!(content.len(), 3);
        assert_eq!(
            content[1],
            InlineContent::link("docs", "https://example.com/a_b_c")
        );
    }

    #[test]
    fn test_link_url_keeps_underscored_segment() {
        let content = parse_inline("[x](https://example.com/_draft_/)");
        assert_eq!(
            content,
            vec![InlineContent::link("x", "https://example.com/_draft_/")]
        );
    }

    #[test]
    fn test_bold_link() {
        let content = parse_inline("**[docs](https://example.com)**");
        match &content[0] {
            InlineContent::Link { content, url } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(content[0], TextRun::bold("docs"));
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn test_italic_edges_exclude_whitespace() {
        let content = parse_inline("*see [docs](https://x.io)*");
        assert_eq!(
            content[..2],
            [
                InlineContent::Text(TextRun::italic("see")),
                InlineContent::text(" "),
            ]
        );
        match &content[2] {
            InlineContent::Link { content, .. } => {
                assert_eq!(content, &vec![TextRun::italic("docs")]);
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn test_intraword_star_emphasis() {
        let content = parse_inline("word*it* here");
        assert_eq!(
            runs(&content),
            vec![
                ("word".to_string(), style(false, false, false)),
                ("it".to_string(), style(false, true, false)),
                (" here".to_string(), style(false, false, false)),
            ]
        );
    }

    #[test]
    fn test_malformed_link_literal() {
        let content = parse_inline("[docs](https://example.com");
        assert_eq!(content, vec![InlineContent::text("[docs](https://example.com")]);
    }

    #[test]
    fn test_sentinels_in_input_are_dropped() {
        let content = parse_inline("a\u{E002}b");
        assert_eq!(content, vec![InlineContent::text("ab")]);
    }

    #[test]
    fn test_is_wrapped_emphasis() {
        assert!(is_wrapped_emphasis("* not a list *", '*'));
        assert!(!is_wrapped_emphasis("* item", '*'));
        assert!(!is_wrapped_emphasis("* **bold**", '*'));
        assert!(!is_wrapped_emphasis("*  *", '*'));
    }
}
