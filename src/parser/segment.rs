//! Block segmentation.
//!
//! Text is split on blank lines and every block is classified in a fixed
//! order: rule, heading, table, then a line scan that separates list runs
//! from paragraph lines.

use std::sync::OnceLock;

use regex::Regex;

use super::inline::is_wrapped_emphasis;
use super::table::{split_table, RawTable};
use super::ParseOptions;
use crate::model::ListKind;

fn blank_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap())
}

fn rule_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(-{3,}|\*{3,}|_{3,})\s*$").unwrap())
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap())
}

fn ordered_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)(\d+)[.)]\s+(.+)$").unwrap())
}

fn bullet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)([-*+])\s+(.+)$").unwrap())
}

/// A classified block, before inline parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Rule,
    Heading { level: u8, text: String },
    Table(RawTable),
    ListRun(Vec<ListLine>),
    Paragraph(Vec<String>),
}

/// A single list line of a list run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListLine {
    pub kind: ListKind,
    pub level: usize,
    pub text: String,
}

/// Split message text into classified segments.
pub(crate) fn segment(text: &str, options: &ParseOptions) -> Vec<Segment> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    blank_line_regex()
        .split(&normalized)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .flat_map(|block| classify(block, options))
        .collect()
}

fn classify(block: &str, options: &ParseOptions) -> Vec<Segment> {
    if rule_regex().is_match(block) {
        return vec![Segment::Rule];
    }

    if let Some(caps) = heading_regex().captures(block) {
        return vec![Segment::Heading {
            level: caps[1].len() as u8,
            text: caps[2].trim().to_string(),
        }];
    }

    if options.tables {
        if let Some(table) = split_table(block) {
            log::debug!(
                "Table block: {} column(s), {} row(s)",
                table.header.len(),
                table.rows.len()
            );
            return vec![Segment::Table(table)];
        }
    }

    scan_lines(block, options)
}

fn scan_lines(block: &str, options: &ParseOptions) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run: Vec<ListLine> = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();

    for line in block.lines() {
        if let Some(item) = list_line(line, options.indent_width) {
            if !paragraph.is_empty() {
                segments.push(Segment::Paragraph(std::mem::take(&mut paragraph)));
            }
            run.push(item);
        } else {
            if !run.is_empty() {
                segments.push(Segment::ListRun(std::mem::take(&mut run)));
            }
            let line = line.trim();
            if !line.is_empty() {
                paragraph.push(line.to_string());
            }
        }
    }

    if !run.is_empty() {
        segments.push(Segment::ListRun(run));
    }
    if !paragraph.is_empty() {
        segments.push(Segment::Paragraph(paragraph));
    }
    segments
}

fn list_line(line: &str, indent_width: usize) -> Option<ListLine> {
    if let Some(caps) = ordered_regex().captures(line) {
        return Some(ListLine {
            kind: ListKind::Ordered,
            level: indent_level(&caps[1], indent_width),
            text: caps[3].trim().to_string(),
        });
    }

    let caps = bullet_regex().captures(line)?;
    if &caps[2] == "*" && is_wrapped_emphasis(line.trim(), '*') {
        return None;
    }
    Some(ListLine {
        kind: ListKind::Unordered,
        level: indent_level(&caps[1], indent_width),
        text: caps[3].trim().to_string(),
    })
}

fn indent_level(indent: &str, indent_width: usize) -> usize {
    let width = indent_width.max(1);
    let columns: usize = indent
        .chars()
        .map(|c| if c == '\t' { width } else { 1 })
        .sum();
    columns / width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str) -> Vec<Segment> {
        segment(text, &ParseOptions::default())
    }

    fn line(kind: ListKind, level: usize, text: &str) -> ListLine {
        ListLine {
            kind,
            level,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_rule_and_heading() {
        assert_eq!(seg("---"), vec![Segment::Rule]);
        assert_eq!(seg("***"), vec![Segment::Rule]);
        assert_eq!(
            seg("## Title"),
            vec![Segment::Heading {
                level: 2,
                text: "Title".to_string()
            }]
        );
        assert_eq!(
            seg("####### Seven"),
            vec![Segment::Paragraph(vec!["####### Seven".to_string()])]
        );
    }

    #[test]
    fn test_blank_lines_split_blocks() {
        let segments = seg("first\r\n\r\n  \nsecond\nline");
        assert_eq!(
            segments,
            vec![
                Segment::Paragraph(vec!["first".to_string()]),
                Segment::Paragraph(vec!["second".to_string(), "line".to_string()]),
            ]
        );
    }

    #[test]
    fn test_list_levels() {
        let segments = seg("- a\n    1. b\n\t- c\n        + d");
        assert_eq!(
            segments,
            vec![Segment::ListRun(vec![
                line(ListKind::Unordered, 0, "a"),
                line(ListKind::Ordered, 1, "b"),
                line(ListKind::Unordered, 1, "c"),
                line(ListKind::Unordered, 2, "d"),
            ])]
        );
    }

    #[test]
    fn test_list_and_paragraph_lines_flush() {
        let segments = seg("Intro:\n1) one\n2) two\nafter");
        assert_eq!(
            segments,
            vec![
                Segment::Paragraph(vec!["Intro:".to_string()]),
                Segment::ListRun(vec![
                    line(ListKind::Ordered, 0, "one"),
                    line(ListKind::Ordered, 0, "two"),
                ]),
                Segment::Paragraph(vec!["after".to_string()]),
            ]
        );
    }

    #[test]
    fn test_wrapped_emphasis_is_not_a_bullet() {
        assert_eq!(
            seg("* not a list *"),
            vec![Segment::Paragraph(vec!["* not a list *".to_string()])]
        );
        assert_eq!(
            seg("* item"),
            vec![Segment::ListRun(vec![line(ListKind::Unordered, 0, "item")])]
        );
    }

    #[test]
    fn test_table_detection() {
        let segments = seg("A | B\n--|--\n1 | 2");
        assert!(matches!(segments.as_slice(), [Segment::Table(_)]));

        let segments = seg("A | B\n1 | 2");
        assert!(matches!(segments.as_slice(), [Segment::Paragraph(_)]));
    }

    #[test]
    fn test_tables_disabled() {
        let options = ParseOptions::new().with_tables(false);
        let segments = segment("A | B\n--|--\n1 | 2", &options);
        assert!(matches!(segments.as_slice(), [Segment::Paragraph(_)]));
    }

    #[test]
    fn test_indent_width_option() {
        let options = ParseOptions::new().with_indent_width(2);
        let segments = segment("- a\n  - b", &options);
        assert_eq!(
            segments,
            vec![Segment::ListRun(vec![
                line(ListKind::Unordered, 0, "a"),
                line(ListKind::Unordered, 1, "b"),
            ])]
        );
    }
}
