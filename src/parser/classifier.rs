//! Fragment classification.
//!
//! Turns word-processor paragraphs (style name + text) and rendered text
//! lines into [`StructuralUnit`]s.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{RawParagraph, StructuralUnit};

use super::options::{NormalizeOptions, DEFAULT_HEADING_LEVEL};

static RE_MD_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*\S)").unwrap());
static RE_MD_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+•]\s+(\S.*)$").unwrap());
static RE_MD_NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,3})[.)]\s+(\S.*)$").unwrap());

/// Classifies raw fragments into structural units.
#[derive(Debug, Clone)]
pub struct Classifier {
    heading_level_default: u8,
}

impl Classifier {
    /// Create a classifier with the default heading level.
    pub fn new() -> Self {
        Self {
            heading_level_default: DEFAULT_HEADING_LEVEL,
        }
    }

    /// Create a classifier from normalization options.
    pub fn from_options(options: &NormalizeOptions) -> Self {
        Self {
            heading_level_default: options.heading_level_default.clamp(1, 6),
        }
    }

    /// Classify a word-processor paragraph.
    ///
    /// Fails with [`Error::Classification`] when the paragraph carries no
    /// text at all. An empty or whitespace-only text is a `Blank`.
    pub fn classify_paragraph(&self, para: &RawParagraph) -> Result<StructuralUnit> {
        let style = para.style_name();
        let text = para.text.as_deref().ok_or_else(|| {
            Error::Classification(format!("paragraph with style '{}' has no text", style))
        })?;
        let text = text.trim();

        if text.is_empty() {
            return Ok(StructuralUnit::Blank);
        }

        if is_heading_style(style) {
            return Ok(StructuralUnit::heading(self.heading_level(style), text));
        }

        if is_list_style(style) {
            return Ok(StructuralUnit::list_item(is_numbered_style(style), text));
        }

        if let Some(cells) = split_pipe_row(text) {
            return Ok(StructuralUnit::TableRow { cells });
        }

        Ok(StructuralUnit::plain(text))
    }

    /// Classify one line of rendered text (OCR path).
    pub fn classify_line(&self, line: &str) -> StructuralUnit {
        let line = line.trim();

        if line.is_empty() {
            return StructuralUnit::Blank;
        }

        if let Some(cells) = split_pipe_row(line) {
            return StructuralUnit::TableRow { cells };
        }

        if let Some(caps) = RE_MD_HEADING.captures(line) {
            let level = caps[1].len() as u8;
            return StructuralUnit::heading(level, caps[2].trim());
        }

        if let Some(caps) = RE_MD_BULLET.captures(line) {
            return StructuralUnit::list_item(false, caps[1].trim());
        }

        if let Some(caps) = RE_MD_NUMBERED.captures(line) {
            if let Ok(number) = caps[1].parse::<u32>() {
                return StructuralUnit::numbered_item(number, caps[2].trim());
            }
        }

        StructuralUnit::plain(line)
    }

    /// Heading level from the trailing numeral of a style name.
    ///
    /// Missing, non-numeric or out-of-range numerals give the configured
    /// default level.
    pub fn heading_level(&self, style: &str) -> u8 {
        let style = style.trim_end();
        let digits_start = style
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i);

        match digits_start.and_then(|i| style[i..].parse::<u32>().ok()) {
            Some(level @ 1..=6) => level as u8,
            _ => self.heading_level_default,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn is_heading_style(style: &str) -> bool {
    let lower = style.trim_start().to_lowercase();
    lower.starts_with("heading") || lower.starts_with("标题")
}

fn is_list_style(style: &str) -> bool {
    style.to_lowercase().contains("list")
}

fn is_numbered_style(style: &str) -> bool {
    style.to_lowercase().contains("number")
}

/// Check if a line has the pipe-delimited table row shape.
pub fn is_pipe_row(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 2 && line.starts_with('|') && line.ends_with('|')
}

/// Split a pipe-delimited row into trimmed cells.
///
/// Returns `None` when the line does not begin and end with a pipe. The
/// empty pieces before the first and after the last pipe are discarded.
/// An escaped pipe (`\|`) stays inside its cell as `|`.
pub fn split_pipe_row(line: &str) -> Option<Vec<String>> {
    if !is_pipe_row(line) {
        return None;
    }
    let line = line.trim();
    let inner = &line[1..line.len() - 1];

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    Some(cells)
}

/// Escape pipes in a cell so it renders inside a single column.
pub fn escape_pipes(cell: &str) -> String {
    cell.replace('|', r"\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading_level(unit: &StructuralUnit) -> u8 {
        match unit {
            StructuralUnit::Heading { level, .. } => *level,
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn test_heading_styles() {
        let classifier = Classifier::new();
        let unit = classifier
            .classify_paragraph(&RawParagraph::new("Heading 1", " 简介 "))
            .unwrap();
        assert_eq!(unit, StructuralUnit::heading(1, "简介"));

        let unit = classifier
            .classify_paragraph(&RawParagraph::new("Heading 3", "x"))
            .unwrap();
        assert_eq!(heading_level(&unit), 3);
    }

    #[test]
    fn test_heading_level_fallbacks() {
        let classifier = Classifier::new();
        assert_eq!(classifier.heading_level("Heading"), 2);
        assert_eq!(classifier.heading_level("Heading Custom"), 2);
        assert_eq!(classifier.heading_level("Heading 0"), 2);
        assert_eq!(classifier.heading_level("Heading 9"), 2);
        assert_eq!(classifier.heading_level("Heading 12"), 2);
        assert_eq!(classifier.heading_level("Heading6"), 6);
        assert_eq!(classifier.heading_level("Heading 99999999999999999999"), 2);
    }

    #[test]
    fn test_heading_level_default_from_options() {
        let options = NormalizeOptions::new().with_heading_level_default(4);
        let classifier = Classifier::from_options(&options);
        assert_eq!(classifier.heading_level("Heading"), 4);
    }

    #[test]
    fn test_list_styles() {
        let classifier = Classifier::new();
        let unit = classifier
            .classify_paragraph(&RawParagraph::new("List Number", "first"))
            .unwrap();
        assert_eq!(unit, StructuralUnit::list_item(true, "first"));

        let unit = classifier
            .classify_paragraph(&RawParagraph::new("List Bullet", "item"))
            .unwrap();
        assert_eq!(unit, StructuralUnit::list_item(false, "item"));
    }

    #[test]
    fn test_missing_text_is_error() {
        let classifier = Classifier::new();
        let para = RawParagraph {
            style: Some("Normal".into()),
            text: None,
        };
        let result = classifier.classify_paragraph(&para);
        assert!(matches!(result, Err(Error::Classification(_))));
    }

    #[test]
    fn test_blank_paragraph() {
        let classifier = Classifier::new();
        let unit = classifier
            .classify_paragraph(&RawParagraph::new("Heading 1", "   "))
            .unwrap();
        assert_eq!(unit, StructuralUnit::Blank);
    }

    #[test]
    fn test_classify_lines() {
        let classifier = Classifier::new();
        assert_eq!(classifier.classify_line("## 方法"), StructuralUnit::heading(2, "方法"));
        assert_eq!(
            classifier.classify_line("####### too deep"),
            StructuralUnit::plain("####### too deep")
        );
        assert_eq!(classifier.classify_line("- a"), StructuralUnit::list_item(false, "a"));
        assert_eq!(classifier.classify_line("2. b"), StructuralUnit::numbered_item(2, "b"));
        assert_eq!(classifier.classify_line("10) c"), StructuralUnit::numbered_item(10, "c"));
        assert_eq!(classifier.classify_line("3.14 圆周率"), StructuralUnit::plain("3.14 圆周率"));
        assert_eq!(classifier.classify_line("  \t "), StructuralUnit::Blank);
        assert_eq!(
            classifier.classify_line("| A | B |"),
            StructuralUnit::table_row(["A", "B"])
        );
    }

    #[test]
    fn test_split_pipe_row() {
        assert_eq!(
            split_pipe_row("|  a | b  |"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(split_pipe_row("||"), Some(vec![String::new()]));
        assert_eq!(split_pipe_row("|"), None);
        assert_eq!(split_pipe_row("a | b"), None);
    }

    #[test]
    fn test_escaped_pipes_stay_in_cell() {
        assert_eq!(
            split_pipe_row(r"| x\|y | 2 |"),
            Some(vec!["x|y".to_string(), "2".to_string()])
        );
        assert_eq!(escape_pipes("x|y"), r"x\|y");

        let cells = vec![r"a\|b".to_string(), "c|d".to_string(), "e".to_string()];
        let row = format!(
            "| {} |",
            cells.iter().map(|c| escape_pipes(c)).collect::<Vec<_>>().join(" | ")
        );
        assert_eq!(split_pipe_row(&row), Some(cells));
    }

    #[test]
    fn test_year_prefix_is_not_a_list_marker() {
        let classifier = Classifier::new();
        assert_eq!(
            classifier.classify_line("2024. 年度总结"),
            StructuralUnit::plain("2024. 年度总结")
        );
        assert_eq!(
            classifier.classify_line("1999) 旧版"),
            StructuralUnit::plain("1999) 旧版")
        );
    }
}
