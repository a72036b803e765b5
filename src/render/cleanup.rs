//! Rule-based text cleanup.
//!
//! Two passes live here:
//!
//! 1. **OCR text normalization** ([`normalize_ocr_text`]) - whitespace
//!    collapsing plus removal of spaces that OCR engines insert around CJK
//!    text, CJK punctuation and digit/unit pairs.
//! 2. **Markdown tidy** ([`tidy_markdown`]) - the final pass over assembled
//!    output: at most one blank line in a row, single horizontal spaces,
//!    trimmed ends.
//!
//! Both are pure and idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Punctuation marks that never take surrounding whitespace.
const CJK_PUNCTUATION: &[char] = &[
    '，', '。', '；', '：', '！', '？', '、', '"', '“', '”', '＂', '｡', '､',
];

/// Unit symbols that attach directly to a preceding number.
const UNIT_SYMBOLS: &[&str] = &[
    "%", "％", "°", "℃", "℉", "万", "千", "百", "十", "亿", "元", "米", "公里", "公斤", "吨",
];

static RE_EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_HORIZONTAL_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Normalize one line of OCR text.
///
/// Whitespace runs collapse to a single space and the ends are trimmed.
/// A remaining space is removed when it
/// - touches a CJK punctuation mark,
/// - sits between CJK characters, or between a CJK character and a digit,
/// - separates a digit from a following unit symbol.
///
/// ```
/// use docnorm::render::normalize_ocr_text;
///
/// assert_eq!(normalize_ocr_text("数值 为 100 %"), "数值为100%");
/// ```
pub fn normalize_ocr_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let collapsed = composed.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = collapsed.chars().collect();

    let mut out = String::with_capacity(collapsed.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let prev = i.checked_sub(1).and_then(|j| chars.get(j)).copied();
            if let Some(prev) = prev {
                if is_removable_space(prev, &chars[i + 1..]) {
                    continue;
                }
            }
        }
        out.push(c);
    }
    // Dropping a space can bring a combining mark next to its base.
    out.nfc().collect()
}

fn is_removable_space(prev: char, rest: &[char]) -> bool {
    let Some(&next) = rest.first() else {
        return false;
    };

    if is_cjk_punctuation(prev) || is_cjk_punctuation(next) {
        return true;
    }

    let prev_cjk = is_cjk(prev);
    let next_cjk = is_cjk(next);
    if (prev_cjk && (next_cjk || next.is_ascii_digit())) || (prev.is_ascii_digit() && next_cjk) {
        return true;
    }

    prev.is_ascii_digit() && starts_with_unit(rest)
}

fn starts_with_unit(rest: &[char]) -> bool {
    UNIT_SYMBOLS.iter().any(|unit| {
        let len = unit.chars().count();
        rest.len() >= len && unit.chars().zip(rest).all(|(a, &b)| a == b)
    })
}

fn is_cjk_punctuation(c: char) -> bool {
    CJK_PUNCTUATION.contains(&c)
}

/// Check if a character is a CJK ideograph, kana, CJK symbol or a
/// full-width form.
pub fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x3000..=0x303F     // CJK symbols and punctuation
        | 0x3040..=0x30FF   // Hiragana, Katakana
        | 0x3400..=0x4DBF   // Extension A
        | 0x4E00..=0x9FFF   // Unified ideographs
        | 0xF900..=0xFAFF   // Compatibility ideographs
        | 0xFF00..=0xFFEF   // Half/full-width forms
        | 0x20000..=0x2FA1F // Extensions B-F, compatibility supplement
    )
}

/// Final tidy pass over assembled Markdown.
///
/// Normalizes line endings, collapses 3+ newlines to exactly two and runs
/// of spaces/tabs to one space, then trims the whole document.
pub fn tidy_markdown(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = RE_EXCESS_NEWLINES.replace_all(&unified, "\n\n");
    let spaced = RE_HORIZONTAL_RUN.replace_all(&collapsed, " ");
    spaced.trim().to_string()
}
