//! Idempotence and spacing tests for the cleanup passes.

use docnorm::{normalize_ocr_text, tidy_markdown};

/// Tricky inputs: mixed scripts, units, punctuation, odd whitespace.
const CORPUS: &[&str] = &[
    "",
    " ",
    "数值 为 100 %",
    "数值  为\t100\u{3000}%",
    "温度 - 5 ℃ 到 30 ℉",
    "价格 ： 30 元 ， 约 5 万 。",
    "“ 你好 ” ， 他 说",
    "\" 引号 \" 测试",
    "Version 2 . 0 is out , see docs",
    "A 1 B 2 C",
    "全角　空格　测试",
    "１２３ ４５６",
    "e\u{301} accent",
    "12 公 里 和 3 公斤",
    "- 列表 项",
    "| 表 | 格 |",
    "# 标题 一",
    "a\n\n\n\n\nb",
    "\r\n\r\n\r\n行",
    "x  \t  y",
    "   leading and trailing   ",
    "100 % 完成 ！ ！",
    "日本語 の テキスト",
    "한국어 텍스트 100 %",
];

#[test]
fn test_ocr_normalize_is_idempotent() {
    for input in CORPUS {
        let once = normalize_ocr_text(input);
        let twice = normalize_ocr_text(&once);
        assert_eq!(once, twice, "not idempotent for {:?}", input);
    }
}

#[test]
fn test_tidy_is_idempotent() {
    for input in CORPUS {
        let once = tidy_markdown(input);
        let twice = tidy_markdown(&once);
        assert_eq!(once, twice, "not idempotent for {:?}", input);
        assert!(!once.contains("\n\n\n"), "triple newline for {:?}", input);
    }
}

#[test]
fn test_combined_passes_are_stable() {
    for input in CORPUS {
        let once = tidy_markdown(&normalize_ocr_text(input));
        let twice = tidy_markdown(&normalize_ocr_text(&once));
        assert_eq!(once, twice, "unstable for {:?}", input);
    }
}

#[test]
fn test_digit_unit_spacing() {
    assert_eq!(normalize_ocr_text("数值 为 100 %"), "数值为100%");
    assert_eq!(normalize_ocr_text("降温 5 °"), "降温5°");
    assert_eq!(normalize_ocr_text("共 3 亿 元"), "共3亿元");
    assert_eq!(normalize_ocr_text("上涨 12 %"), "上涨12%");
}

#[test]
fn test_five_blank_lines_become_one() {
    assert_eq!(tidy_markdown("段落一\n\n\n\n\n\n段落二"), "段落一\n\n段落二");
}

#[test]
fn test_whitespace_collapses_to_single_space() {
    assert_eq!(normalize_ocr_text("hello \t\n  world"), "hello world");
    assert_eq!(normalize_ocr_text("  "), "");
}
