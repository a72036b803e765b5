//! Markdown assembly of structural units.

use crate::model::StructuralUnit;
use crate::parser::{escape_pipes, ListNumbering, NormalizeOptions};

use super::cleanup::tidy_markdown;
use super::ContentStats;

/// Output of the assembler.
#[derive(Debug, Clone, Default)]
pub struct Assembled {
    /// Rendered blocks, each with its trailing spacing
    pub blocks: Vec<String>,
    /// Tidied Markdown
    pub markdown: String,
    /// Counts gathered while rendering
    pub stats: ContentStats,
}

/// Which multi-line block is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenBlock {
    List,
    Table,
}

/// Renders units into Markdown blocks.
///
/// Headings, paragraphs and images each form one block ending in a blank
/// line. Consecutive list items and consecutive table rows are gathered
/// into one block that is closed by a blank line as soon as a different
/// kind of unit arrives.
pub struct MarkdownAssembler {
    numbering: ListNumbering,
    image_alt: String,
    blocks: Vec<String>,
    current: String,
    open: Option<OpenBlock>,
    ordinal: usize,
    stats: ContentStats,
}

impl MarkdownAssembler {
    /// Create a new assembler.
    pub fn new(options: &NormalizeOptions) -> Self {
        Self {
            numbering: options.list_numbering,
            image_alt: options.image_alt.clone(),
            blocks: Vec::new(),
            current: String::new(),
            open: None,
            ordinal: 0,
            stats: ContentStats::new(),
        }
    }

    /// Render one unit.
    pub fn push(&mut self, unit: &StructuralUnit) {
        if !matches!(unit, StructuralUnit::ListItem { ordered: true, .. }) {
            self.ordinal = 0;
        }

        match unit {
            StructuralUnit::Heading { level, text } => {
                self.close_block();
                self.stats.add_heading();
                let level = (*level).clamp(1, 6) as usize;
                self.blocks
                    .push(format!("{} {}\n\n", "#".repeat(level), text));
            }
            StructuralUnit::ListItem {
                ordered,
                number,
                text,
            } => {
                self.open_block(OpenBlock::List);
                self.stats.add_list_item();
                let marker = self.list_marker(*ordered, *number);
                self.current.push_str(&marker);
                self.current.push_str(text);
                self.current.push('\n');
            }
            StructuralUnit::TableRow { cells } => {
                self.open_block(OpenBlock::Table);
                self.current.push_str("| ");
                let cells: Vec<String> = cells.iter().map(|c| escape_pipes(c)).collect();
                self.current.push_str(&cells.join(" | "));
                self.current.push_str(" |\n");
            }
            StructuralUnit::PlainText { text } => {
                self.close_block();
                if text.trim().is_empty() {
                    return;
                }
                self.stats.add_paragraph();
                self.blocks.push(format!("{}\n\n", text));
            }
            StructuralUnit::Blank => self.close_block(),
        }
    }

    /// Append an image reference.
    pub fn push_image(&mut self, path: &str) {
        self.close_block();
        self.stats.add_image();
        self.blocks
            .push(format!("![{}]({})\n\n", self.image_alt, path));
    }

    /// Close any open block and run the tidy pass.
    pub fn finish(mut self) -> Assembled {
        self.close_block();
        let markdown = tidy_markdown(&self.blocks.concat());
        self.stats.count_text(&markdown);

        log::debug!(
            "assembled {} blocks ({} headings, {} list items, {} paragraphs)",
            self.blocks.len(),
            self.stats.heading_count,
            self.stats.list_item_count,
            self.stats.paragraph_count
        );

        Assembled {
            blocks: self.blocks,
            markdown,
            stats: self.stats,
        }
    }

    /// Marker for a list item. A number written in the source is kept as
    /// is; style-numbered items follow the configured numbering.
    fn list_marker(&mut self, ordered: bool, number: Option<u32>) -> String {
        if !ordered {
            return "- ".to_string();
        }
        if let Some(number) = number {
            self.ordinal = number as usize;
            return format!("{}. ", number);
        }
        match self.numbering {
            ListNumbering::Literal => "1. ".to_string(),
            ListNumbering::Sequential => {
                self.ordinal += 1;
                format!("{}. ", self.ordinal)
            }
        }
    }

    fn open_block(&mut self, kind: OpenBlock) {
        if self.open != Some(kind) {
            self.close_block();
            self.open = Some(kind);
        }
    }

    fn close_block(&mut self) {
        if self.open.take().is_some() && !self.current.is_empty() {
            self.current.push('\n');
            self.blocks.push(std::mem::take(&mut self.current));
        }
    }
}

/// Assemble units and trailing image references into Markdown.
pub fn assemble<'a>(
    units: &[StructuralUnit],
    images: impl IntoIterator<Item = &'a str>,
    options: &NormalizeOptions,
) -> Assembled {
    let mut assembler = MarkdownAssembler::new(options);
    for unit in units {
        assembler.push(unit);
    }
    for path in images {
        assembler.push_image(path);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(units: &[StructuralUnit]) -> String {
        assemble(units, [], &NormalizeOptions::default()).markdown
    }

    #[test]
    fn test_render_heading_and_paragraph() {
        let markdown = render(&[
            StructuralUnit::heading(1, "简介"),
            StructuralUnit::plain("正文"),
        ]);
        assert_eq!(markdown, "# 简介\n\n正文");
    }

    #[test]
    fn test_list_items_are_contiguous() {
        let markdown = render(&[
            StructuralUnit::plain("前言"),
            StructuralUnit::list_item(false, "a"),
            StructuralUnit::list_item(false, "b"),
            StructuralUnit::list_item(true, "c"),
            StructuralUnit::list_item(true, "d"),
            StructuralUnit::plain("后记"),
        ]);
        assert_eq!(markdown, "前言\n\n- a\n- b\n1. c\n1. d\n\n后记");
    }

    #[test]
    fn test_sequential_numbering() {
        let options = NormalizeOptions::new().with_list_numbering(ListNumbering::Sequential);
        let units = [
            StructuralUnit::list_item(true, "a"),
            StructuralUnit::list_item(true, "b"),
            StructuralUnit::list_item(false, "x"),
            StructuralUnit::list_item(true, "c"),
            StructuralUnit::Blank,
            StructuralUnit::list_item(true, "d"),
        ];
        let markdown = assemble(&units, [], &options).markdown;
        assert_eq!(markdown, "1. a\n2. b\n- x\n1. c\n\n1. d");
    }

    #[test]
    fn test_source_numbers_are_kept() {
        let units = [
            StructuralUnit::numbered_item(3, "付款方式"),
            StructuralUnit::numbered_item(4, "违约责任"),
        ];
        assert_eq!(render(&units), "3. 付款方式\n4. 违约责任");

        let options = NormalizeOptions::new().with_list_numbering(ListNumbering::Sequential);
        let units = [
            StructuralUnit::numbered_item(3, "a"),
            StructuralUnit::list_item(true, "b"),
        ];
        assert_eq!(assemble(&units, [], &options).markdown, "3. a\n4. b");
    }

    #[test]
    fn test_pipes_in_cells_are_escaped() {
        let markdown = render(&[
            StructuralUnit::table_row(["A", "B"]),
            StructuralUnit::table_row(["x|y", "2"]),
        ]);
        assert_eq!(markdown, "| A | B |\n| x\\|y | 2 |");
    }

    #[test]
    fn test_table_block_followed_by_blank_line() {
        let markdown = render(&[
            StructuralUnit::table_row(["A", "B"]),
            StructuralUnit::table_row(["1", "2"]),
            StructuralUnit::plain("说明"),
        ]);
        assert_eq!(markdown, "| A | B |\n| 1 | 2 |\n\n说明");
    }

    #[test]
    fn test_images_appended_after_body() {
        let units = [StructuralUnit::plain("正文")];
        let assembled = assemble(
            &units,
            ["images/a.png", "images/b.png"],
            &NormalizeOptions::default(),
        );
        assert_eq!(
            assembled.markdown,
            "正文\n\n![图片](images/a.png)\n\n![图片](images/b.png)"
        );
        assert_eq!(assembled.stats.image_count, 2);
    }

    #[test]
    fn test_blanks_never_triple() {
        let units = vec![
            StructuralUnit::plain("a"),
            StructuralUnit::Blank,
            StructuralUnit::Blank,
            StructuralUnit::Blank,
            StructuralUnit::Blank,
            StructuralUnit::Blank,
            StructuralUnit::plain("b"),
        ];
        let markdown = render(&units);
        assert_eq!(markdown, "a\n\nb");
    }

    #[test]
    fn test_heading_hashes_stay_in_range() {
        for level in 0..=10u8 {
            let unit = StructuralUnit::Heading {
                level,
                text: "t".into(),
            };
            let markdown = render(&[unit]);
            let hashes = markdown.chars().take_while(|&c| c == '#').count();
            assert!((1..=6).contains(&hashes), "level {} gave {}", level, hashes);
        }
    }

    #[test]
    fn test_stats() {
        let assembled = assemble(
            &[
                StructuralUnit::heading(2, "标题"),
                StructuralUnit::list_item(false, "a"),
                StructuralUnit::plain("段落"),
            ],
            [],
            &NormalizeOptions::default(),
        );
        assert_eq!(assembled.stats.heading_count, 1);
        assert_eq!(assembled.stats.list_item_count, 1);
        assert_eq!(assembled.stats.paragraph_count, 1);
        assert_eq!(assembled.blocks.len(), 3);
    }
}
