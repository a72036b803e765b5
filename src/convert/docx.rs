//! Word-processor document normalization.

use crate::error::Result;
use crate::model::{DocxDocument, DocxElement, StructuralUnit, TableGrid};
use crate::parser::{table_from_grid, Classifier, Coalescer, ErrorMode, NormalizeOptions};
use crate::render::{assemble, NormalizedDocument};

/// Normalizes word-processor paragraphs and tables.
#[derive(Debug, Clone)]
pub struct DocxNormalizer<'a> {
    options: &'a NormalizeOptions,
    classifier: Classifier,
}

impl<'a> DocxNormalizer<'a> {
    /// Create a normalizer bound to the given options.
    pub fn new(options: &'a NormalizeOptions) -> Self {
        Self {
            options,
            classifier: Classifier::from_options(options),
        }
    }

    /// Run one document through classification, coalescing and assembly.
    ///
    /// A paragraph without text aborts the document with a classification
    /// error unless the options are lenient.
    pub fn normalize(&self, doc: &DocxDocument) -> Result<NormalizedDocument> {
        let mut units = Vec::new();
        let mut coalescer = Coalescer::new(self.options.short_text_threshold);
        let mut tables = Vec::new();

        if self.options.title_heading && doc.metadata.has_title() {
            units.push(StructuralUnit::heading(1, doc.metadata.title.trim()));
        }

        for element in &doc.elements {
            match element {
                DocxElement::Paragraph(para) => match self.classifier.classify_paragraph(para) {
                    Ok(unit) => coalescer.push(unit, &mut units),
                    Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                        log::warn!("skipping paragraph: {}", e);
                    }
                    Err(e) => return Err(e),
                },
                DocxElement::Table(grid) => {
                    for unit in table_units(grid) {
                        coalescer.push(unit, &mut units);
                    }
                    tables.extend(table_from_grid(grid));
                }
            }
        }
        coalescer.finish(&mut units);

        log::debug!(
            "docx: {} elements -> {} units, {} tables",
            doc.elements.len(),
            units.len(),
            tables.len()
        );

        let assembled = assemble(&units, doc.images.iter().map(String::as_str), self.options);
        Ok(NormalizedDocument::new(
            assembled.blocks,
            assembled.markdown,
            tables,
            doc.metadata.clone(),
            assembled.stats,
        ))
    }
}

/// Pipe rows for a table grid, opened and closed by a blank so the grid
/// never shares a block with neighbouring pipe-shaped paragraphs.
fn table_units(grid: &TableGrid) -> Vec<StructuralUnit> {
    if grid.is_empty() {
        log::warn!("table grid has no rows");
        return Vec::new();
    }

    let mut units = vec![StructuralUnit::Blank];
    units.extend(
        grid.rows
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| StructuralUnit::table_row(row.iter().map(|cell| clean_cell(cell)))),
    );
    units.push(StructuralUnit::Blank);
    units
}

fn clean_cell(cell: &str) -> String {
    cell.replace(['\r', '\n'], " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{MetadataKey, RawParagraph};
    use crate::parser::extract_tables;

    fn normalize(doc: &DocxDocument, options: &NormalizeOptions) -> Result<NormalizedDocument> {
        DocxNormalizer::new(options).normalize(doc)
    }

    #[test]
    fn test_title_heading() {
        let mut doc = DocxDocument::new();
        doc.metadata.set(MetadataKey::Title, "年度报告");
        doc.push_paragraph("Normal", "这是一段足够长的正文内容用于触发输出");

        let result = normalize(&doc, &NormalizeOptions::default()).unwrap();
        assert!(result.markdown.starts_with("# 年度报告\n\n这是"));

        let options = NormalizeOptions::new().with_title_heading(false);
        let result = normalize(&doc, &options).unwrap();
        assert!(result.markdown.starts_with("这是"));
    }

    #[test]
    fn test_table_flushes_pending_text() {
        let mut doc = DocxDocument::new();
        doc.push_paragraph("Normal", "表前");
        doc.push_table(TableGrid::new(vec![vec!["A", "B"], vec!["1", "2"]]));
        doc.push_paragraph("Normal", "表后");

        let result = normalize(&doc, &NormalizeOptions::default()).unwrap();
        assert_eq!(result.markdown, "表前\n\n| A | B |\n| 1 | 2 |\n\n表后");
        assert_eq!(result.tables.len(), 1);
        assert_eq!(result.stats.table_count, 1);
    }

    #[test]
    fn test_empty_table_is_not_recorded() {
        let mut doc = DocxDocument::new();
        doc.push_table(TableGrid::new(vec![vec!["A"], vec![" "]]));

        let result = normalize(&doc, &NormalizeOptions::default()).unwrap();
        assert!(result.tables.is_empty());
    }

    #[test]
    fn test_missing_text_strict_and_lenient() {
        let mut doc = DocxDocument::new();
        doc.elements.push(DocxElement::Paragraph(RawParagraph {
            style: Some("Normal".into()),
            text: None,
        }));
        doc.push_paragraph("Normal", "这是一段足够长的正文内容用于触发输出");

        let result = normalize(&doc, &NormalizeOptions::default());
        assert!(matches!(result, Err(Error::Classification(_))));

        let result = normalize(&doc, &NormalizeOptions::new().lenient()).unwrap();
        assert_eq!(result.markdown, "这是一段足够长的正文内容用于触发输出");
    }

    #[test]
    fn test_multiline_cells_stay_on_one_row() {
        let grid = TableGrid::new(vec![vec!["a\nb", " c "]]);
        assert_eq!(
            table_units(&grid),
            vec![
                StructuralUnit::Blank,
                StructuralUnit::table_row(["a b", "c"]),
                StructuralUnit::Blank
            ]
        );
    }

    #[test]
    fn test_pipe_cells_match_record() {
        let mut doc = DocxDocument::new();
        doc.push_table(TableGrid::new(vec![vec!["A", "B"], vec!["x|y", "2"]]));

        let result = normalize(&doc, &NormalizeOptions::default()).unwrap();
        assert_eq!(result.markdown, "| A | B |\n| x\\|y | 2 |");
        assert_eq!(result.tables[0].rows[0]["A"], "x|y");
        assert_eq!(extract_tables(&result.markdown), result.tables);
    }

    #[test]
    fn test_pipe_paragraph_before_grid_stays_separate() {
        let mut doc = DocxDocument::new();
        doc.push_paragraph("Normal", "| 甲 | 乙 |");
        doc.push_table(TableGrid::new(vec![vec!["A", "B"], vec!["1", "2"]]));

        let result = normalize(&doc, &NormalizeOptions::default()).unwrap();
        assert_eq!(result.markdown, "| 甲 | 乙 |\n\n| A | B |\n| 1 | 2 |");
        assert_eq!(result.blocks.len(), 2);
        assert_eq!(extract_tables(&result.markdown), result.tables);
    }
}
