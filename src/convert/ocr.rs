//! OCR-rendered text normalization.

use crate::error::Result;
use crate::model::{Metadata, OcrDocument, StructuralUnit};
use crate::parser::{extract_tables, Classifier, Coalescer, NormalizeOptions};
use crate::render::{assemble, normalize_ocr_text, NormalizedDocument};

/// Normalizes line-oriented text produced by an OCR engine.
#[derive(Debug, Clone)]
pub struct OcrNormalizer<'a> {
    options: &'a NormalizeOptions,
    classifier: Classifier,
}

impl<'a> OcrNormalizer<'a> {
    /// Create a normalizer bound to the given options.
    pub fn new(options: &'a NormalizeOptions) -> Self {
        Self {
            options,
            classifier: Classifier::from_options(options),
        }
    }

    /// Classify, clean and reassemble the pages, then rebuild tables from
    /// the resulting Markdown.
    pub fn normalize(&self, doc: &OcrDocument) -> Result<NormalizedDocument> {
        let text = doc.concatenated();
        let mut units = Vec::new();
        let mut coalescer = Coalescer::new(self.options.short_text_threshold);

        for line in text.lines() {
            coalescer.push(self.classify(line), &mut units);
        }
        coalescer.finish(&mut units);

        let mut assembled = assemble(&units, std::iter::empty(), self.options);
        assembled.stats.image_count = doc.images.len() as u32;
        let tables = extract_tables(&assembled.markdown);

        log::debug!(
            "ocr: {} pages -> {} units, {} tables",
            doc.pages.len(),
            units.len(),
            tables.len()
        );

        Ok(NormalizedDocument::new(
            assembled.blocks,
            assembled.markdown,
            tables,
            Metadata::default(),
            assembled.stats,
        ))
    }

    /// Classify one line, running plain text through the OCR normalizer.
    fn classify(&self, line: &str) -> StructuralUnit {
        match self.classifier.classify_line(line) {
            StructuralUnit::PlainText { text } => {
                let cleaned = normalize_ocr_text(&text);
                if cleaned.is_empty() {
                    StructuralUnit::Blank
                } else {
                    StructuralUnit::plain(cleaned)
                }
            }
            other => other,
        }
    }
}
