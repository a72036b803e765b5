//! Pipeline driver.
//!
//! Sequences classification, coalescing, table reconstruction and
//! Markdown assembly over one document, or over a batch of documents in
//! parallel.
//!
//! # Example
//!
//! ```
//! use docnorm::convert::Pipeline;
//! use docnorm::model::DocxDocument;
//! use docnorm::NormalizeOptions;
//!
//! fn main() -> docnorm::Result<()> {
//!     let mut doc = DocxDocument::new();
//!     doc.push_paragraph("Heading 1", "简介");
//!     doc.push_paragraph("Normal", "正文");
//!
//!     let pipeline = Pipeline::new(NormalizeOptions::default());
//!     let result = pipeline.process_docx(&doc)?;
//!     assert_eq!(result.markdown, "# 简介\n\n正文");
//!     Ok(())
//! }
//! ```

mod docx;
mod ocr;

pub use docx::DocxNormalizer;
pub use ocr::OcrNormalizer;

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{DocumentInput, DocxDocument, OcrDocument};
use crate::parser::NormalizeOptions;
use crate::render::NormalizedDocument;

/// Drives documents through the normalization stages.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: NormalizeOptions,
}

impl Pipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// The options this pipeline runs with.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize one document from either collaborator.
    pub fn process(&self, input: &DocumentInput) -> Result<NormalizedDocument> {
        match input {
            DocumentInput::WordProcessor(doc) => self.process_docx(doc),
            DocumentInput::Ocr(doc) => self.process_ocr(doc),
        }
    }

    /// Normalize word-processor fragments.
    pub fn process_docx(&self, doc: &DocxDocument) -> Result<NormalizedDocument> {
        DocxNormalizer::new(&self.options).normalize(doc)
    }

    /// Normalize OCR-rendered text.
    pub fn process_ocr(&self, doc: &OcrDocument) -> Result<NormalizedDocument> {
        OcrNormalizer::new(&self.options).normalize(doc)
    }

    /// Normalize many documents.
    ///
    /// Results are returned in input order. A failing document yields its
    /// own error and never affects its siblings.
    pub fn process_batch(&self, inputs: &[DocumentInput]) -> Vec<Result<NormalizedDocument>> {
        let results: Vec<_> = if self.options.parallel {
            inputs.par_iter().map(|input| self.process(input)).collect()
        } else {
            inputs.iter().map(|input| self.process(input)).collect()
        };

        let failed = results.iter().filter(|r| r.is_err()).count();
        log::info!(
            "processed {} documents ({} failed)",
            results.len(),
            failed
        );
        results
    }
}
