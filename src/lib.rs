//! # docnorm
//!
//! Deterministic normalization of document-extraction output into clean
//! Markdown plus tabular records.
//!
//! The input is what an extraction engine hands over: word-processor
//! paragraphs (style name + text) interleaved with table grids, or
//! line-oriented Markdown-like text rendered by an OCR engine. The output
//! is one structurally valid Markdown document and the tables found in
//! it.
//!
//! ## Quick Start
//!
//! ```
//! use docnorm::model::DocxDocument;
//!
//! fn main() -> docnorm::Result<()> {
//!     let mut doc = DocxDocument::new();
//!     doc.push_paragraph("Heading 1", "简介");
//!     doc.push_paragraph("Normal", "短");
//!     doc.push_paragraph("Normal", "这是一段足够长的正文内容用于触发输出");
//!
//!     let result = docnorm::normalize_docx(&doc)?;
//!     assert_eq!(result.markdown, "# 简介\n\n短 这是一段足够长的正文内容用于触发输出");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Fragment classification**: headings, list items, table rows, blanks
//! - **Short-text coalescing**: noisy short runs merged into paragraphs
//! - **OCR cleanup**: CJK punctuation and digit/unit spacing repair
//! - **Table reconstruction**: from cell grids or Markdown pipe lines
//! - **Idempotent output**: tidy and cleanup passes are fixed points
//! - **Parallel batches**: uses Rayon across documents

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{DocxNormalizer, OcrNormalizer, Pipeline};
pub use detect::{is_temp_file, safe_filename, SourceKind};
pub use error::{Error, Result};
pub use model::{
    DocumentInput, DocxDocument, DocxElement, Metadata, MetadataKey, OcrDocument, RawParagraph,
    StructuralUnit, TableGrid, TableRecord,
};
pub use parser::{ErrorMode, ListNumbering, NormalizeOptions};
pub use render::{
    normalize_ocr_text, tidy_markdown, ContentStats, JsonFormat, NormalizedDocument,
};

use std::fs;
use std::path::Path;

/// Normalize word-processor fragments with default options.
pub fn normalize_docx(doc: &DocxDocument) -> Result<NormalizedDocument> {
    normalize_docx_with_options(doc, &NormalizeOptions::default())
}

/// Normalize word-processor fragments with custom options.
///
/// # Example
///
/// ```
/// use docnorm::{normalize_docx_with_options, DocxDocument, ListNumbering, NormalizeOptions};
///
/// let mut doc = DocxDocument::new();
/// doc.push_paragraph("List Number", "一");
/// doc.push_paragraph("List Number", "二");
///
/// let options = NormalizeOptions::new().with_list_numbering(ListNumbering::Sequential);
/// let result = normalize_docx_with_options(&doc, &options).unwrap();
/// assert_eq!(result.markdown, "1. 一\n2. 二");
/// ```
pub fn normalize_docx_with_options(
    doc: &DocxDocument,
    options: &NormalizeOptions,
) -> Result<NormalizedDocument> {
    DocxNormalizer::new(options).normalize(doc)
}

/// Normalize OCR-rendered text with default options.
///
/// # Example
///
/// ```
/// let result = docnorm::normalize_ocr("| A | B |\n| - | - |\n| 1 | 2 |").unwrap();
/// assert_eq!(result.tables.len(), 1);
/// ```
pub fn normalize_ocr(text: &str) -> Result<NormalizedDocument> {
    normalize_ocr_with_options(&OcrDocument::from_text(text), &NormalizeOptions::default())
}

/// Normalize OCR-rendered pages with custom options.
pub fn normalize_ocr_with_options(
    doc: &OcrDocument,
    options: &NormalizeOptions,
) -> Result<NormalizedDocument> {
    OcrNormalizer::new(options).normalize(doc)
}

/// Read a word-processor fragment dump (JSON).
///
/// # Example
///
/// ```no_run
/// let doc = docnorm::read_docx_dump("report.json").unwrap();
/// let result = docnorm::normalize_docx(&doc).unwrap();
/// println!("{}", result.markdown);
/// ```
pub fn read_docx_dump<P: AsRef<Path>>(path: P) -> Result<DocxDocument> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Read OCR output: a JSON page dump (`.json`) or rendered text (anything
/// else, taken as a single page).
pub fn read_ocr_source<P: AsRef<Path>>(path: P) -> Result<OcrDocument> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&data)?)
    } else {
        Ok(OcrDocument::from_text(data))
    }
}

/// Builder for normalizing documents.
///
/// # Example
///
/// ```
/// use docnorm::Docnorm;
///
/// let result = Docnorm::new()
///     .with_threshold(5)
///     .without_title()
///     .normalize_ocr("# 标题\n数值 为 100 %")?;
/// assert_eq!(result.markdown, "# 标题\n\n数值为100%");
/// # Ok::<(), docnorm::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Docnorm {
    options: NormalizeOptions,
}

impl Docnorm {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the short-text threshold.
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.options = self.options.with_short_text_threshold(threshold);
        self
    }

    /// Set the default heading level.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.options = self.options.with_heading_level_default(level);
        self
    }

    /// Number ordered list items 1, 2, 3, ...
    pub fn with_sequential_numbering(mut self) -> Self {
        self.options = self.options.with_list_numbering(ListNumbering::Sequential);
        self
    }

    /// Do not prepend the metadata title.
    pub fn without_title(mut self) -> Self {
        self.options = self.options.with_title_heading(false);
        self
    }

    /// Skip unclassifiable fragments instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// The configured options.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize word-processor fragments.
    pub fn normalize_docx(&self, doc: &DocxDocument) -> Result<NormalizedDocument> {
        normalize_docx_with_options(doc, &self.options)
    }

    /// Normalize OCR-rendered text.
    pub fn normalize_ocr(&self, text: &str) -> Result<NormalizedDocument> {
        normalize_ocr_with_options(&OcrDocument::from_text(text), &self.options)
    }

    /// Build a pipeline for batch processing.
    pub fn pipeline(self) -> Pipeline {
        Pipeline::new(self.options)
    }
}
