//! Raw inputs handed over by the extraction collaborators.

use super::Metadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A paragraph as reported by a word-processor parser.
///
/// Both fields are optional on the wire; a paragraph without text cannot be
/// classified and is rejected by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParagraph {
    /// Style name (e.g. "Heading 1", "List Number", "Normal")
    #[serde(default)]
    pub style: Option<String>,

    /// Paragraph text
    #[serde(default)]
    pub text: Option<String>,
}

impl RawParagraph {
    /// Create a paragraph with a style name and text.
    pub fn new(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style: Some(style.into()),
            text: Some(text.into()),
        }
    }

    /// Create an unstyled paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            style: None,
            text: Some(text.into()),
        }
    }

    /// Style name, falling back to "Normal".
    pub fn style_name(&self) -> &str {
        self.style.as_deref().unwrap_or("Normal")
    }
}

/// A table as a grid of cell texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Rows of cell text, first row is the header
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Create a grid from rows of values.
    pub fn new<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Check if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One body element of a word-processor document, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocxElement {
    /// A paragraph
    Paragraph(RawParagraph),
    /// A table
    Table(TableGrid),
}

/// Everything the word-processor collaborator provides for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocxDocument {
    /// Body elements in document order
    #[serde(default)]
    pub elements: Vec<DocxElement>,

    /// Core properties
    #[serde(default)]
    pub metadata: Metadata,

    /// Relative paths of images already persisted by the caller
    #[serde(default)]
    pub images: Vec<String>,
}

impl DocxDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph.
    pub fn push_paragraph(&mut self, style: impl Into<String>, text: impl Into<String>) {
        self.elements
            .push(DocxElement::Paragraph(RawParagraph::new(style, text)));
    }

    /// Append a table.
    pub fn push_table(&mut self, grid: TableGrid) {
        self.elements.push(DocxElement::Table(grid));
    }

    /// Append an image reference.
    pub fn push_image(&mut self, path: impl Into<String>) {
        self.images.push(path.into());
    }
}

/// Rendered Markdown-like text from the OCR collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrDocument {
    /// One rendered string per page
    #[serde(default)]
    pub pages: Vec<String>,

    /// Image reference path to raw bytes, persisted by the caller
    #[serde(default)]
    pub images: BTreeMap<String, Vec<u8>>,
}

impl OcrDocument {
    /// Create a single-page document from rendered text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            pages: vec![text.into()],
            images: BTreeMap::new(),
        }
    }

    /// Concatenate all pages with a blank line between them.
    pub fn concatenated(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.trim_end_matches('\n'))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Input to the pipeline driver: one document from either collaborator.
#[derive(Debug, Clone)]
pub enum DocumentInput {
    /// Word-processor paragraphs and tables
    WordProcessor(DocxDocument),
    /// OCR-rendered text
    Ocr(OcrDocument),
}

impl From<DocxDocument> for DocumentInput {
    fn from(doc: DocxDocument) -> Self {
        DocumentInput::WordProcessor(doc)
    }
}

impl From<OcrDocument> for DocumentInput {
    fn from(doc: OcrDocument) -> Self {
        DocumentInput::Ocr(doc)
    }
}
