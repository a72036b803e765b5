//! Normalization result with metadata and statistics.

use crate::error::Result;
use crate::model::{Metadata, TableRecord};
use serde::{Deserialize, Serialize};

use super::json::{metadata_to_json, tables_to_json, JsonFormat};

/// The terminal artifact of one document pass.
///
/// Holds the rendered Markdown blocks (each already carrying its trailing
/// spacing), the tidied Markdown text, the reconstructed tables, the
/// document properties and content statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// Rendered blocks in output order
    pub blocks: Vec<String>,

    /// Final Markdown after the tidy pass
    pub markdown: String,

    /// Reconstructed tables in document order
    pub tables: Vec<TableRecord>,

    /// Document properties (default for OCR input)
    pub metadata: Metadata,

    /// Content statistics
    pub stats: ContentStats,
}

impl NormalizedDocument {
    /// Create a new result. The table count in `stats` is taken from
    /// `tables`.
    pub fn new(
        blocks: Vec<String>,
        markdown: String,
        tables: Vec<TableRecord>,
        metadata: Metadata,
        mut stats: ContentStats,
    ) -> Self {
        stats.table_count = tables.len() as u32;
        Self {
            blocks,
            markdown,
            tables,
            metadata,
            stats,
        }
    }

    /// Split into the `(markdown, tables)` pair handed to the writer.
    pub fn into_parts(self) -> (String, Vec<TableRecord>) {
        (self.markdown, self.tables)
    }

    /// Tables as a JSON array of `{"headers", "data"}` objects.
    pub fn tables_json(&self, format: JsonFormat) -> Result<String> {
        tables_to_json(&self.tables, format)
    }

    /// Document properties merged with content statistics, as JSON.
    pub fn metadata_json(&self, format: JsonFormat) -> Result<String> {
        metadata_to_json(&self.metadata, Some(&self.stats), format)
    }

    /// Check if the document produced no content at all.
    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty() && self.tables.is_empty()
    }
}

/// Statistics collected while assembling a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    /// Code points in the final Markdown
    pub char_count: u32,

    /// Whitespace-separated tokens in the final Markdown
    pub word_count: u32,

    /// Number of headings rendered
    pub heading_count: u32,

    /// Number of list items rendered
    pub list_item_count: u32,

    /// Number of plain-text paragraphs rendered
    pub paragraph_count: u32,

    /// Number of reconstructed tables
    pub table_count: u32,

    /// Number of image references appended
    pub image_count: u32,
}

impl ContentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment image count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Set word and character counts from the final text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count = text.split_whitespace().count() as u32;
        self.char_count = text.chars().count() as u32;
    }
}
