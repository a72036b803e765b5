//! Structural units produced by the classifier.

use serde::{Deserialize, Serialize};

/// One classified piece of document content.
///
/// Units are created by the [`Classifier`](crate::parser::Classifier) and
/// flow by value through the coalescer and the Markdown assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuralUnit {
    /// A heading with its level (1-6).
    Heading {
        /// Heading level, always within 1..=6
        level: u8,
        /// Heading text
        text: String,
    },

    /// A list item.
    ListItem {
        /// Whether the item belongs to a numbered list
        ordered: bool,
        /// Number written in the source marker (`3.` gives 3); `None` when
        /// the numbering comes from a list style
        #[serde(default, skip_serializing_if = "Option::is_none")]
        number: Option<u32>,
        /// Item text without its marker
        text: String,
    },

    /// One row of a table, already split into trimmed cells.
    TableRow {
        /// Cell texts in column order
        cells: Vec<String>,
    },

    /// A run of ordinary text.
    PlainText {
        /// The text content
        text: String,
    },

    /// An empty line or paragraph.
    Blank,
}

impl StructuralUnit {
    /// Create a heading, clamping the level into 1..=6.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        StructuralUnit::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Create a list item.
    pub fn list_item(ordered: bool, text: impl Into<String>) -> Self {
        StructuralUnit::ListItem {
            ordered,
            number: None,
            text: text.into(),
        }
    }

    /// Create an ordered list item that keeps its source number.
    pub fn numbered_item(number: u32, text: impl Into<String>) -> Self {
        StructuralUnit::ListItem {
            ordered: true,
            number: Some(number),
            text: text.into(),
        }
    }

    /// Create a table row from cell values.
    pub fn table_row<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        StructuralUnit::TableRow {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a plain text unit.
    pub fn plain(text: impl Into<String>) -> Self {
        StructuralUnit::PlainText { text: text.into() }
    }

    /// Whether this unit forces a pending text buffer to flush.
    pub fn is_boundary(&self) -> bool {
        !matches!(self, StructuralUnit::PlainText { .. })
    }
}
