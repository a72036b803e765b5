//! JSON rendering of tables and metadata.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Metadata, TableRecord};

use super::ContentStats;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Document properties merged with content statistics into one flat
/// object.
#[derive(Debug, Serialize)]
pub struct MetadataRecord<'a> {
    #[serde(flatten)]
    properties: &'a Metadata,
    #[serde(flatten)]
    stats: &'a ContentStats,
}

impl<'a> MetadataRecord<'a> {
    /// Combine properties and statistics.
    pub fn new(properties: &'a Metadata, stats: &'a ContentStats) -> Self {
        Self { properties, stats }
    }
}

/// Serialize any value to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize tables as an array of `{"headers": [...], "data": [...]}`.
pub fn tables_to_json(tables: &[TableRecord], format: JsonFormat) -> Result<String> {
    to_json(tables, format)
}

/// Serialize document properties, merged with statistics when given.
pub fn metadata_to_json(
    metadata: &Metadata,
    stats: Option<&ContentStats>,
    format: JsonFormat,
) -> Result<String> {
    match stats {
        Some(stats) => to_json(&MetadataRecord::new(metadata, stats), format),
        None => to_json(metadata, format),
    }
}
