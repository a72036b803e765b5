//! Data model for the normalization pipeline.
//!
//! Inputs from the extraction collaborators ([`DocxDocument`],
//! [`OcrDocument`]), the intermediate [`StructuralUnit`] stream, and the
//! [`TableRecord`] side channel. All values are scoped to a single
//! document pass and move between stages by value.

mod document;
mod fragment;
mod table;
mod unit;

pub use document::{Metadata, MetadataKey};
pub use fragment::{DocumentInput, DocxDocument, DocxElement, OcrDocument, RawParagraph, TableGrid};
pub use table::{fallback_label, RecordRow, TableRecord};
pub use unit::StructuralUnit;
