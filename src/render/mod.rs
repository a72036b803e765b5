//! Rendering module: text cleanup, Markdown assembly and JSON output.

mod cleanup;
mod json;
mod markdown;
mod result;

pub use cleanup::{is_cjk, normalize_ocr_text, tidy_markdown};
pub use json::{metadata_to_json, tables_to_json, to_json, JsonFormat, MetadataRecord};
pub use markdown::{assemble, Assembled, MarkdownAssembler};
pub use result::{ContentStats, NormalizedDocument};
