//! Fragment parsing: classification, short-text coalescing and table
//! reconstruction.

mod classifier;
mod coalescer;
mod options;
mod table_builder;

pub use classifier::{escape_pipes, is_pipe_row, split_pipe_row, Classifier};
pub use coalescer::{coalesce, Coalescer, PendingBuffer};
pub use options::{
    ErrorMode, ListNumbering, NormalizeOptions, DEFAULT_HEADING_LEVEL,
    DEFAULT_SHORT_TEXT_THRESHOLD,
};
pub use table_builder::{
    extract_tables, is_separator_row, table_from_grid, table_from_pipe_lines, TableBuilder,
    TableSource,
};
