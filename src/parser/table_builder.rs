//! Table reconstruction.
//!
//! Builds [`TableRecord`]s from either a cell grid (word-processor tables)
//! or a run of pipe-delimited Markdown lines (rendered OCR text). Both
//! sources go through the same routine: the first row gives the headers,
//! separator rows are dropped, every other row is keyed by header (or a
//! `列N` fallback label) and kept only if it has a non-empty value.

use crate::error::{Error, Result};
use crate::model::{RecordRow, TableGrid, TableRecord};
use crate::render::normalize_ocr_text;

use super::classifier::{is_pipe_row, split_pipe_row};

/// Where the candidate rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    /// A grid of cell texts
    Grid,
    /// Pipe-delimited lines of rendered Markdown; cells are OCR-normalized
    Markdown,
}

/// Builds table records from candidate rows.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    source: TableSource,
}

impl TableBuilder {
    /// Create a builder for the given source.
    pub fn new(source: TableSource) -> Self {
        Self { source }
    }

    /// Builder for cell grids.
    pub fn grid() -> Self {
        Self::new(TableSource::Grid)
    }

    /// Builder for Markdown pipe lines.
    pub fn markdown() -> Self {
        Self::new(TableSource::Markdown)
    }

    /// Build a record from rows of raw cell text.
    ///
    /// Returns [`Error::MalformedTable`] when the candidate has no header
    /// cells or no data row survives; callers treat that as a discard.
    pub fn build<I, R, S>(&self, rows: I) -> Result<TableRecord>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows = rows.into_iter();

        let headers = match rows.next() {
            Some(first) => self.clean_cells(first),
            None => return Err(Error::MalformedTable("table has no rows".into())),
        };
        if headers.is_empty() {
            return Err(Error::MalformedTable("table has no header cells".into()));
        }

        let mut record = TableRecord::new(headers);
        let mut separators = 0;

        for row in rows {
            let cells = self.clean_cells(row);
            if is_separator_row(&cells) {
                separators += 1;
                continue;
            }
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }

            let mut mapped = RecordRow::new();
            for (index, cell) in cells.into_iter().enumerate() {
                mapped.insert(record.column_key(index), cell);
            }
            record.push_row(mapped);
        }

        if record.is_empty() {
            return Err(Error::MalformedTable(format!(
                "table with {} header(s) has no data rows",
                record.column_count()
            )));
        }

        log::debug!(
            "built table: {} columns, {} rows, {} separator rows dropped",
            record.column_count(),
            record.row_count(),
            separators
        );
        Ok(record)
    }

    fn clean_cells<R, S>(&self, row: R) -> Vec<String>
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        row.into_iter()
            .map(|cell| match self.source {
                TableSource::Grid => cell.as_ref().trim().to_string(),
                TableSource::Markdown => normalize_ocr_text(cell.as_ref()),
            })
            .collect()
    }
}

/// Check if every cell is made only of dashes and whitespace (an
/// alignment colon is allowed next to dashes).
pub fn is_separator_row<S: AsRef<str>>(cells: &[S]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| is_separator_cell(c.as_ref()))
}

fn is_separator_cell(cell: &str) -> bool {
    let cell = cell.trim();
    let inner = if cell.contains('-') {
        cell.strip_prefix(':').unwrap_or(cell)
    } else {
        cell
    };
    let inner = if inner.contains('-') {
        inner.strip_suffix(':').unwrap_or(inner)
    } else {
        inner
    };
    inner.chars().all(|c| c == '-' || c.is_whitespace())
}

/// Build a record from a word-processor table grid.
pub fn table_from_grid(grid: &TableGrid) -> Option<TableRecord> {
    match TableBuilder::grid().build(&grid.rows) {
        Ok(record) => Some(record),
        Err(e) => {
            log::debug!("discarding grid table: {}", e);
            None
        }
    }
}

/// Build a record from consecutive pipe-delimited lines.
pub fn table_from_pipe_lines<S: AsRef<str>>(lines: &[S]) -> Option<TableRecord> {
    let rows: Vec<Vec<String>> = lines
        .iter()
        .filter_map(|line| split_pipe_row(line.as_ref()))
        .collect();
    match TableBuilder::markdown().build(rows) {
        Ok(record) => Some(record),
        Err(e) => {
            log::debug!("discarding markdown table: {}", e);
            None
        }
    }
}

/// Find every maximal run of pipe-delimited lines in `text` and build a
/// record from each; degenerate candidates are skipped.
pub fn extract_tables(text: &str) -> Vec<TableRecord> {
    let mut tables = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for line in text.lines() {
        if is_pipe_row(line) {
            run.push(line);
            continue;
        }
        if !run.is_empty() {
            tables.extend(table_from_pipe_lines(&run));
            run.clear();
        }
    }
    if !run.is_empty() {
        tables.extend(table_from_pipe_lines(&run));
    }

    tables
}
