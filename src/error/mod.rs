//! Error types
//!
//! `RangeError` is the only failure the table itself reports: a position,
//! span, line or column outside the current document. Rejected calls never
//! mutate the table. `LoadError` belongs to the loader.

use std::path::PathBuf;
use thiserror::Error;

/// A position or span outside the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("insert position {position} is past the end of the document (length {len})")]
    Insert { position: usize, len: usize },

    #[error("erase of {length} at {position} runs past the end of the document (length {len})")]
    Erase {
        position: usize,
        length: usize,
        len: usize,
    },

    #[error("range {start}..{end} is not inside the document (length {len})")]
    Slice { start: usize, end: usize, len: usize },

    #[error("line {line} does not exist (line count {line_count})")]
    Line { line: usize, line_count: usize },

    #[error("column {col} is past the end of line {row} (length {line_len})")]
    Column {
        row: usize,
        col: usize,
        line_len: usize,
    },

    #[error("position {position} is past the end of the document (length {len})")]
    Position { position: usize, len: usize },
}

impl RangeError {
    /// Machine-readable code, stable across message wording changes
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "INSERT_OUT_OF_RANGE",
            Self::Erase { .. } => "ERASE_OUT_OF_RANGE",
            Self::Slice { .. } => "SLICE_OUT_OF_RANGE",
            Self::Line { .. } => "LINE_OUT_OF_RANGE",
            Self::Column { .. } => "COLUMN_OUT_OF_RANGE",
            Self::Position { .. } => "POSITION_OUT_OF_RANGE",
        }
    }
}

/// Failure while reading initial text into a table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} is not valid UTF-8", .path.display())]
    InvalidUtf8 { path: PathBuf },
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
