//! Error types for gridwright-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridwright-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Invalid sheet name
    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: &'static str },

    /// Sheet handle does not belong to the sink
    #[error("Unknown sheet handle: {0}")]
    UnknownSheet(usize),

    /// Format handle does not belong to the sink
    #[error("Unknown format handle: {0}")]
    UnknownFormat(u32),

    /// Sink used after `close()`
    #[error("Sink is already closed")]
    SinkClosed,
}

impl Error {
    pub(crate) fn invalid_sheet_name(name: &str, reason: &'static str) -> Self {
        Error::InvalidSheetName {
            name: name.to_string(),
            reason,
        }
    }
}
