//! Layout error types

use gridwright_formula::FormulaError;
use thiserror::Error;

/// Result type for layout operations
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while laying out or writing a document
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A node was placed at two locations in one run
    #[error("{node} is placed twice: at {first} and at {second}")]
    AddressAlreadyAssigned {
        node: String,
        first: String,
        second: String,
    },

    /// A component extends past the last row or column
    #[error("Layout overflow on sheet '{sheet}': cell ({row}, {col}) is beyond the sheet bounds")]
    LayoutOverflow { sheet: String, row: u64, col: u64 },

    /// Two sheets share a name
    #[error("Duplicate sheet name: {0}")]
    DuplicateSheetName(String),

    /// Series of unequal length or with different keys were combined
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Formula rendering error
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// Core error (invalid sheet name, address)
    #[error(transparent)]
    Core(#[from] gridwright_core::Error),

    /// Error reported by the sink
    #[error("Sink error: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LayoutError {
    pub(crate) fn sink<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        LayoutError::Sink(Box::new(err))
    }
}
