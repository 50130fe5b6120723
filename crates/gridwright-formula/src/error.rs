//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while building or rendering formulas
#[derive(Debug, Error, PartialEq)]
pub enum FormulaError {
    /// A node was referenced but never placed on a sheet
    #[error("Unresolved reference: {0} was never placed on a sheet")]
    UnresolvedReference(String),

    /// The node graph contains a cycle
    #[error("Cyclic reference through {0}")]
    CyclicReference(String),

    /// A function call was built without any operands
    #[error("Function {0} needs at least one operand")]
    EmptyOperands(String),

    /// A deferred node was rendered before being defined
    #[error("Node {0} was never defined")]
    Undefined(String),

    /// A deferred node was defined twice
    #[error("Node {0} is already defined")]
    AlreadyDefined(String),
}
