//! Prelude module - common imports for gridwright users
//!
//! ```rust
//! use gridwright::prelude::*;
//! ```

pub use crate::{
    functions,
    // Formula types
    BinaryOperator,
    CellFormat,
    Color,
    Formula,
    // Layout types
    Layout,
    LayoutExt,
    LayoutOptions,
    // Sinks
    MemorySink,
    Operand,
    Orientation,
    ParameterTable,
    Series,
    SheetLayout,
    Sink,
    Stack,
    Style,
    Table,
    Value,
    WriteReport,
    XlsxOptions,
    XlsxSink,
};
