//! # gridwright
//!
//! Build spreadsheets from expression graphs.
//!
//! Values are expression nodes; arithmetic on them builds new nodes that
//! remember how they were computed. Place nodes on sheets (alone, in
//! series, tables or stacks) and gridwright writes every computed node as
//! a live formula pointing at the cells of its inputs.
//!
//! ## Example
//!
//! ```rust
//! use gridwright::prelude::*;
//!
//! let principal = Value::new(500_000.0).named("Principal").parameter();
//! let monthly = &principal / 12;
//!
//! let mut layout = Layout::new();
//! layout
//!     .add_sheet(SheetLayout::new("P").with(principal.clone(), 0, 0))
//!     .unwrap();
//! layout
//!     .add_sheet(SheetLayout::new("C").with(monthly, 0, 1))
//!     .unwrap();
//!
//! let mut sink = MemorySink::new();
//! layout.write(&mut sink).unwrap();
//! assert_eq!(sink.sheet("C").unwrap().formula("B1"), Some("=P!$A$1/12"));
//!
//! // Or straight to a file:
//! // layout.save("mortgage.xlsx").unwrap();
//! ```

pub mod prelude;

use std::path::Path;

use thiserror::Error;

// Re-export core types
pub use gridwright_core::{
    quote_sheet_name, validate_sheet_name, CellAddress, CellFormat, CellLocation, CellRange,
    Color, FormatCache, Literal, MemoryCell, MemorySheet, MemorySink, Sink, Style, MAX_COLS,
    MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export formula types
pub use gridwright_formula::{
    check_acyclic, functions, BinaryOperator, CellContent, Formula, FormulaError, FormulaResult,
    NodeId, Operand, Payload, Renderer, Resolver, UnaryOperator, Value,
};

// Re-export layout types
pub use gridwright_layout::{
    Component, Layout, LayoutError, LayoutOptions, LayoutResult, NamedSource, Orientation,
    ParameterTable, Placement, ReferenceMap, Series, SeriesKey, SeriesSource, SeriesValue,
    SheetLayout, Size, Stack, Table, WriteReport,
};

// Re-export I/O types
pub use gridwright_xlsx::{XlsxError, XlsxOptions, XlsxResult, XlsxSink};

/// Errors from building a layout and writing it to a file
#[derive(Debug, Error)]
pub enum Error {
    /// The layout could not be laid out, rendered or written
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A node or function call could not be built
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// The output file could not be created
    #[error(transparent)]
    Xlsx(#[from] XlsxError),
}

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for [`Layout`] to add file output
pub trait LayoutExt {
    /// Write the layout to an `.xlsx` file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<WriteReport>;

    /// Write the layout to an `.xlsx` file with explicit package options
    fn save_with_options<P: AsRef<Path>>(
        &self,
        path: P,
        options: XlsxOptions,
    ) -> Result<WriteReport>;
}

impl LayoutExt for Layout {
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<WriteReport> {
        self.save_with_options(path, XlsxOptions::default())
    }

    fn save_with_options<P: AsRef<Path>>(
        &self,
        path: P,
        options: XlsxOptions,
    ) -> Result<WriteReport> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(XlsxError::from)?;
        let report = self.write(XlsxSink::with_options(file, options))?;
        log::debug!("saved {} cells to {}", report.cells, path.display());
        Ok(report)
    }
}

/// Write `layout` to an `.xlsx` file at `path`
pub fn save<P: AsRef<Path>>(layout: &Layout, path: P) -> Result<WriteReport> {
    layout.save(path)
}
