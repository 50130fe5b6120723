//! The spreadsheet backend contract

use crate::cell::Literal;
use crate::style::CellFormat;

/// A spreadsheet backend that receives the output of a layout write.
///
/// The layout engine only ever talks to a sink through this trait: it
/// creates sheets in document order, writes literals and formula strings
/// at 0-based coordinates, attaches deduplicated formats, sets column
/// widths, and finally closes the sink.
///
/// Formula strings are passed with their leading `=`.
pub trait Sink {
    /// Handle identifying a created sheet
    type Sheet: Clone;
    /// Handle identifying a created format
    type Format: Clone;
    /// Backend error
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a new sheet; sheets appear in the document in creation order
    fn create_sheet(&mut self, name: &str) -> Result<Self::Sheet, Self::Error>;

    /// Write a literal value at `(row, col)`
    fn write_literal(
        &mut self,
        sheet: &Self::Sheet,
        row: u32,
        col: u16,
        value: &Literal,
    ) -> Result<(), Self::Error>;

    /// Write a formula string (e.g. `=A1*2`) at `(row, col)`
    fn write_formula(
        &mut self,
        sheet: &Self::Sheet,
        row: u32,
        col: u16,
        formula: &str,
    ) -> Result<(), Self::Error>;

    /// Register a format with the backend
    fn create_format(&mut self, format: &CellFormat) -> Result<Self::Format, Self::Error>;

    /// Attach a previously created format to the cell at `(row, col)`
    fn apply_format(
        &mut self,
        sheet: &Self::Sheet,
        row: u32,
        col: u16,
        format: &Self::Format,
    ) -> Result<(), Self::Error>;

    /// Set the width of a column, in character units
    fn set_column_width(
        &mut self,
        sheet: &Self::Sheet,
        col: u16,
        width: f64,
    ) -> Result<(), Self::Error>;

    /// Finish the document
    fn close(&mut self) -> Result<(), Self::Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    type Sheet = S::Sheet;
    type Format = S::Format;
    type Error = S::Error;

    fn create_sheet(&mut self, name: &str) -> Result<Self::Sheet, Self::Error> {
        (**self).create_sheet(name)
    }

    fn write_literal(
        &mut self,
        sheet: &Self::Sheet,
        row: u32,
        col: u16,
        value: &Literal,
    ) -> Result<(), Self::Error> {
        (**self).write_literal(sheet, row, col, value)
    }

    fn write_formula(
        &mut self,
        sheet: &Self::Sheet,
        row: u32,
        col: u16,
        formula: &str,
    ) -> Result<(), Self::Error> {
        (**self).write_formula(sheet, row, col, formula)
    }

    fn create_format(&mut self, format: &CellFormat) -> Result<Self::Format, Self::Error> {
        (**self).create_format(format)
    }

    fn apply_format(
        &mut self,
        sheet: &Self::Sheet,
        row: u32,
        col: u16,
        format: &Self::Format,
    ) -> Result<(), Self::Error> {
        (**self).apply_format(sheet, row, col, format)
    }

    fn set_column_width(
        &mut self,
        sheet: &Self::Sheet,
        col: u16,
        width: f64,
    ) -> Result<(), Self::Error> {
        (**self).set_column_width(sheet, col, width)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}
