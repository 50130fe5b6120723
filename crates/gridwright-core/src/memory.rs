//! In-memory sink that records everything it receives

use crate::cell::{CellAddress, Literal};
use crate::error::{Error, Result};
use crate::sink::Sink;
use crate::style::CellFormat;
use std::collections::BTreeMap;

/// Content of one recorded cell
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryCell {
    /// A literal value
    Literal(Literal),
    /// A formula string, including the leading `=`
    Formula(String),
}

impl MemoryCell {
    /// Get the formula text if this cell holds a formula
    pub fn as_formula(&self) -> Option<&str> {
        match self {
            MemoryCell::Formula(f) => Some(f),
            MemoryCell::Literal(_) => None,
        }
    }

    /// Get the literal if this cell holds one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            MemoryCell::Literal(l) => Some(l),
            MemoryCell::Formula(_) => None,
        }
    }
}

/// One recorded sheet
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    name: String,
    cells: BTreeMap<(u32, u16), MemoryCell>,
    formats: BTreeMap<(u32, u16), u32>,
    column_widths: BTreeMap<u16, f64>,
}

impl MemorySheet {
    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell content at 0-based coordinates
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&MemoryCell> {
        self.cells.get(&(row, col))
    }

    /// Cell content at an A1-style address
    pub fn cell(&self, address: &str) -> Result<Option<&MemoryCell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Formula text at an A1-style address, if the cell holds a formula
    pub fn formula(&self, address: &str) -> Option<&str> {
        self.cell(address).ok().flatten().and_then(MemoryCell::as_formula)
    }

    /// Literal at an A1-style address, if the cell holds one
    pub fn literal(&self, address: &str) -> Option<&Literal> {
        self.cell(address).ok().flatten().and_then(MemoryCell::as_literal)
    }

    /// Format handle applied at 0-based coordinates
    pub fn format_at(&self, row: u32, col: u16) -> Option<u32> {
        self.formats.get(&(row, col)).copied()
    }

    /// Iterate over all recorded cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &MemoryCell)> {
        self.cells.iter().map(|(&pos, cell)| (pos, cell))
    }

    /// Number of recorded cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Width set on a column, if any
    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    /// All explicitly set column widths
    pub fn column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }
}

/// A [`Sink`] that keeps everything in memory.
///
/// Useful for tests and for inspecting what a layout would produce
/// without writing a file.
///
/// ```rust
/// use gridwright_core::{Literal, MemorySink, Sink};
///
/// let mut sink = MemorySink::new();
/// let sheet = sink.create_sheet("Data").unwrap();
/// sink.write_literal(&sheet, 0, 0, &Literal::from(42)).unwrap();
/// sink.write_formula(&sheet, 0, 1, "=A1*2").unwrap();
///
/// let data = sink.sheet("Data").unwrap();
/// assert_eq!(data.formula("B1"), Some("=A1*2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    sheets: Vec<MemorySheet>,
    formats: Vec<CellFormat>,
    closed: bool,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheets in creation order
    pub fn sheets(&self) -> &[MemorySheet] {
        &self.sheets
    }

    /// Find a sheet by name
    pub fn sheet(&self, name: &str) -> Option<&MemorySheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Sheet names in creation order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Every format created, indexed by handle
    pub fn formats(&self) -> &[CellFormat] {
        &self.formats
    }

    /// Look up a created format
    pub fn format(&self, handle: u32) -> Option<&CellFormat> {
        self.formats.get(handle as usize)
    }

    /// Whether `close()` has been called
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn sheet_mut(&mut self, handle: usize) -> Result<&mut MemorySheet> {
        if self.closed {
            return Err(Error::SinkClosed);
        }
        self.sheets
            .get_mut(handle)
            .ok_or(Error::UnknownSheet(handle))
    }
}

impl Sink for MemorySink {
    type Sheet = usize;
    type Format = u32;
    type Error = Error;

    fn create_sheet(&mut self, name: &str) -> Result<usize> {
        if self.closed {
            return Err(Error::SinkClosed);
        }
        self.sheets.push(MemorySheet {
            name: name.to_string(),
            ..MemorySheet::default()
        });
        Ok(self.sheets.len() - 1)
    }

    fn write_literal(&mut self, sheet: &usize, row: u32, col: u16, value: &Literal) -> Result<()> {
        self.sheet_mut(*sheet)?
            .cells
            .insert((row, col), MemoryCell::Literal(value.clone()));
        Ok(())
    }

    fn write_formula(&mut self, sheet: &usize, row: u32, col: u16, formula: &str) -> Result<()> {
        self.sheet_mut(*sheet)?
            .cells
            .insert((row, col), MemoryCell::Formula(formula.to_string()));
        Ok(())
    }

    fn create_format(&mut self, format: &CellFormat) -> Result<u32> {
        if self.closed {
            return Err(Error::SinkClosed);
        }
        self.formats.push(format.clone());
        Ok((self.formats.len() - 1) as u32)
    }

    fn apply_format(&mut self, sheet: &usize, row: u32, col: u16, format: &u32) -> Result<()> {
        if *format as usize >= self.formats.len() {
            return Err(Error::UnknownFormat(*format));
        }
        self.sheet_mut(*sheet)?.formats.insert((row, col), *format);
        Ok(())
    }

    fn set_column_width(&mut self, sheet: &usize, col: u16, width: f64) -> Result<()> {
        self.sheet_mut(*sheet)?.column_widths.insert(col, width);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_records_cells_and_formats() {
        let mut sink = MemorySink::new();
        let sheet = sink.create_sheet("Calc").unwrap();
        let bold = sink
            .create_format(&CellFormat::from(Style::new().bold(true)))
            .unwrap();

        sink.write_literal(&sheet, 0, 0, &Literal::from("Rate"))
            .unwrap();
        sink.write_formula(&sheet, 0, 1, "=P!$A$1/12").unwrap();
        sink.apply_format(&sheet, 0, 1, &bold).unwrap();
        sink.set_column_width(&sheet, 1, 12.5).unwrap();

        let calc = sink.sheet("Calc").unwrap();
        assert_eq!(calc.literal("A1"), Some(&Literal::from("Rate")));
        assert_eq!(calc.formula("B1"), Some("=P!$A$1/12"));
        assert_eq!(calc.format_at(0, 1), Some(bold));
        assert_eq!(calc.column_width(1), Some(12.5));
        assert_eq!(calc.cell_count(), 2);
    }

    #[test]
    fn test_rejects_unknown_handles() {
        let mut sink = MemorySink::new();
        assert!(matches!(
            sink.write_formula(&3, 0, 0, "=1"),
            Err(Error::UnknownSheet(3))
        ));
        let sheet = sink.create_sheet("S").unwrap();
        assert!(matches!(
            sink.apply_format(&sheet, 0, 0, &9),
            Err(Error::UnknownFormat(9))
        ));
    }

    #[test]
    fn test_closed_sink_rejects_writes() {
        let mut sink = MemorySink::new();
        let sheet = sink.create_sheet("S").unwrap();
        sink.close().unwrap();
        assert!(sink.is_closed());
        assert!(matches!(
            sink.write_literal(&sheet, 0, 0, &Literal::Empty),
            Err(Error::SinkClosed)
        ));
    }
}
