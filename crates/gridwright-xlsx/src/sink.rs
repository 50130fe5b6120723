//! The buffering XLSX sink

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use gridwright_core::{CellAddress, CellFormat, Error as CoreError, Literal, Sink};

use crate::error::{XlsxError, XlsxResult};
use crate::options::XlsxOptions;
use crate::styles::StyleTable;
use crate::writer::PackageWriter;

/// What a buffered cell holds
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellData {
    Literal(Literal),
    /// Formula text without the leading `=`
    Formula(String),
}

#[derive(Debug, Clone)]
pub(crate) struct BufferedCell {
    pub(crate) data: CellData,
    /// Format handle; `None` means the default format
    pub(crate) format: Option<u32>,
}

impl Default for BufferedCell {
    fn default() -> Self {
        Self {
            data: CellData::Literal(Literal::Empty),
            format: None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct BufferedSheet {
    pub(crate) name: String,
    pub(crate) cells: BTreeMap<(u32, u16), BufferedCell>,
    pub(crate) column_widths: BTreeMap<u16, f64>,
}

/// A [`Sink`] producing an `.xlsx` package.
///
/// Cells, formats and column widths are buffered in memory; the package
/// is written to the underlying writer by [`Sink::close`]. Sheet handles
/// are sheet indexes and format handles are indexes into the format list.
#[derive(Debug)]
pub struct XlsxSink<W: Write + Seek> {
    inner: W,
    options: XlsxOptions,
    sheets: Vec<BufferedSheet>,
    formats: Vec<CellFormat>,
    closed: bool,
}

impl XlsxSink<File> {
    /// Create (or truncate) the file at `path` and write the package there
    pub fn create<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Seek> XlsxSink<W> {
    /// Create a sink writing to `inner` with default options
    pub fn new(inner: W) -> Self {
        Self::with_options(inner, XlsxOptions::default())
    }

    /// Create a sink writing to `inner`
    pub fn with_options(inner: W, options: XlsxOptions) -> Self {
        Self {
            inner,
            options,
            sheets: Vec::new(),
            formats: Vec::new(),
            closed: false,
        }
    }

    /// Options in effect
    pub fn options(&self) -> &XlsxOptions {
        &self.options
    }

    /// Check if the package has been written
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of sheets created so far
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn ensure_open(&self) -> XlsxResult<()> {
        if self.closed {
            return Err(CoreError::SinkClosed.into());
        }
        Ok(())
    }

    fn cell_mut(&mut self, sheet: usize, row: u32, col: u16) -> XlsxResult<&mut BufferedCell> {
        self.ensure_open()?;
        CellAddress::checked(u64::from(row), u64::from(col))?;
        let sheet = self
            .sheets
            .get_mut(sheet)
            .ok_or(CoreError::UnknownSheet(sheet))?;
        Ok(sheet.cells.entry((row, col)).or_default())
    }
}

impl<W: Write + Seek> Sink for XlsxSink<W> {
    type Sheet = usize;
    type Format = u32;
    type Error = XlsxError;

    fn create_sheet(&mut self, name: &str) -> XlsxResult<usize> {
        self.ensure_open()?;
        gridwright_core::validate_sheet_name(name)?;
        self.sheets.push(BufferedSheet {
            name: name.to_string(),
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
        });
        Ok(self.sheets.len() - 1)
    }

    fn write_literal(
        &mut self,
        sheet: &usize,
        row: u32,
        col: u16,
        value: &Literal,
    ) -> XlsxResult<()> {
        self.cell_mut(*sheet, row, col)?.data = CellData::Literal(value.clone());
        Ok(())
    }

    fn write_formula(
        &mut self,
        sheet: &usize,
        row: u32,
        col: u16,
        formula: &str,
    ) -> XlsxResult<()> {
        let text = formula.strip_prefix('=').unwrap_or(formula);
        self.cell_mut(*sheet, row, col)?.data = CellData::Formula(text.to_string());
        Ok(())
    }

    fn create_format(&mut self, format: &CellFormat) -> XlsxResult<u32> {
        self.ensure_open()?;
        self.formats.push(format.clone());
        Ok((self.formats.len() - 1) as u32)
    }

    fn apply_format(&mut self, sheet: &usize, row: u32, col: u16, format: &u32) -> XlsxResult<()> {
        if *format as usize >= self.formats.len() {
            return Err(CoreError::UnknownFormat(*format).into());
        }
        self.cell_mut(*sheet, row, col)?.format = Some(*format);
        Ok(())
    }

    fn set_column_width(&mut self, sheet: &usize, col: u16, width: f64) -> XlsxResult<()> {
        self.ensure_open()?;
        CellAddress::checked(0, u64::from(col))?;
        let target = self
            .sheets
            .get_mut(*sheet)
            .ok_or(CoreError::UnknownSheet(*sheet))?;
        target.column_widths.insert(col, width);
        Ok(())
    }

    fn close(&mut self) -> XlsxResult<()> {
        self.ensure_open()?;
        let styles = StyleTable::build(&self.formats);
        log::debug!(
            "writing xlsx package: {} sheets, {} cell formats",
            self.sheets.len(),
            styles.len()
        );
        PackageWriter::new(&self.sheets, &styles, &self.options).write(&mut self.inner)?;
        self.inner.flush()?;
        self.closed = true;
        Ok(())
    }
}
