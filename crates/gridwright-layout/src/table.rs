//! Tables and parameter tables

use crate::component::{PlannedCell, Size};
use crate::error::{LayoutError, LayoutResult};
use crate::series::Series;
use gridwright_formula::Value;

/// Columns of equal length laid out side by side.
///
/// An optional title occupies the first row. A header row with the column
/// names follows when at least one column is named.
#[derive(Debug, Clone, Default)]
pub struct Table {
    title: Option<String>,
    columns: Vec<Series>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with a title row
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            columns: Vec::new(),
        }
    }

    /// Append a column; it must be as long as the existing ones
    pub fn add_column(&mut self, column: Series) -> LayoutResult<()> {
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(LayoutError::DimensionMismatch(format!(
                    "column '{}' has {} rows, table has {}",
                    column.name().unwrap_or(""),
                    column.len(),
                    first.len()
                )));
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Builder form of [`Table::add_column`]
    pub fn with_column(mut self, column: Series) -> LayoutResult<Self> {
        self.add_column(column)?;
        Ok(self)
    }

    /// Title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Columns in order
    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    /// Column by position
    pub fn column(&self, index: usize) -> Option<&Series> {
        self.columns.get(index)
    }

    fn has_header(&self) -> bool {
        self.columns.iter().any(|c| c.name().is_some())
    }

    fn data_rows(&self) -> usize {
        self.columns.first().map_or(0, Series::len)
    }

    /// Rows and columns occupied
    pub fn size(&self) -> Size {
        let rows = usize::from(self.title.is_some()) + usize::from(self.has_header()) + self.data_rows();
        Size::new(rows as u64, self.columns.len() as u64)
    }

    pub(crate) fn place(&self, row: u64, col: u64, out: &mut Vec<PlannedCell>) {
        if self.columns.is_empty() {
            log::warn!("table {:?} has no columns", self.title);
        }
        let mut row = row;
        if let Some(title) = &self.title {
            out.push(PlannedCell::header(row, col, title));
            row += 1;
        }
        if self.has_header() {
            for (offset, column) in self.columns.iter().enumerate() {
                if let Some(name) = column.name() {
                    out.push(PlannedCell::header(row, col + offset as u64, name));
                }
            }
            row += 1;
        }
        // row-major so each table row is emitted left to right
        for r in 0..self.data_rows() {
            for (offset, column) in self.columns.iter().enumerate() {
                if let Some(node) = column.at(r) {
                    out.push(PlannedCell::node(row + r as u64, col + offset as u64, node));
                }
            }
        }
    }
}

/// Named inputs in a fixed three-column layout: name, value, unit.
///
/// The value column holds the parameter nodes themselves, so formulas
/// referring to a parameter point into this table.
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    title: Option<String>,
    parameters: Vec<Value>,
}

impl ParameterTable {
    /// Header labels of the three columns
    pub const HEADERS: [&'static str; 3] = ["Parameter", "Value", "Unit"];

    /// Create an empty parameter table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty parameter table with a title row
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            parameters: Vec::new(),
        }
    }

    /// Add a parameter node
    pub fn add(&mut self, parameter: &Value) -> &mut Self {
        if parameter.name().is_none() {
            log::warn!("adding parameter {} without a name", parameter.label());
        }
        self.parameters.push(parameter.clone());
        self
    }

    /// Builder form of [`ParameterTable::add`]
    pub fn with(mut self, parameter: &Value) -> Self {
        self.add(parameter);
        self
    }

    /// Title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Parameter nodes in order
    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    /// Rows and columns occupied
    pub fn size(&self) -> Size {
        let rows = usize::from(self.title.is_some()) + 1 + self.parameters.len();
        Size::new(rows as u64, 3)
    }

    pub(crate) fn place(&self, row: u64, col: u64, out: &mut Vec<PlannedCell>) {
        let mut row = row;
        if let Some(title) = &self.title {
            out.push(PlannedCell::header(row, col, title));
            row += 1;
        }
        for (offset, header) in Self::HEADERS.iter().enumerate() {
            out.push(PlannedCell::header(row, col + offset as u64, *header));
        }
        row += 1;
        for parameter in &self.parameters {
            if let Some(name) = parameter.name() {
                out.push(PlannedCell::label(row, col, name));
            }
            out.push(PlannedCell::node(row, col + 1, parameter));
            if let Some(unit) = parameter.unit_label() {
                out.push(PlannedCell::label(row, col + 2, unit));
            }
            row += 1;
        }
    }
}
