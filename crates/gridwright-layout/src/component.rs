//! Placeable components and the cell plan they produce

use crate::series::Series;
use crate::stack::Stack;
use crate::table::{ParameterTable, Table};
use gridwright_formula::Value;

/// Extent of a component in rows and columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub rows: u64,
    pub cols: u64,
}

impl Size {
    pub fn new(rows: u64, cols: u64) -> Self {
        Self { rows, cols }
    }
}

/// Anything that can be anchored on a sheet
#[derive(Debug, Clone)]
pub enum Component {
    /// A single node in one cell
    Value(Value),
    /// A vertical run of cells
    Series(Series),
    Table(Table),
    Parameters(ParameterTable),
    Stack(Stack),
}

impl Component {
    /// Rows and columns occupied
    pub fn size(&self) -> Size {
        match self {
            Component::Value(_) => Size::new(1, 1),
            Component::Series(s) => Size::new(s.len() as u64, u64::from(!s.is_empty())),
            Component::Table(t) => t.size(),
            Component::Parameters(p) => p.size(),
            Component::Stack(s) => s.size(),
        }
    }

    /// Append the cells of this component, anchored at `(row, col)`.
    ///
    /// Both the layout and the write pass consume the same plan, so cell
    /// order is identical in both.
    pub(crate) fn place(&self, row: u64, col: u64, out: &mut Vec<PlannedCell>) {
        match self {
            Component::Value(v) => out.push(PlannedCell::node(row, col, v)),
            Component::Series(s) => {
                for (offset, v) in s.values().enumerate() {
                    out.push(PlannedCell::node(row + offset as u64, col, v));
                }
            }
            Component::Table(t) => t.place(row, col, out),
            Component::Parameters(p) => p.place(row, col, out),
            Component::Stack(s) => s.place(row, col, out),
        }
    }
}

impl From<Value> for Component {
    fn from(v: Value) -> Self {
        Component::Value(v)
    }
}

impl From<&Value> for Component {
    fn from(v: &Value) -> Self {
        Component::Value(v.clone())
    }
}

impl From<Series> for Component {
    fn from(s: Series) -> Self {
        Component::Series(s)
    }
}

impl From<Table> for Component {
    fn from(t: Table) -> Self {
        Component::Table(t)
    }
}

impl From<ParameterTable> for Component {
    fn from(p: ParameterTable) -> Self {
        Component::Parameters(p)
    }
}

impl From<Stack> for Component {
    fn from(s: Stack) -> Self {
        Component::Stack(s)
    }
}

/// What a planned cell holds
#[derive(Debug, Clone)]
pub(crate) enum CellKind {
    /// An expression node; its location goes into the reference map
    Node(Value),
    /// Fixed text such as a title, header, parameter name or unit
    Label { text: String, header: bool },
}

/// One cell of a sheet plan, in unbounded coordinates
#[derive(Debug, Clone)]
pub(crate) struct PlannedCell {
    pub(crate) row: u64,
    pub(crate) col: u64,
    pub(crate) kind: CellKind,
}

impl PlannedCell {
    pub(crate) fn node(row: u64, col: u64, value: &Value) -> Self {
        Self {
            row,
            col,
            kind: CellKind::Node(value.clone()),
        }
    }

    pub(crate) fn header(row: u64, col: u64, text: impl Into<String>) -> Self {
        Self {
            row,
            col,
            kind: CellKind::Label {
                text: text.into(),
                header: true,
            },
        }
    }

    pub(crate) fn label(row: u64, col: u64, text: impl Into<String>) -> Self {
        Self {
            row,
            col,
            kind: CellKind::Label {
                text: text.into(),
                header: false,
            },
        }
    }
}
