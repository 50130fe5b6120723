//! Sheet-qualified cell locations

use super::CellAddress;
use crate::sheet_name::quote_sheet_name;
use std::fmt;
use std::sync::Arc;

/// A cell address on a named sheet
///
/// This is what the layout pass records for every placed node and what the
/// renderer turns into `A1`, `$A$1` or `Sheet!A1` text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellLocation {
    /// Sheet the cell lives on
    pub sheet: Arc<str>,
    /// Position within the sheet (always stored relative)
    pub address: CellAddress,
}

impl CellLocation {
    /// Create a location from a sheet name and 0-based coordinates
    pub fn new(sheet: impl Into<Arc<str>>, row: u32, col: u16) -> Self {
        Self {
            sheet: sheet.into(),
            address: CellAddress::new(row, col),
        }
    }

    /// Row index (0-based)
    pub fn row(&self) -> u32 {
        self.address.row
    }

    /// Column index (0-based)
    pub fn col(&self) -> u16 {
        self.address.col
    }

    /// Render as a reference seen from `current_sheet`.
    ///
    /// The sheet prefix is added only when the location lives on another
    /// sheet; `absolute` sets both `$` markers.
    pub fn render(&self, current_sheet: &str, absolute: bool) -> String {
        let cell = self.address.with_absolute(absolute).to_a1_string();
        if &*self.sheet == current_sheet {
            cell
        } else {
            format!("{}!{}", quote_sheet_name(&self.sheet), cell)
        }
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", quote_sheet_name(&self.sheet), self.address)
    }
}
