//! Cell-related types
//!
//! This module contains:
//! - [`CellAddress`] - A cell's position (e.g., "A1", "$B$2")
//! - [`CellRange`] - A rectangular block of cells (e.g., "A1:A10")
//! - [`CellLocation`] - A cell address qualified by its sheet
//! - [`Literal`] - A raw value written to a cell or embedded in a formula

mod address;
mod literal;
mod location;

pub use address::{CellAddress, CellRange};
pub use literal::Literal;
pub use location::CellLocation;
