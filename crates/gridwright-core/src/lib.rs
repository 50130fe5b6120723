//! # gridwright-core
//!
//! Core data structures shared by the gridwright crates.
//!
//! This crate provides:
//! - [`CellAddress`], [`CellRange`] and [`CellLocation`] - cell addressing
//! - [`Literal`] - raw cell values and their formula-literal syntax
//! - [`Style`], [`CellFormat`] and [`FormatCache`] - cell formatting with deduplication
//! - [`Sink`] - the spreadsheet backend contract, plus the recording [`MemorySink`]
//! - Sheet name validation and cross-sheet quoting
//!
//! ## Example
//!
//! ```rust
//! use gridwright_core::{CellAddress, CellLocation};
//!
//! let addr = CellAddress::new(0, 0);
//! assert_eq!(addr.to_a1_string(), "A1");
//!
//! let loc = CellLocation::new("Rates 2024", 1, 2);
//! assert_eq!(loc.render("Calc", true), "'Rates 2024'!$C$2");
//! ```

pub mod cell;
pub mod error;
pub mod memory;
pub mod sheet_name;
pub mod sink;
pub mod style;

pub use cell::{CellAddress, CellLocation, CellRange, Literal};
pub use error::{Error, Result};
pub use memory::{MemoryCell, MemorySheet, MemorySink};
pub use sheet_name::{quote_sheet_name, validate_sheet_name};
pub use sink::Sink;
pub use style::{CellFormat, Color, FormatCache, Style};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
