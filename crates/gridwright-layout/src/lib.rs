//! # gridwright-layout
//!
//! Places expression nodes on sheets and writes them out as live formulas.
//!
//! This crate provides:
//! - [`Series`], [`Table`], [`ParameterTable`] - structured groups of nodes
//! - [`Stack`] - vertical or horizontal composition of components
//! - [`SheetLayout`] - components anchored at positions on one sheet
//! - [`Layout`] - owns the sheets and runs the layout, write and auto-width passes
//!
//! ## Example
//!
//! ```rust
//! use gridwright_core::MemorySink;
//! use gridwright_formula::Value;
//! use gridwright_layout::{Layout, SheetLayout};
//!
//! let principal = Value::new(500_000.0).parameter();
//! let monthly = &principal / 12;
//!
//! let mut params = SheetLayout::new("P");
//! params.add(principal.clone(), 0, 0);
//! let mut calc = SheetLayout::new("C");
//! calc.add(monthly, 0, 1);
//!
//! let mut layout = Layout::new();
//! layout.add_sheet(params).unwrap();
//! layout.add_sheet(calc).unwrap();
//!
//! let mut sink = MemorySink::new();
//! layout.write(&mut sink).unwrap();
//! assert_eq!(sink.sheet("C").unwrap().formula("B1"), Some("=P!$A$1/12"));
//! ```

pub mod component;
pub mod error;
pub mod layout;
pub mod options;
pub mod reference_map;
pub mod series;
pub mod sheet;
pub mod stack;
pub mod table;
mod widths;

pub use component::{Component, Size};
pub use error::{LayoutError, LayoutResult};
pub use layout::{Layout, WriteReport};
pub use options::LayoutOptions;
pub use reference_map::ReferenceMap;
pub use series::{NamedSource, Series, SeriesKey, SeriesSource, SeriesValue};
pub use sheet::{Placement, SheetLayout};
pub use stack::{Orientation, Stack};
pub use table::{ParameterTable, Table};
