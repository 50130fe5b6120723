//! # gridwright-formula
//!
//! Expression nodes and formula rendering for gridwright.
//!
//! This crate provides:
//! - [`Value`] - an addressable expression node (literal, reference or formula)
//! - [`Formula`] - the operator/function tree a node computes
//! - Operator overloads and function helpers that build new nodes
//! - [`Renderer`] - turns a node graph into formula text, given where nodes were placed
//! - [`check_acyclic`] - rejects cyclic node graphs before rendering
//!
//! ## Example
//!
//! ```rust
//! use ahash::AHashMap;
//! use gridwright_core::CellLocation;
//! use gridwright_formula::{CellContent, Renderer, Value};
//!
//! let principal = Value::new(500_000.0).parameter();
//! let monthly = &principal / 12;
//!
//! let mut placed = AHashMap::new();
//! placed.insert(principal.id(), CellLocation::new("P", 0, 0));
//!
//! let renderer = Renderer::new(&placed, "C");
//! let content = renderer.render_cell(&monthly).unwrap();
//! assert_eq!(content, CellContent::Formula("=P!$A$1/12".to_string()));
//! ```

pub mod ast;
pub mod error;
pub mod functions;
pub mod graph;
mod ops;
pub mod render;
pub mod value;

pub use ast::{BinaryOperator, Formula, Operand, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use graph::check_acyclic;
pub use render::{CellContent, Renderer, Resolver};
pub use value::{NodeId, Payload, Value};
