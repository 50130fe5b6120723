//! # gridwright-xlsx
//!
//! XLSX (Office Open XML) sink for gridwright.
//!
//! [`XlsxSink`] buffers everything the layout engine sends it and writes
//! the whole package when the sink is closed.
//!
//! ```rust
//! use gridwright_core::{Literal, Sink};
//! use gridwright_xlsx::XlsxSink;
//! use std::io::Cursor;
//!
//! let mut sink = XlsxSink::new(Cursor::new(Vec::new()));
//! let sheet = sink.create_sheet("Data").unwrap();
//! sink.write_literal(&sheet, 0, 0, &Literal::Number(2.0)).unwrap();
//! sink.write_formula(&sheet, 1, 0, "=A1*2").unwrap();
//! sink.close().unwrap();
//! assert!(!sink.into_inner().into_inner().is_empty());
//! ```

pub mod error;
pub mod options;
pub mod sink;

mod styles;
mod writer;

pub use error::{XlsxError, XlsxResult};
pub use options::XlsxOptions;
pub use sink::XlsxSink;
