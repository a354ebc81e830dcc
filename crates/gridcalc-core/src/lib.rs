//! # gridcalc-core
//!
//! Core data structures shared by the gridcalc crates.
//!
//! This crate provides:
//! - [`CellLabel`] - A1-style cell labels and the label-validity rule
//! - [`CellError`] - The error codes a cell can hold after evaluation
//! - [`SheetMemory`] - The read-only lookup contract the evaluator resolves references through
//! - [`SheetSnapshot`] - An in-memory [`SheetMemory`] implementation
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellLabel, SheetMemory, SheetSnapshot};
//!
//! let mut sheet = SheetSnapshot::new();
//! sheet.set_value("A1", 42.0).unwrap();
//!
//! let cell = sheet.lookup(&CellLabel::parse("A1").unwrap());
//! assert_eq!(cell.value, 42.0);
//! assert_eq!(cell.formula_len, 1);
//! ```

pub mod cell;
pub mod error;

pub use cell::{Cell, CellError, CellLabel, CellSnapshot, SheetMemory, SheetSnapshot};
pub use error::{Error, Result};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u16 = 16_384;
