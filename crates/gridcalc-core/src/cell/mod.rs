//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellLabel`] - A cell's location (e.g., "A1")
//! - [`Cell`] and [`CellError`] - What a cell stores: its formula tokens, cached value and error
//! - [`SheetMemory`] - Read-only lookup of cells by label
//! - [`SheetSnapshot`] - A map-backed [`SheetMemory`]

mod label;
mod storage;
mod value;

pub use label::CellLabel;
pub use storage::{CellSnapshot, SheetMemory, SheetSnapshot};
pub use value::{Cell, CellError};
