//! # gridcalc-formula
//!
//! Formula evaluator for gridcalc.
//!
//! This crate provides:
//! - Token classification (numbers, cell references, operators, parentheses)
//! - Formula evaluation (tokens → number or [`CellError`])
//!
//! Formulas arrive already tokenized; cell references are resolved through a
//! [`SheetMemory`](gridcalc_core::SheetMemory) snapshot.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellError, SheetSnapshot};
//! use gridcalc_formula::evaluate;
//!
//! let mut sheet = SheetSnapshot::new();
//! sheet.set_value("A1", 4.0).unwrap();
//!
//! assert_eq!(evaluate(&["2", "+", "3", "*", "A1"], &sheet), Ok(14.0));
//! assert_eq!(evaluate(&["5", "/", "0"], &sheet), Err(CellError::DivideByZero));
//! ```

pub mod error;
pub mod evaluator;
pub mod token;

pub use error::{CellError, EvaluationResult, FormulaResult};
pub use evaluator::{evaluate, FormulaEvaluator};
pub use token::{classify, Operator, TokenKind};
