//! Formula error types
//!
//! Evaluation fails with the same codes a cell stores, so a failed formula's
//! error can be written straight back to its cell and later propagated to the
//! cells that reference it.

pub use gridcalc_core::CellError;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, CellError>;

/// Outcome of evaluating one formula: a number or an error, never both
pub type EvaluationResult = FormulaResult<f64>;
