//! Cell contents and error codes

use thiserror::Error;

/// Error codes a cell can hold after its formula was evaluated
///
/// A cell holding an error reports [`CellError::as_str`] in place of a value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// #EMPTY! - The formula has no tokens
    #[error("formula is empty")]
    EmptyFormula,
    /// #ERR! - The tokens do not reduce to exactly one value
    #[error("invalid formula")]
    InvalidFormula,
    /// #OP! - An operator the engine does not support
    #[error("invalid operator")]
    InvalidOperator,
    /// #DIV/0! - Division by zero
    #[error("division by zero")]
    DivideByZero,
    /// #REF! - A referenced cell has an empty formula
    #[error("referenced cell is empty")]
    InvalidCell,
}

impl CellError {
    /// Get the display code for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::EmptyFormula => "#EMPTY!",
            CellError::InvalidFormula => "#ERR!",
            CellError::InvalidOperator => "#OP!",
            CellError::DivideByZero => "#DIV/0!",
            CellError::InvalidCell => "#REF!",
        }
    }

    /// Parse a display code
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "#EMPTY!" => Some(CellError::EmptyFormula),
            "#ERR!" => Some(CellError::InvalidFormula),
            "#OP!" => Some(CellError::InvalidOperator),
            "#DIV/0!" => Some(CellError::DivideByZero),
            "#REF!" => Some(CellError::InvalidCell),
            _ => None,
        }
    }
}

/// Everything the sheet stores for one cell
///
/// The cached `value` and `error` are written by whoever recalculates the
/// sheet; readers take them as-is.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// The cell's own formula, as tokens
    #[cfg_attr(feature = "serde", serde(default))]
    pub formula: Vec<String>,
    /// Last calculated value (0 while `error` is set)
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: f64,
    /// Last calculated error, if any
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub error: Option<CellError>,
}

impl Cell {
    /// Create a cell with a formula and its calculated value
    pub fn new<I, S>(formula: I, value: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formula: formula.into_iter().map(Into::into).collect(),
            value,
            error: None,
        }
    }

    /// Create a cell whose formula evaluated to an error
    pub fn with_error<I, S>(formula: I, error: CellError) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formula: formula.into_iter().map(Into::into).collect(),
            value: 0.0,
            error: Some(error),
        }
    }

    /// Create a cell holding a plain number
    pub fn number(value: f64) -> Self {
        Self::new([value.to_string()], value)
    }

    /// An empty cell (no formula, no value)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the cell has no formula
    pub fn is_empty(&self) -> bool {
        self.formula.is_empty()
    }
}
