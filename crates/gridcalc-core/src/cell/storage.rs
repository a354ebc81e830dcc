//! Sheet memory: read-only cell lookup by label

use super::label::CellLabel;
use super::value::{Cell, CellError};
use crate::error::Result;
use std::collections::BTreeMap;

/// What a lookup reports about one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSnapshot {
    /// Number of tokens in the cell's own formula (0 means the cell is empty)
    pub formula_len: usize,
    /// Cached value
    pub value: f64,
    /// Cached error, if any
    pub error: Option<CellError>,
}

impl CellSnapshot {
    /// Snapshot of a cell with no formula
    pub const EMPTY: CellSnapshot = CellSnapshot {
        formula_len: 0,
        value: 0.0,
        error: None,
    };
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        Self {
            formula_len: cell.formula.len(),
            value: cell.value,
            error: cell.error,
        }
    }
}

/// Read-only access to the cells of a sheet
///
/// Implementations must not change between lookups made during a single
/// evaluation.
pub trait SheetMemory {
    /// Look up a cell. Labels with no stored cell report [`CellSnapshot::EMPTY`].
    fn lookup(&self, label: &CellLabel) -> CellSnapshot;

    /// Whether `token` names a cell
    fn is_valid_label(&self, token: &str) -> bool {
        CellLabel::is_valid(token)
    }

    /// The cell a reference token points at
    ///
    /// Sheets that widen [`is_valid_label`](Self::is_valid_label) override
    /// this too so every accepted token maps to a label.
    fn resolve_label(&self, token: &str) -> Option<CellLabel> {
        CellLabel::parse(token).ok()
    }
}

impl<T: SheetMemory + ?Sized> SheetMemory for &T {
    fn lookup(&self, label: &CellLabel) -> CellSnapshot {
        (**self).lookup(label)
    }

    fn is_valid_label(&self, token: &str) -> bool {
        (**self).is_valid_label(token)
    }

    fn resolve_label(&self, token: &str) -> Option<CellLabel> {
        (**self).resolve_label(token)
    }
}

impl<T: SheetMemory + ?Sized> SheetMemory for Box<T> {
    fn lookup(&self, label: &CellLabel) -> CellSnapshot {
        (**self).lookup(label)
    }

    fn is_valid_label(&self, token: &str) -> bool {
        (**self).is_valid_label(token)
    }

    fn resolve_label(&self, token: &str) -> Option<CellLabel> {
        (**self).resolve_label(token)
    }
}

/// In-memory sheet keyed by cell label
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSnapshot {
    #[cfg_attr(feature = "serde", serde(default))]
    cells: BTreeMap<CellLabel, Cell>,
}

impl SheetSnapshot {
    /// Create an empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cell, returning the one it replaced
    pub fn insert(&mut self, label: &str, cell: Cell) -> Result<Option<Cell>> {
        let label = CellLabel::parse(label)?;
        Ok(self.cells.insert(label, cell))
    }

    /// Store a plain number
    pub fn set_value(&mut self, label: &str, value: f64) -> Result<()> {
        self.insert(label, Cell::number(value)).map(|_| ())
    }

    /// Store a formula together with its calculated value
    pub fn set_formula<I, S>(&mut self, label: &str, formula: I, value: f64) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(label, Cell::new(formula, value)).map(|_| ())
    }

    /// Store a formula whose evaluation produced an error
    pub fn set_error<I, S>(&mut self, label: &str, formula: I, error: CellError) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(label, Cell::with_error(formula, error))
            .map(|_| ())
    }

    /// Get a stored cell
    pub fn get(&self, label: &CellLabel) -> Option<&Cell> {
        self.cells.get(label)
    }

    /// Remove a cell
    pub fn remove(&mut self, label: &CellLabel) -> Option<Cell> {
        self.cells.remove(label)
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cells are stored
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over stored cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (&CellLabel, &Cell)> {
        self.cells.iter()
    }
}

impl SheetMemory for SheetSnapshot {
    fn lookup(&self, label: &CellLabel) -> CellSnapshot {
        self.cells
            .get(label)
            .map(CellSnapshot::from)
            .unwrap_or(CellSnapshot::EMPTY)
    }
}
