//! Formula evaluator
//!
//! Reduces a token list to a number with the classic two-stack
//! operator-precedence scan: operands go on one stack, pending operators and
//! open parentheses on the other. An operator is applied as soon as a token
//! arrives that binds no tighter than it, which makes `*`/`/` win over `+`/`-`
//! and keeps equal-precedence operators left-associative.
//!
//! The first failure aborts the scan and becomes the evaluation's error.

use crate::error::{CellError, EvaluationResult, FormulaResult};
use crate::token::{classify, Operator, TokenKind};
use gridcalc_core::{CellLabel, SheetMemory};

/// Entries on the operator stack
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Operator(Operator),
    LeftParen,
}

/// Evaluate a tokenized formula against a sheet
///
/// Cell references read the referenced cell's cached value; nothing is
/// recalculated and the sheet is never written.
///
/// # Example
/// ```rust
/// use gridcalc_core::{CellError, SheetSnapshot};
/// use gridcalc_formula::evaluate;
///
/// let sheet = SheetSnapshot::new();
/// assert_eq!(evaluate(&["(", "2", "+", "3", ")", "*", "4"], &sheet), Ok(20.0));
/// assert_eq!(evaluate::<&str, _>(&[], &sheet), Err(CellError::EmptyFormula));
/// ```
pub fn evaluate<T, S>(tokens: &[T], sheet: &S) -> EvaluationResult
where
    T: AsRef<str>,
    S: SheetMemory + ?Sized,
{
    let result = reduce(tokens, sheet);
    if let Err(error) = result {
        log::debug!(
            "formula of {} tokens evaluated to {} ({})",
            tokens.len(),
            error.as_str(),
            error
        );
    }
    result
}

fn reduce<T, S>(tokens: &[T], sheet: &S) -> EvaluationResult
where
    T: AsRef<str>,
    S: SheetMemory + ?Sized,
{
    if tokens.is_empty() {
        return Err(CellError::EmptyFormula);
    }

    let mut values: Vec<f64> = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Pending> = Vec::new();

    for token in tokens {
        match classify(token.as_ref(), sheet)? {
            TokenKind::Number(n) => values.push(n),
            TokenKind::CellReference(label) => values.push(resolve_reference(&label, sheet)?),
            TokenKind::LeftParen => operators.push(Pending::LeftParen),
            TokenKind::RightParen => loop {
                match operators.pop() {
                    Some(Pending::LeftParen) => break,
                    Some(Pending::Operator(op)) => apply_operator(op, &mut values)?,
                    // `)` without a matching `(`
                    None => return Err(CellError::InvalidFormula),
                }
            },
            TokenKind::Operator(op) => {
                while let Some(&Pending::Operator(top)) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    operators.pop();
                    apply_operator(top, &mut values)?;
                }
                operators.push(Pending::Operator(op));
            }
        }
    }

    while let Some(pending) = operators.pop() {
        match pending {
            Pending::Operator(op) => apply_operator(op, &mut values)?,
            // `(` never closed
            Pending::LeftParen => return Err(CellError::InvalidFormula),
        }
    }

    match values.as_slice() {
        [value] => Ok(*value),
        _ => Err(CellError::InvalidFormula),
    }
}

/// Pop two operands, apply `op`, push the result
fn apply_operator(op: Operator, values: &mut Vec<f64>) -> FormulaResult<()> {
    let rhs = values.pop().ok_or(CellError::InvalidFormula)?;
    let lhs = values.pop().ok_or(CellError::InvalidFormula)?;
    let result = op.apply(lhs, rhs)?;
    log::trace!("{} {} {} = {}", lhs, op, rhs, result);
    values.push(result);
    Ok(())
}

/// Read a referenced cell's cached value
///
/// A stored error is passed through unchanged, except `EmptyFormula`, which
/// falls through to the empty-cell check and becomes `InvalidCell`.
fn resolve_reference<S>(label: &CellLabel, sheet: &S) -> EvaluationResult
where
    S: SheetMemory + ?Sized,
{
    let cell = sheet.lookup(label);
    log::trace!("resolved {} to {:?}", label, cell);

    match cell.error {
        Some(CellError::EmptyFormula) | None => {}
        Some(error) => return Err(error),
    }

    if cell.formula_len == 0 {
        return Err(CellError::InvalidCell);
    }

    Ok(cell.value)
}

/// Evaluator bound to one sheet that remembers its last outcome
///
/// Each call to [`FormulaEvaluator::evaluate`] replaces the previous outcome.
/// [`result`](FormulaEvaluator::result) reads 0 while an error is held, so
/// check [`error`](FormulaEvaluator::error) first.
#[derive(Debug, Clone)]
pub struct FormulaEvaluator<S> {
    sheet: S,
    last: EvaluationResult,
}

impl<S: SheetMemory> FormulaEvaluator<S> {
    /// Create an evaluator reading from `sheet`
    pub fn new(sheet: S) -> Self {
        Self {
            sheet,
            last: Ok(0.0),
        }
    }

    /// Evaluate a formula and remember the outcome
    pub fn evaluate<T: AsRef<str>>(&mut self, tokens: &[T]) -> EvaluationResult {
        self.last = evaluate(tokens, &self.sheet);
        self.last
    }

    /// Numeric result of the last evaluation (0 if it failed)
    pub fn result(&self) -> f64 {
        self.last.unwrap_or(0.0)
    }

    /// Error of the last evaluation, if it failed
    pub fn error(&self) -> Option<CellError> {
        self.last.err()
    }

    /// Outcome of the last evaluation
    pub fn last(&self) -> EvaluationResult {
        self.last
    }

    /// The sheet references are resolved against
    pub fn sheet(&self) -> &S {
        &self.sheet
    }

    /// Swap in a new sheet snapshot, returning the old one
    pub fn replace_sheet(&mut self, sheet: S) -> S {
        std::mem::replace(&mut self.sheet, sheet)
    }
}
