//! Token classification
//!
//! Formulas arrive as a flat list of token strings. Each token is classified
//! once, as it is scanned, into exactly one [`TokenKind`].

use crate::error::{CellError, FormulaResult};
use gridcalc_core::{CellLabel, SheetMemory};
use std::fmt;

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Parse an operator symbol
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    /// The operator's symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    /// Binding strength; higher binds tighter
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }

    /// Compute `lhs <op> rhs`
    ///
    /// Results that overflow to infinity (or come out NaN) are
    /// [`CellError::InvalidFormula`]; only finite values are returned.
    pub fn apply(&self, lhs: f64, rhs: f64) -> FormulaResult<f64> {
        let value = match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => {
                if rhs == 0.0 {
                    return Err(CellError::DivideByZero);
                }
                lhs / rhs
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CellError::InvalidFormula)
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// What a single token is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// Numeric literal
    Number(f64),
    /// Reference to another cell
    CellReference(CellLabel),
    /// Arithmetic operator
    Operator(Operator),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
}

/// Whether `token` is a finite numeric literal
pub fn is_number(token: &str) -> bool {
    parse_number(token).is_some()
}

/// Whether `token` is one of `+ - * /`
pub fn is_operator(token: &str) -> bool {
    Operator::from_symbol(token).is_some()
}

/// Whether `token` names a cell according to `sheet`'s label rule
pub fn is_cell_reference<S: SheetMemory + ?Sized>(token: &str, sheet: &S) -> bool {
    sheet.is_valid_label(token)
}

/// Precedence of an operator token, 0 for anything else
pub fn precedence(token: &str) -> u8 {
    Operator::from_symbol(token).map_or(0, |op| op.precedence())
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Classify a token
///
/// Tokens that fit no category are rejected: a lone punctuation character is
/// taken to be an unsupported operator ([`CellError::InvalidOperator`]),
/// anything else makes the formula invalid. So does a token the sheet accepts
/// as a label but cannot resolve to a cell.
pub fn classify<S: SheetMemory + ?Sized>(token: &str, sheet: &S) -> FormulaResult<TokenKind> {
    if let Some(n) = parse_number(token) {
        return Ok(TokenKind::Number(n));
    }

    match token {
        "(" => return Ok(TokenKind::LeftParen),
        ")" => return Ok(TokenKind::RightParen),
        _ => {}
    }

    if let Some(op) = Operator::from_symbol(token) {
        return Ok(TokenKind::Operator(op));
    }

    if is_cell_reference(token, sheet) {
        return sheet
            .resolve_label(token)
            .map(TokenKind::CellReference)
            .ok_or(CellError::InvalidFormula);
    }

    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_punctuation() => Err(CellError::InvalidOperator),
        _ => Err(CellError::InvalidFormula),
    }
}
