//! Tests for formula evaluation against a sheet snapshot

use gridcalc_core::{Cell, CellError, CellLabel, SheetMemory, SheetSnapshot};
use gridcalc_formula::{evaluate, FormulaEvaluator};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn tokens(formula: &str) -> Vec<&str> {
    formula.split_whitespace().collect()
}

fn budget_sheet() -> SheetSnapshot {
    let mut sheet = SheetSnapshot::new();
    sheet.set_value("A1", 1200.0).unwrap();
    sheet.set_value("A2", 350.0).unwrap();
    sheet.set_value("A3", 12.0).unwrap();
    sheet
        .set_formula("B1", tokens("A1 - A2"), 850.0)
        .unwrap();
    sheet
        .set_formula("B2", tokens("B1 / A3"), 850.0 / 12.0)
        .unwrap();
    sheet
        .set_error("B3", tokens("A1 / ( A3 - 12 )"), CellError::DivideByZero)
        .unwrap();
    sheet
}

/// Test the worked examples for plain arithmetic
#[test]
fn test_arithmetic_examples() {
    let sheet = SheetSnapshot::new();

    assert_eq!(evaluate(&tokens("2 + 3 * 4"), &sheet), Ok(14.0));
    assert_eq!(evaluate(&tokens("( 2 + 3 ) * 4"), &sheet), Ok(20.0));
    assert_eq!(evaluate(&tokens("8 - 3 - 2"), &sheet), Ok(3.0));
    assert_eq!(evaluate(&tokens("5 / 0"), &sheet), Err(CellError::DivideByZero));
    assert_eq!(evaluate(&tokens("2 3"), &sheet), Err(CellError::InvalidFormula));
    assert_eq!(evaluate(&tokens(""), &sheet), Err(CellError::EmptyFormula));
}

/// Test references into a staged sheet, the way a recalculation pass uses them
#[test]
fn test_evaluate_with_cell_references() {
    let sheet = budget_sheet();

    assert_eq!(evaluate(&tokens("B1"), &sheet), Ok(850.0));
    assert_eq!(evaluate(&tokens("B1 + A2 * 2"), &sheet), Ok(1550.0));
    assert_eq!(
        evaluate(&tokens("( A1 - B1 ) / 7"), &sheet),
        Ok(50.0)
    );
}

/// A cached error on a referenced cell surfaces on the referencing formula
#[test]
fn test_error_propagates_through_references() {
    let mut sheet = budget_sheet();
    assert_eq!(
        evaluate(&tokens("B3 + 1"), &sheet),
        Err(CellError::DivideByZero)
    );

    // Write the failure back and chain another level
    let error = evaluate(&tokens("B3 + 1"), &sheet).unwrap_err();
    sheet
        .insert("C1", Cell::with_error(tokens("B3 + 1"), error))
        .unwrap();
    assert_eq!(
        evaluate(&tokens("C1 * 2"), &sheet),
        Err(CellError::DivideByZero)
    );
}

#[test]
fn test_reference_to_empty_cell() {
    let mut sheet = budget_sheet();
    assert_eq!(evaluate(&tokens("D4"), &sheet), Err(CellError::InvalidCell));

    sheet.insert("D4", Cell::empty()).unwrap();
    assert_eq!(
        evaluate(&tokens("A1 + D4"), &sheet),
        Err(CellError::InvalidCell)
    );
}

/// A sheet with its own label rule decides what counts as a reference
#[test]
fn test_custom_label_rule() {
    struct SmallSheet(SheetSnapshot);

    impl SheetMemory for SmallSheet {
        fn lookup(&self, label: &CellLabel) -> gridcalc_core::CellSnapshot {
            self.0.lookup(label)
        }

        fn is_valid_label(&self, token: &str) -> bool {
            // Only columns A-C, rows 1-9
            matches!(token.as_bytes(), [b'A'..=b'C', b'1'..=b'9'])
        }
    }

    let sheet = SmallSheet(budget_sheet());
    assert_eq!(evaluate(&tokens("A1 + 1"), &sheet), Ok(1201.0));
    assert_eq!(
        evaluate(&tokens("D1 + 1"), &sheet),
        Err(CellError::InvalidFormula)
    );
}

/// A sheet can also widen the label rule, e.g. to accept `$` markers
#[test]
fn test_widened_label_rule() {
    struct AbsoluteRefSheet(SheetSnapshot);

    impl SheetMemory for AbsoluteRefSheet {
        fn lookup(&self, label: &CellLabel) -> gridcalc_core::CellSnapshot {
            self.0.lookup(label)
        }

        fn is_valid_label(&self, token: &str) -> bool {
            CellLabel::is_valid(&token.replace('$', ""))
        }

        fn resolve_label(&self, token: &str) -> Option<CellLabel> {
            CellLabel::parse(&token.replace('$', "")).ok()
        }
    }

    let mut inner = SheetSnapshot::new();
    inner.set_value("A1", 5.0).unwrap();
    let sheet = AbsoluteRefSheet(inner);

    assert_eq!(evaluate(&tokens("$A$1 + 1"), &sheet), Ok(6.0));
    assert_eq!(evaluate(&tokens("A$1 * $A1"), &sheet), Ok(25.0));
    // Accepted and resolved, but nothing stored there
    assert_eq!(
        evaluate(&tokens("$B$1 + 1"), &sheet),
        Err(CellError::InvalidCell)
    );
}

/// Overflow never leaks an infinite or NaN value out of a formula
#[test]
fn test_non_finite_results_are_invalid() {
    let mut sheet = SheetSnapshot::new();
    sheet.set_value("A1", f64::MAX).unwrap();

    assert_eq!(
        evaluate(&tokens("1e308 * 10"), &sheet),
        Err(CellError::InvalidFormula)
    );
    assert_eq!(
        evaluate(&tokens("1 / 1e-320"), &sheet),
        Err(CellError::InvalidFormula)
    );
    assert_eq!(
        evaluate(&tokens("A1 + A1 - A1"), &sheet),
        Err(CellError::InvalidFormula)
    );
    assert_eq!(evaluate(&tokens("A1 - A1 + A1"), &sheet), Ok(f64::MAX));

    let mut evaluator = FormulaEvaluator::new(&sheet);
    evaluator.evaluate(&tokens("A1 * 2")).unwrap_err();
    assert_eq!(evaluator.error(), Some(CellError::InvalidFormula));
    assert_eq!(evaluator.result(), 0.0);
}

#[test]
fn test_evaluator_keeps_last_outcome() {
    let mut evaluator = FormulaEvaluator::new(budget_sheet());

    evaluator.evaluate(&tokens("B3")).unwrap_err();
    assert_eq!(evaluator.error(), Some(CellError::DivideByZero));
    assert_eq!(evaluator.result(), 0.0);

    evaluator.evaluate(&tokens("A3 * 2")).unwrap();
    assert_eq!(evaluator.error(), None);
    assert_eq!(evaluator.result(), 24.0);
}

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100).prop_map(|n| n.to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("A1".to_string()),
        Just("B3".to_string()),
        Just("Z9".to_string()),
    ]
}

/// Reference result for a flat `n op n op n ...` formula over `+ - *`
fn expected_value(numbers: &[i64], ops: &[char]) -> i64 {
    let mut total = 0;
    let mut sign = 1;
    let mut term = numbers[0];
    for (op, n) in ops.iter().zip(&numbers[1..]) {
        match op {
            '*' => term *= n,
            '+' => {
                total += sign * term;
                sign = 1;
                term = *n;
            }
            _ => {
                total += sign * term;
                sign = -1;
                term = *n;
            }
        }
    }
    total + sign * term
}

proptest! {
    #[test]
    fn prop_evaluation_is_idempotent(formula in prop::collection::vec(token_strategy(), 0..16)) {
        let sheet = budget_sheet();
        let first = evaluate(&formula, &sheet);
        let second = evaluate(&formula, &sheet);
        prop_assert_eq!(first, second);

        let mut evaluator = FormulaEvaluator::new(&sheet);
        prop_assert_eq!(evaluator.evaluate(&formula), first);
        prop_assert_eq!(evaluator.evaluate(&formula), first);
    }

    #[test]
    fn prop_error_means_sentinel_result(formula in prop::collection::vec(token_strategy(), 0..16)) {
        let mut evaluator = FormulaEvaluator::new(budget_sheet());
        let outcome = evaluator.evaluate(&formula);
        match outcome {
            Ok(value) => {
                prop_assert_eq!(evaluator.error(), None);
                prop_assert_eq!(evaluator.result(), value);
            }
            Err(error) => {
                prop_assert_eq!(evaluator.error(), Some(error));
                prop_assert_eq!(evaluator.result(), 0.0);
            }
        }
    }

    #[test]
    fn prop_subtraction_is_left_associative(a in -50i32..50, b in -50i32..50, c in -50i32..50) {
        let formula = [a.to_string(), "-".into(), b.to_string(), "-".into(), c.to_string()];
        let sheet = SheetSnapshot::new();
        prop_assert_eq!(evaluate(&formula, &sheet), Ok(f64::from(a - b - c)));
    }

    #[test]
    fn prop_matches_standard_precedence(
        numbers in prop::collection::vec(0i64..10, 1..8),
        ops in prop::collection::vec(prop_oneof![Just('+'), Just('-'), Just('*')], 7),
    ) {
        let ops = &ops[..numbers.len() - 1];
        let mut formula = vec![numbers[0].to_string()];
        for (op, n) in ops.iter().zip(&numbers[1..]) {
            formula.push(op.to_string());
            formula.push(n.to_string());
        }

        let sheet = SheetSnapshot::new();
        let expected = expected_value(&numbers, ops) as f64;
        prop_assert_eq!(evaluate(&formula, &sheet), Ok(expected));
    }
}
