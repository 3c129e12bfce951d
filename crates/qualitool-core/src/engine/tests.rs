//! Tests for the evaluation engine module.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Int64Array, StringArray};

use crate::rules::{IsInCheck, NullCheck, Range, UnicityCheck};
use crate::{Dataset, Dimension, FailureKind, Rule, RuleError, RuleOutcome, RuleRegistry};

use super::{evaluate_rule, violation_mask, EvaluationEngine};

// ============================================================================
// Test Utilities
// ============================================================================

/// Three titles with one release year before 1900 and one duplicated id.
fn create_titles() -> Dataset {
    Dataset::try_from_columns(vec![
        (
            "id",
            Arc::new(StringArray::from(vec!["A", "B", "A"])) as ArrayRef,
        ),
        (
            "title",
            Arc::new(StringArray::from(vec![Some("Nosferatu"), None, Some("Up")])) as ArrayRef,
        ),
        (
            "year",
            Arc::new(Int64Array::from(vec![1850, 2001, 1999])) as ArrayRef,
        ),
    ])
    .unwrap()
}

fn expect_evaluated(outcome: &RuleOutcome) -> &crate::RuleResult {
    match outcome {
        RuleOutcome::Evaluated(r) => r,
        RuleOutcome::Failed(f) => panic!("rule '{}' failed: {}", f.description, f.message),
    }
}

fn expect_failed(outcome: &RuleOutcome) -> &crate::RuleFailure {
    match outcome {
        RuleOutcome::Failed(f) => f,
        RuleOutcome::Evaluated(r) => panic!("rule '{}' did not fail", r.description),
    }
}

// ============================================================================
// Evaluation
// ============================================================================

#[test]
fn test_year_scenario() {
    let ds = create_titles();
    let rule = Rule::new(Range::at_least("year", 1900.0), "year >= 1900");
    let outcome = evaluate_rule(Dimension::Accuracy, &rule, &ds);
    let result = expect_evaluated(&outcome);

    assert_eq!(result.violation_count, 1);
    assert_eq!(result.violating_rows.num_rows(), 1);
    assert_eq!(result.violating_rows.num_columns(), 3);
    let years = result
        .violating_rows
        .column_by_name("year")
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(years.value(0), 1850);
}

#[test]
fn test_duplicate_scenario() {
    let ds = create_titles();
    let rule = Rule::new(UnicityCheck::new("id"), "id unique").with_columns(["id"]);
    let outcome = evaluate_rule(Dimension::Uniqueness, &rule, &ds);
    let result = expect_evaluated(&outcome);

    assert_eq!(result.violation_count, 1);
    let schema = result.violating_rows.schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, vec!["id"]);
}

#[test]
fn test_all_false_keeps_declared_shape() {
    let ds = create_titles();
    let rule = Rule::new(
        |d: &Dataset| -> Result<BooleanArray, RuleError> {
            Ok(BooleanArray::from(vec![false; d.num_rows()]))
        },
        "never fails",
    )
    .with_columns(["year", "id"]);
    let outcome = evaluate_rule(Dimension::Consistency, &rule, &ds);
    let result = expect_evaluated(&outcome);

    assert_eq!(result.violation_count, 0);
    assert_eq!(result.violating_rows.num_rows(), 0);
    let schema = result.violating_rows.schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    // Dataset order, not declaration order
    assert_eq!(names, vec!["id", "year"]);
}

#[test]
fn test_empty_declared_columns_keep_every_column() {
    let ds = create_titles();
    let rule = Rule::new(Range::at_least("year", 1900.0), "year >= 1900")
        .with_columns(Vec::<String>::new());
    let outcome = evaluate_rule(Dimension::Accuracy, &rule, &ds);
    let result = expect_evaluated(&outcome);

    assert_eq!(result.violation_count, 1);
    assert_eq!(result.violating_rows.num_columns(), 3);
    assert_eq!(result.violating_rows.num_rows(), 1);
}

#[test]
fn test_null_mask_entries_are_not_violations() {
    let ds = create_titles();
    let rule = Rule::new(
        |_: &Dataset| -> Result<BooleanArray, RuleError> {
            Ok(BooleanArray::from(vec![Some(true), None, Some(false)]))
        },
        "partial",
    );
    let mask = violation_mask(&rule, &ds).unwrap();
    assert_eq!(mask.null_count(), 0);
    assert_eq!(mask.true_count(), 1);
}

// ============================================================================
// Failure isolation
// ============================================================================

#[test]
fn test_missing_projection_column() {
    let ds = create_titles();
    let rule = Rule::new(NullCheck::new("title"), "title required").with_columns(["titel"]);
    let outcome = evaluate_rule(Dimension::Completeness, &rule, &ds);
    let failure = expect_failed(&outcome);
    assert_eq!(failure.kind, FailureKind::ColumnProjection);
    assert!(failure.message.contains("titel"));
}

#[test]
fn test_predicate_error_is_wrapped() {
    let ds = create_titles();
    let rule = Rule::new(NullCheck::new("rating"), "rating required");
    let outcome = evaluate_rule(Dimension::Completeness, &rule, &ds);
    let failure = expect_failed(&outcome);
    assert_eq!(failure.kind, FailureKind::PredicateEvaluation);
    assert!(failure.message.contains("rating"));
}

#[test]
fn test_wrong_mask_length_fails() {
    let ds = create_titles();
    let rule = Rule::new(
        |_: &Dataset| -> Result<BooleanArray, RuleError> { Ok(BooleanArray::from(vec![true])) },
        "short mask",
    );
    let res = violation_mask(&rule, &ds);
    assert!(matches!(res, Err(RuleError::PredicateEvaluationError { .. })));
}

#[test]
fn test_panicking_predicate_is_isolated() {
    let ds = create_titles();
    let mut registry = RuleRegistry::new(ds);
    registry
        .add(
            Dimension::Accuracy,
            Rule::new(
                |_: &Dataset| -> Result<BooleanArray, RuleError> { panic!("boom") },
                "panics",
            ),
        )
        .add(
            Dimension::Accuracy,
            Rule::new(Range::at_least("year", 1900.0), "year >= 1900"),
        );

    let report = registry.run();
    let accuracy = report.get(Dimension::Accuracy);
    assert_eq!(accuracy.len(), 2);
    let failure = expect_failed(&accuracy[0]);
    assert!(failure.message.contains("boom"));
    assert_eq!(expect_evaluated(&accuracy[1]).violation_count, 1);
}

// ============================================================================
// Report assembly
// ============================================================================

#[test]
fn test_report_order_follows_dimensions_then_registration() {
    let ds = create_titles();
    let mut registry = RuleRegistry::new(ds);
    registry
        .add(
            Dimension::Consistency,
            Rule::new(IsInCheck::new("id", ["A", "B"]), "id known"),
        )
        .add(
            Dimension::Accuracy,
            Rule::new(Range::at_least("year", 1900.0), "year >= 1900"),
        )
        .add(
            Dimension::Completeness,
            Rule::new(NullCheck::new("title"), "title required"),
        )
        .add(
            Dimension::Completeness,
            Rule::new(NullCheck::new("year"), "year required"),
        );

    let engine = EvaluationEngine::new(&registry);
    let report = engine.run();
    let order: Vec<(Dimension, &str)> = report
        .outcomes()
        .map(|(d, o)| (d, o.description()))
        .collect();
    assert_eq!(
        order,
        vec![
            (Dimension::Accuracy, "year >= 1900"),
            (Dimension::Completeness, "title required"),
            (Dimension::Completeness, "year required"),
            (Dimension::Consistency, "id known"),
        ]
    );
    assert_eq!(report.total_rows, 3);
    assert_eq!(report.total_violations(), 2);
}

#[test]
fn test_run_is_deterministic() {
    let ds = create_titles();
    let mut registry = RuleRegistry::new(ds);
    for i in 0..32 {
        registry.add(
            Dimension::ALL[i % 5],
            Rule::new(NullCheck::new("title"), format!("title required #{}", i)),
        );
    }
    let first = registry.run();
    let second = registry.run();
    assert_eq!(first, second);
}

#[test]
fn test_empty_registry_reports_every_dimension() {
    let registry = RuleRegistry::new(create_titles());
    let report = registry.run();
    assert_eq!(report.dimensions().len(), 5);
    assert!(report.outcomes().next().is_none());
}
