use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use arrow::array::{Array, BooleanArray};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    rules::normalize_mask, Dataset, Dimension, Report, Rule, RuleError, RuleFailure,
    RuleOutcome, RuleRegistry, RuleResult,
};

/// EvaluationEngine - runs every registered rule against the registry's dataset.
///
/// Rules are independent, so they are evaluated in parallel. The report is
/// assembled afterwards from the indexed results, which keeps it in canonical
/// dimension order then registration order whatever the completion order was.
pub struct EvaluationEngine<'a> {
    dataset: &'a Dataset,
    jobs: Vec<(Dimension, &'a Rule)>,
}

impl<'a> EvaluationEngine<'a> {
    pub fn new(registry: &'a RuleRegistry) -> Self {
        let jobs = Dimension::ALL
            .iter()
            .flat_map(|&d| registry.rules(d).iter().map(move |r| (d, r)))
            .collect();
        Self {
            dataset: registry.dataset(),
            jobs,
        }
    }

    pub fn run(&self) -> Report {
        let outcomes: Vec<(Dimension, RuleOutcome)> = self
            .jobs
            .par_iter()
            .map(|&(dimension, rule)| (dimension, evaluate_rule(dimension, rule, self.dataset)))
            .collect();

        let mut report = Report::new(self.dataset.num_rows());
        for (dimension, outcome) in outcomes {
            report.push(dimension, outcome);
        }
        report
    }
}

/// Evaluate one rule; failures become a [`RuleOutcome::Failed`] entry.
pub fn evaluate_rule(dimension: Dimension, rule: &Rule, dataset: &Dataset) -> RuleOutcome {
    match try_evaluate_rule(rule, dataset) {
        Ok(result) => {
            debug!(
                dimension = dimension.name(),
                rule = rule.description(),
                violations = result.violation_count,
                "rule evaluated"
            );
            RuleOutcome::Evaluated(result)
        }
        Err(e) => {
            warn!(
                dimension = dimension.name(),
                rule = rule.description(),
                error = %e,
                "rule evaluation failed"
            );
            RuleOutcome::Failed(RuleFailure::from_error(rule.description(), &e))
        }
    }
}

fn try_evaluate_rule(rule: &Rule, dataset: &Dataset) -> Result<RuleResult, RuleError> {
    let mask = violation_mask(rule, dataset)?;

    // An empty column list means no projection
    let projection = match rule.columns() {
        Some(columns) if !columns.is_empty() => {
            let indices = dataset.column_indices(columns).map_err(|e| match e {
                RuleError::ColumnNotFound(column) => RuleError::ColumnProjectionError {
                    rule: rule.description().to_string(),
                    column,
                },
                other => other,
            })?;
            Some(indices)
        }
        _ => None,
    };

    let violation_count = mask.true_count();
    let violating = dataset.filter(&mask)?;
    let violating_rows = match projection {
        Some(indices) => violating.project(&indices)?,
        None => violating,
    };

    Ok(RuleResult::new(
        rule.description().to_string(),
        violation_count,
        violating_rows,
    ))
}

/// Run the rule's predicate and check its mask against the dataset.
///
/// Errors and panics raised by the predicate, and masks of the wrong length,
/// all surface as [`RuleError::PredicateEvaluationError`]. Null entries are
/// turned into `false`.
pub fn violation_mask(rule: &Rule, dataset: &Dataset) -> Result<BooleanArray, RuleError> {
    let failed = |message: String| RuleError::PredicateEvaluationError {
        rule: rule.description().to_string(),
        message,
    };

    let mask = match panic::catch_unwind(AssertUnwindSafe(|| rule.predicate().evaluate(dataset)))
    {
        Ok(Ok(mask)) => mask,
        Ok(Err(e)) => return Err(failed(e.to_string())),
        Err(payload) => return Err(failed(panic_message(payload.as_ref()))),
    };

    if mask.len() != dataset.num_rows() {
        return Err(failed(format!(
            "predicate returned {} values for {} rows",
            mask.len(),
            dataset.num_rows()
        )));
    }
    Ok(normalize_mask(mask))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("predicate panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("predicate panicked: {}", s)
    } else {
        "predicate panicked".to_string()
    }
}
