use crate::{Batch, Dimension, RuleError};

/// Outcome of a rule whose predicate ran cleanly.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleResult {
    pub description: String,
    pub violation_count: usize,
    /// Violating rows, projected onto the rule's declared columns when it has any.
    pub violating_rows: Batch,
}

impl RuleResult {
    pub fn new(description: String, violation_count: usize, violating_rows: Batch) -> Self {
        Self {
            description,
            violation_count,
            violating_rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A declared column is absent from the dataset
    ColumnProjection,
    /// The predicate returned an error, panicked, or produced a malformed mask
    PredicateEvaluation,
    /// Anything else (filtering or projection kernels)
    Internal,
}

/// A rule that could not be evaluated. It keeps its slot in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFailure {
    pub description: String,
    pub kind: FailureKind,
    pub message: String,
}

impl RuleFailure {
    pub fn from_error(description: &str, error: &RuleError) -> Self {
        let kind = match error {
            RuleError::ColumnProjectionError { .. } => FailureKind::ColumnProjection,
            RuleError::PredicateEvaluationError { .. } => FailureKind::PredicateEvaluation,
            _ => FailureKind::Internal,
        };
        Self {
            description: description.to_string(),
            kind,
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    Evaluated(RuleResult),
    Failed(RuleFailure),
}

impl RuleOutcome {
    pub fn description(&self) -> &str {
        match self {
            RuleOutcome::Evaluated(r) => &r.description,
            RuleOutcome::Failed(f) => &f.description,
        }
    }

    /// `None` when the rule failed.
    pub fn violation_count(&self) -> Option<usize> {
        match self {
            RuleOutcome::Evaluated(r) => Some(r.violation_count),
            RuleOutcome::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RuleOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionResult {
    pub dimension: Dimension,
    pub outcomes: Vec<RuleOutcome>,
}

/// Everything one evaluation pass produced, in canonical dimension order and
/// registration order within each dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total_rows: usize,
    dimensions: Vec<DimensionResult>,
}

impl Report {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            dimensions: Dimension::ALL
                .iter()
                .map(|&dimension| DimensionResult {
                    dimension,
                    outcomes: Vec::new(),
                })
                .collect(),
        }
    }

    pub(crate) fn push(&mut self, dimension: Dimension, outcome: RuleOutcome) {
        self.dimensions[dimension.index()].outcomes.push(outcome);
    }

    pub fn dimensions(&self) -> &[DimensionResult] {
        &self.dimensions
    }

    pub fn get(&self, dimension: Dimension) -> &[RuleOutcome] {
        &self.dimensions[dimension.index()].outcomes
    }

    pub fn outcomes(&self) -> impl Iterator<Item = (Dimension, &RuleOutcome)> {
        self.dimensions
            .iter()
            .flat_map(|d| d.outcomes.iter().map(move |o| (d.dimension, o)))
    }

    pub fn total_violations(&self) -> usize {
        self.outcomes()
            .filter_map(|(_, o)| o.violation_count())
            .sum()
    }

    pub fn failed_rules(&self) -> usize {
        self.outcomes().filter(|(_, o)| o.is_failed()).count()
    }

    /// No violations and no failed rules.
    pub fn is_clean(&self) -> bool {
        self.total_violations() == 0 && self.failed_rules() == 0
    }
}
