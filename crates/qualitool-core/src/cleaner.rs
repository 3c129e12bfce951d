//! Filtering-based cleaning: drop the rows selected rules flag.

use arrow::compute;
use tracing::info;

use crate::{engine::violation_mask, Dataset, Rule, RuleError};

#[derive(Debug, Clone)]
pub struct CleaningSummary {
    pub dataset: Dataset,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl CleaningSummary {
    pub fn rows_dropped(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Apply `rules` in order, each one to the rows the previous ones kept.
///
/// Unlike an audit, a rule that cannot be evaluated aborts cleaning.
pub fn drop_violations<'r, I>(dataset: &Dataset, rules: I) -> Result<CleaningSummary, RuleError>
where
    I: IntoIterator<Item = &'r Rule>,
{
    let rows_before = dataset.num_rows();
    let mut current = dataset.clone();
    for rule in rules {
        let mask = violation_mask(rule, &current)?;
        let keep = compute::not(&mask)?;
        let dropped = mask.true_count();
        current = Dataset::new(current.filter(&keep)?);
        info!(
            rule = rule.description(),
            dropped,
            remaining = current.num_rows(),
            "cleaning rule applied"
        );
    }
    Ok(CleaningSummary {
        rows_after: current.num_rows(),
        dataset: current,
        rows_before,
    })
}
