use std::sync::Arc;

use arrow::{array::BooleanArray, compute};

use crate::{
    rules::{normalize_mask, Predicate},
    Dataset, RuleError,
};

/// Flags a row when any member predicate flags it.
#[derive(Clone, Default)]
pub struct AnyOf {
    predicates: Vec<Arc<dyn Predicate>>,
}

impl AnyOf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn or<P: Predicate + 'static>(mut self, predicate: P) -> Self {
        self.predicates.push(Arc::new(predicate));
        self
    }
}

impl Predicate for AnyOf {
    fn name(&self) -> String {
        let names: Vec<String> = self.predicates.iter().map(|p| p.name()).collect();
        format!("AnyOf({})", names.join(", "))
    }

    fn evaluate(&self, dataset: &Dataset) -> Result<BooleanArray, RuleError> {
        let mut mask = BooleanArray::from(vec![false; dataset.num_rows()]);
        for predicate in &self.predicates {
            let flagged = normalize_mask(predicate.evaluate(dataset)?);
            mask = compute::or(&mask, &flagged)?;
        }
        Ok(mask)
    }
}
