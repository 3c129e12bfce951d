//! Rule registry: the dataset under audit and its rules, grouped by dimension.

use tracing::debug;

use crate::{engine::EvaluationEngine, Dataset, Dimension, Report, Rule, RuleError};

pub struct RuleRegistry {
    dataset: Dataset,
    rules: [Vec<Rule>; 5],
}

impl RuleRegistry {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            rules: Default::default(),
        }
    }

    /// Append a rule under a dimension. Insertion order is reporting order.
    pub fn add(&mut self, dimension: Dimension, rule: Rule) -> &mut Self {
        debug!(
            dimension = dimension.name(),
            rule = rule.description(),
            "registering rule"
        );
        self.rules[dimension.index()].push(rule);
        self
    }

    /// Append a rule under a dimension given by name.
    ///
    /// Unknown names fail with [`RuleError::InvalidDimension`] and leave the registry untouched.
    pub fn add_rule(&mut self, dimension: &str, rule: Rule) -> Result<&mut Self, RuleError> {
        let dimension = Dimension::try_from(dimension)?;
        Ok(self.add(dimension, rule))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn rules(&self, dimension: Dimension) -> &[Rule] {
        &self.rules[dimension.index()]
    }

    pub fn len(&self) -> usize {
        self.rules.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rule descriptions per dimension, in reporting order.
    pub fn describe(&self) -> Vec<(Dimension, Vec<String>)> {
        Dimension::ALL
            .iter()
            .map(|&d| {
                let descriptions = self
                    .rules(d)
                    .iter()
                    .map(|r| r.description().to_string())
                    .collect();
                (d, descriptions)
            })
            .collect()
    }

    /// Evaluate every registered rule. Safe to call repeatedly.
    pub fn run(&self) -> Report {
        EvaluationEngine::new(self).run()
    }
}
