mod evaluation_engine;

#[cfg(test)]
mod tests;

pub use evaluation_engine::{evaluate_rule, violation_mask, EvaluationEngine};
