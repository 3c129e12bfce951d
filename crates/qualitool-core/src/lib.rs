//! Rule-based data-quality auditing.
//!
//! A [`RuleRegistry`] holds a [`Dataset`] and the [`Rule`]s registered against
//! it, grouped under the five quality [`Dimension`]s. [`RuleRegistry::run`]
//! evaluates every rule and returns a [`Report`] in dimension order then
//! registration order; a rule that cannot be evaluated appears in the report
//! as a [`RuleFailure`] instead of disappearing.

pub mod cleaner;
pub mod dataset;
pub mod dimension;
pub mod engine;
pub mod errors;
pub mod readers;
pub mod registry;
pub mod results;
pub mod rule;
pub mod rules;
pub mod types;
pub mod utils;

pub use cleaner::{drop_violations, CleaningSummary};
pub use dataset::Dataset;
pub use dimension::Dimension;
pub use errors::RuleError;
pub use registry::RuleRegistry;
pub use results::{DimensionResult, FailureKind, Report, RuleFailure, RuleOutcome, RuleResult};
pub use rule::Rule;
pub use types::{Batch, Batches};
