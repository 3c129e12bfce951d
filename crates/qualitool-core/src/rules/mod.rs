//! Predicates: row-wise violation tests over a whole [`Dataset`].
//!
//! Every predicate returns one boolean per row, `true` meaning the row violates
//! the rule. Built-in predicates keep their parameters (column names, bounds,
//! allowed values) in their own fields; any closure with the right signature is
//! a predicate as well.

pub mod date;
pub mod generic;
pub mod logic;
pub mod numeric;
pub mod string;

use arrow::{
    array::{Array, BooleanArray, StringArray},
    compute,
    datatypes::DataType,
};

use crate::{Dataset, RuleError};

pub use date::DateParseCheck;
pub use generic::{NullCheck, UnicityCheck};
pub use logic::AnyOf;
pub use numeric::Range;
pub use string::{IsInCheck, RegexMatch, StringLengthCheck};

/// A pure violation test over the full dataset.
pub trait Predicate: Send + Sync {
    /// Returns the name of the predicate.
    fn name(&self) -> String {
        "Custom".to_string()
    }
    /// Flags each row of `dataset`; the result must have one entry per row.
    fn evaluate(&self, dataset: &Dataset) -> Result<BooleanArray, RuleError>;
}

impl<F> Predicate for F
where
    F: Fn(&Dataset) -> Result<BooleanArray, RuleError> + Send + Sync,
{
    fn evaluate(&self, dataset: &Dataset) -> Result<BooleanArray, RuleError> {
        self(dataset)
    }
}

/// Null mask entries mean "no violation".
pub fn normalize_mask(mask: BooleanArray) -> BooleanArray {
    if mask.null_count() == 0 {
        return mask;
    }
    mask.iter().map(|v| Some(v.unwrap_or(false))).collect()
}

/// Column rendered as UTF-8, whatever its stored type.
pub(crate) fn utf8_column(dataset: &Dataset, column: &str) -> Result<StringArray, RuleError> {
    let array = dataset.column(column)?;
    let casted = compute::cast(array, &DataType::Utf8)
        .map_err(|e| RuleError::TypeCastError(column.to_string(), e.to_string()))?;
    casted
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| RuleError::TypeCastError(column.to_string(), "Utf8".to_string()))
}
