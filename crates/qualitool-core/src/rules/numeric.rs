use arrow::{
    array::{AsArray, BooleanArray, Float64Array},
    compute::{self, CastOptions},
    datatypes::{DataType, Float64Type},
};
use arrow_ord::cmp;

use crate::{
    rules::{normalize_mask, Predicate},
    Dataset, RuleError,
};

/// Flags numeric values below `min` or above `max`. Both bounds are inclusive.
///
/// The column is cast to Float64 without tolerance: a value that cannot be read
/// as a number fails the whole predicate instead of passing silently.
/// Missing values are never flagged.
#[derive(Debug, Clone)]
pub struct Range {
    column: String,
    min: Option<f64>,
    max: Option<f64>,
}

impl Range {
    pub fn new(column: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            column: column.into(),
            min,
            max,
        }
    }

    pub fn at_least(column: impl Into<String>, min: f64) -> Self {
        Self::new(column, Some(min), None)
    }

    pub fn at_most(column: impl Into<String>, max: f64) -> Self {
        Self::new(column, None, Some(max))
    }
}

impl Predicate for Range {
    fn name(&self) -> String {
        "Range".to_string()
    }

    fn evaluate(&self, dataset: &Dataset) -> Result<BooleanArray, RuleError> {
        let array = dataset.column(&self.column)?;
        let options = CastOptions {
            safe: false,
            ..Default::default()
        };
        let casted = compute::cast_with_options(array, &DataType::Float64, &options)
            .map_err(|e| RuleError::TypeCastError(self.column.clone(), e.to_string()))?;
        let values = casted.as_primitive::<Float64Type>();

        let mut mask = BooleanArray::from(vec![false; values.len()]);
        if let Some(min) = self.min {
            let below = cmp::lt(values, &Float64Array::new_scalar(min))?;
            mask = compute::or(&mask, &below)?;
        }
        if let Some(max) = self.max {
            let above = cmp::gt(values, &Float64Array::new_scalar(max))?;
            mask = compute::or(&mask, &above)?;
        }
        Ok(normalize_mask(mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
    use std::sync::Arc;

    fn years(values: Vec<Option<i64>>) -> Dataset {
        Dataset::try_from_columns(vec![(
            "year",
            Arc::new(Int64Array::from(values)) as ArrayRef,
        )])
        .unwrap()
    }

    #[test]
    fn test_range_min() {
        let ds = years(vec![Some(1850), Some(2001), Some(1999)]);
        let mask = Range::at_least("year", 1900.0).evaluate(&ds).unwrap();
        assert_eq!(mask.true_count(), 1);
        assert!(mask.value(0));
    }

    #[test]
    fn test_range_between_is_inclusive() {
        let ds = years(vec![Some(0), Some(120), Some(-5), Some(150)]);
        let mask = Range::new("year", Some(0.0), Some(120.0))
            .evaluate(&ds)
            .unwrap();
        let flagged: Vec<bool> = mask.iter().map(|v| v.unwrap_or(false)).collect();
        assert_eq!(flagged, vec![false, false, true, true]);
    }

    #[test]
    fn test_range_ignores_nulls() {
        let ds = years(vec![None, Some(1950), None, Some(1800)]);
        let mask = Range::at_most("year", 1900.0).evaluate(&ds).unwrap();
        assert_eq!(mask.null_count(), 0);
        assert!(!mask.value(0));
        assert!(mask.value(1));
        assert!(!mask.value(2));
        assert_eq!(mask.true_count(), 1);

        let mask = Range::new("year", Some(1900.0), Some(1920.0))
            .evaluate(&ds)
            .unwrap();
        let flagged: Vec<bool> = mask.iter().map(|v| v.unwrap_or(true)).collect();
        assert_eq!(flagged, vec![false, true, false, true]);
    }

    #[test]
    fn test_range_numeric_strings() {
        let ds = Dataset::try_from_columns(vec![(
            "price",
            Arc::new(StringArray::from(vec!["10.5", "-1"])) as ArrayRef,
        )])
        .unwrap();
        let mask = Range::at_least("price", 0.0).evaluate(&ds).unwrap();
        assert_eq!(mask.true_count(), 1);
        assert_eq!(mask.len(), 2);
    }

    #[test]
    fn test_range_on_text_fails() {
        let ds = Dataset::try_from_columns(vec![(
            "year",
            Arc::new(StringArray::from(vec!["1999", "nineteen"])) as ArrayRef,
        )])
        .unwrap();
        let res = Range::at_least("year", 1900.0).evaluate(&ds);
        assert!(matches!(res, Err(RuleError::TypeCastError(c, _)) if c == "year"));
    }
}
