use std::collections::HashSet;

use arrow::{
    array::{Array, BooleanArray, StringArray},
    compute,
};

use crate::{
    rules::{utf8_column, Predicate},
    utils::hasher::{hash_row, Xxh3Builder},
    Dataset, RuleError,
};

/// Flags rows where `column` is missing.
#[derive(Debug, Clone)]
pub struct NullCheck {
    column: String,
}

impl NullCheck {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Predicate for NullCheck {
    fn name(&self) -> String {
        "NullCheck".to_string()
    }

    fn evaluate(&self, dataset: &Dataset) -> Result<BooleanArray, RuleError> {
        let array = dataset.column(&self.column)?;
        Ok(compute::is_null(array.as_ref())?)
    }
}

/// Flags every occurrence of a value, or value tuple, after its first one in row order.
///
/// Missing values compare equal to each other.
#[derive(Debug, Clone)]
pub struct UnicityCheck {
    columns: Vec<String>,
}

impl UnicityCheck {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            columns: vec![column.into()],
        }
    }

    pub fn over<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate for UnicityCheck {
    fn name(&self) -> String {
        "UnicityCheck".to_string()
    }

    fn evaluate(&self, dataset: &Dataset) -> Result<BooleanArray, RuleError> {
        if self.columns.is_empty() {
            return Err(RuleError::ValidationError(
                "UnicityCheck needs at least one column".to_string(),
            ));
        }
        let arrays = self
            .columns
            .iter()
            .map(|c| utf8_column(dataset, c))
            .collect::<Result<Vec<StringArray>, _>>()?;

        let mut seen = HashSet::with_capacity_and_hasher(dataset.num_rows(), Xxh3Builder);
        let mut row: Vec<Option<&str>> = Vec::with_capacity(arrays.len());
        let mask = (0..dataset.num_rows())
            .map(|i| {
                row.clear();
                row.extend(
                    arrays
                        .iter()
                        .map(|a| if a.is_null(i) { None } else { Some(a.value(i)) }),
                );
                Some(!seen.insert(hash_row(&row)))
            })
            .collect();
        Ok(mask)
    }
}
