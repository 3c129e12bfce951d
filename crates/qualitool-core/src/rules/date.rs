use arrow::{
    array::{Array, BooleanArray},
    compute,
    datatypes::DataType,
};

use crate::{
    rules::{utf8_column, Predicate},
    utils::date_parser::{parse_date_column, DEFAULT_DATE_FORMATS},
    Dataset, RuleError,
};

/// Flags values that are missing or do not parse as a date under any of `formats`.
///
/// Columns already typed as dates or timestamps only fail on missing values.
#[derive(Debug, Clone)]
pub struct DateParseCheck {
    column: String,
    formats: Vec<String>,
}

impl DateParseCheck {
    /// Check against the built-in list of common formats.
    pub fn new(column: impl Into<String>) -> Self {
        Self::with_formats(column, DEFAULT_DATE_FORMATS.iter().copied())
    }

    pub fn with_formats<I, S>(column: impl Into<String>, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate for DateParseCheck {
    fn name(&self) -> String {
        "DateParseCheck".to_string()
    }

    fn evaluate(&self, dataset: &Dataset) -> Result<BooleanArray, RuleError> {
        let array = dataset.column(&self.column)?;
        match array.data_type() {
            DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
                Ok(compute::is_null(array.as_ref())?)
            }
            _ => {
                let strings = utf8_column(dataset, &self.column)?;
                let parsed = parse_date_column(&strings, &self.formats);
                Ok(compute::is_null(&parsed)?)
            }
        }
    }
}
