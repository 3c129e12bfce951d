use std::collections::HashSet;

use arrow::{array::BooleanArray, compute};
use arrow_string::regexp::regexp_is_match_scalar;
use regex::Regex;
use xxhash_rust::xxh3::xxh3_64;

use crate::{
    rules::{utf8_column, Predicate},
    utils::hasher::Xxh3Builder,
    Dataset, RuleError,
};

/// Flags values in which `pattern` is not found. Missing values are not flagged.
#[derive(Debug, Clone)]
pub struct RegexMatch {
    column: String,
    pattern: String,
    flag: Option<String>,
}

impl RegexMatch {
    pub fn new(
        column: impl Into<String>,
        pattern: impl Into<String>,
        flag: Option<String>,
    ) -> Result<Self, RuleError> {
        let pattern = pattern.into();
        Regex::new(&pattern).map_err(|e| RuleError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            column: column.into(),
            pattern,
            flag,
        })
    }
}

impl Predicate for RegexMatch {
    fn name(&self) -> String {
        "RegexMatch".to_string()
    }

    fn evaluate(&self, dataset: &Dataset) -> Result<BooleanArray, RuleError> {
        let array = utf8_column(dataset, &self.column)?;
        let matched = regexp_is_match_scalar(&array, &self.pattern, self.flag.as_deref())?;
        Ok(compute::not(&matched)?)
    }
}

/// Flags text whose length in characters falls outside `[min, max]`.
#[derive(Debug, Clone)]
pub struct StringLengthCheck {
    column: String,
    min: Option<usize>,
    max: Option<usize>,
}

impl StringLengthCheck {
    pub fn new(column: impl Into<String>, min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            column: column.into(),
            min,
            max,
        }
    }
}

impl Predicate for StringLengthCheck {
    fn name(&self) -> String {
        "StringLengthCheck".to_string()
    }

    fn evaluate(&self, dataset: &Dataset) -> Result<BooleanArray, RuleError> {
        let array = utf8_column(dataset, &self.column)?;
        Ok(array
            .iter()
            .map(|v| {
                v.map(|s| {
                    let len = s.chars().count();
                    self.min.is_some_and(|min| len < min) || self.max.is_some_and(|max| len > max)
                })
            })
            .collect())
    }
}

/// Flags values outside an allowed set. A missing value is outside every set.
#[derive(Debug, Clone)]
pub struct IsInCheck {
    column: String,
    members: HashSet<u64, Xxh3Builder>,
}

impl IsInCheck {
    pub fn new<I, S>(column: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hashset = HashSet::with_hasher(Xxh3Builder);
        members.into_iter().for_each(|m| {
            let hash = xxh3_64(m.as_ref().as_bytes());
            let _ = hashset.insert(hash);
        });
        Self {
            column: column.into(),
            members: hashset,
        }
    }
}

impl Predicate for IsInCheck {
    fn name(&self) -> String {
        "IsInCheck".to_string()
    }

    fn evaluate(&self, dataset: &Dataset) -> Result<BooleanArray, RuleError> {
        let array = utf8_column(dataset, &self.column)?;
        Ok(array
            .iter()
            .map(|v| match v {
                Some(s) => Some(!self.members.contains(&xxh3_64(s.as_bytes()))),
                None => Some(true),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, ArrayRef, StringArray};
    use std::sync::Arc;

    fn text(values: Vec<Option<&str>>) -> Dataset {
        Dataset::try_from_columns(vec![(
            "value",
            Arc::new(StringArray::from(values)) as ArrayRef,
        )])
        .unwrap()
    }

    #[test]
    fn test_regex_search_semantics() {
        let ds = text(vec![Some("90 min"), Some("2 Seasons"), Some("unknown"), None]);
        let rule = RegexMatch::new("value", r"\d+", None).unwrap();
        let mask = rule.evaluate(&ds).unwrap();
        assert!(!mask.value(0));
        assert!(!mask.value(1));
        assert!(mask.value(2));
        assert!(mask.is_null(3));
    }

    #[test]
    fn test_regex_case_insensitive_flag() {
        let ds = text(vec![Some("MOVIE"), Some("show")]);
        let rule = RegexMatch::new("value", "^movie$", Some("i".to_string())).unwrap();
        let mask = rule.evaluate(&ds).unwrap();
        assert_eq!(mask.true_count(), 1);
    }

    #[test]
    fn test_regex_invalid_pattern() {
        let res = RegexMatch::new("value", "[a-z", None);
        assert!(matches!(res, Err(RuleError::InvalidPattern { .. })));
    }

    #[test]
    fn test_length_counts_characters() {
        let ds = text(vec![Some("电影"), Some("a"), Some("abcdef"), None]);
        let mask = StringLengthCheck::new("value", Some(2), Some(5))
            .evaluate(&ds)
            .unwrap();
        assert!(!mask.value(0));
        assert!(mask.value(1));
        assert!(mask.value(2));
        assert!(mask.is_null(3));
    }

    #[test]
    fn test_is_in_flags_missing_and_unknown() {
        let ds = text(vec![Some("Movie"), Some("TV Show"), Some("Podcast"), None]);
        let mask = IsInCheck::new("value", ["Movie", "TV Show"])
            .evaluate(&ds)
            .unwrap();
        assert_eq!(mask, BooleanArray::from(vec![false, false, true, true]));
    }
}
