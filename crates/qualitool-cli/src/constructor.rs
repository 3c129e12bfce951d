use qualitool_core::{
    rules::{DateParseCheck, IsInCheck, NullCheck, Range, RegexMatch, StringLengthCheck, UnicityCheck},
    Dataset, Rule, RuleRegistry,
};
use tracing::debug;

use crate::{errors::ConfigError, parser::RuleConfig};

/// Register every configured rule against `dataset`.
pub fn construct_registry(dataset: Dataset, rules: &[RuleConfig]) -> Result<RuleRegistry, ConfigError> {
    let mut registry = RuleRegistry::new(dataset);
    for config in rules {
        let rule = construct_rule(config)?;
        registry.add_rule(&config.dimension, rule)?;
    }
    debug!(rules = registry.len(), "registry built");
    Ok(registry)
}

/// Rules flagged `clean = true`, in configuration order.
pub fn construct_cleaning_rules(rules: &[RuleConfig]) -> Result<Vec<Rule>, ConfigError> {
    rules
        .iter()
        .filter(|r| r.clean)
        .map(construct_rule)
        .collect()
}

pub fn construct_rule(config: &RuleConfig) -> Result<Rule, ConfigError> {
    let description = config
        .description
        .clone()
        .unwrap_or_else(|| default_description(config));

    let missing = |field: &str| ConfigError::MissingField {
        rule: description.clone(),
        kind: config.kind.clone(),
        field: field.to_string(),
    };
    let invalid = |message: String| ConfigError::InvalidRule {
        rule: description.clone(),
        message,
    };

    let (rule, own_columns) = match config.kind.as_str() {
        "null" => {
            let column = config.column.as_deref().ok_or_else(|| missing("column"))?;
            (
                Rule::new(NullCheck::new(column), description.clone()),
                vec![column.to_string()],
            )
        }
        "range" => {
            let column = config.column.as_deref().ok_or_else(|| missing("column"))?;
            if config.min.is_none() && config.max.is_none() {
                return Err(missing("min or max"));
            }
            if let (Some(min), Some(max)) = (config.min, config.max) {
                if min > max {
                    return Err(invalid(format!("min {} is greater than max {}", min, max)));
                }
            }
            (
                Rule::new(Range::new(column, config.min, config.max), description.clone()),
                vec![column.to_string()],
            )
        }
        "regex" => {
            let column = config.column.as_deref().ok_or_else(|| missing("column"))?;
            let pattern = config.pattern.as_deref().ok_or_else(|| missing("pattern"))?;
            let check = RegexMatch::new(column, pattern, config.flag.clone())?;
            (
                Rule::new(check, description.clone()),
                vec![column.to_string()],
            )
        }
        "length" => {
            let column = config.column.as_deref().ok_or_else(|| missing("column"))?;
            if config.min_length.is_none() && config.max_length.is_none() {
                return Err(missing("min_length or max_length"));
            }
            if let (Some(min), Some(max)) = (config.min_length, config.max_length) {
                if min > max {
                    return Err(invalid(format!(
                        "min_length {} is greater than max_length {}",
                        min, max
                    )));
                }
            }
            (
                Rule::new(
                    StringLengthCheck::new(column, config.min_length, config.max_length),
                    description.clone(),
                ),
                vec![column.to_string()],
            )
        }
        "unique" => {
            let columns = match (&config.over, &config.column) {
                (Some(over), _) if !over.is_empty() => over.clone(),
                (_, Some(column)) => vec![column.clone()],
                _ => return Err(missing("column")),
            };
            (
                Rule::new(UnicityCheck::over(columns.iter()), description.clone()),
                columns,
            )
        }
        "date" => {
            let column = config.column.as_deref().ok_or_else(|| missing("column"))?;
            let check = match &config.formats {
                Some(formats) => DateParseCheck::with_formats(column, formats.iter()),
                None => DateParseCheck::new(column),
            };
            (Rule::new(check, description.clone()), vec![column.to_string()])
        }
        "is_in" => {
            let column = config.column.as_deref().ok_or_else(|| missing("column"))?;
            let members = config.members.as_ref().ok_or_else(|| missing("members"))?;
            (
                Rule::new(IsInCheck::new(column, members.iter()), description.clone()),
                vec![column.to_string()],
            )
        }
        other => {
            return Err(ConfigError::UnknownKind {
                kind: other.to_string(),
                rule: description,
            })
        }
    };

    let columns = config.columns.clone().unwrap_or(own_columns);
    Ok(rule.with_columns(columns))
}

fn default_description(config: &RuleConfig) -> String {
    let target = match (&config.over, &config.column) {
        (Some(over), _) if !over.is_empty() => over.join(", "),
        (_, Some(column)) => column.clone(),
        _ => "?".to_string(),
    };
    format!("{} {}", target, config.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qualitool_core::{
        readers::{read_dataset, ReaderConfigBuilder},
        Dimension, RuleError,
    };
    use std::fs;
    use tempfile::TempDir;

    fn rule_config(toml_str: &str) -> RuleConfig {
        toml::from_str(toml_str).unwrap()
    }

    fn titles(dir: &TempDir) -> Dataset {
        let path = dir.path().join("titles.csv");
        fs::write(
            &path,
            "show_id,type,release_year\ns1,Movie,1850\ns2,TV Show,2001\ns1,Film,1999\n",
        )
        .unwrap();
        read_dataset(
            path.to_str().unwrap(),
            &ReaderConfigBuilder::new().build(),
        )
        .unwrap()
    }

    #[test]
    fn test_range_rule_defaults_columns_and_description() {
        let rule = construct_rule(&rule_config(
            "dimension = \"Accuracy\"\nkind = \"range\"\ncolumn = \"release_year\"\nmin = 1900",
        ))
        .unwrap();
        assert_eq!(rule.description(), "release_year range");
        assert_eq!(rule.columns().unwrap(), ["release_year".to_string()]);
    }

    #[test]
    fn test_explicit_columns_override() {
        let rule = construct_rule(&rule_config(
            "dimension = \"Completeness\"\nkind = \"null\"\ncolumn = \"director\"\ncolumns = [\"show_id\", \"director\"]",
        ))
        .unwrap();
        assert_eq!(
            rule.columns().unwrap(),
            ["show_id".to_string(), "director".to_string()]
        );
    }

    #[test]
    fn test_composite_unique_uses_key_columns() {
        let rule = construct_rule(&rule_config(
            "dimension = \"Uniqueness\"\nkind = \"unique\"\nover = [\"title\", \"director\"]",
        ))
        .unwrap();
        assert_eq!(rule.description(), "title, director unique");
        assert_eq!(rule.columns().unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_kind() {
        let res = construct_rule(&rule_config(
            "dimension = \"Accuracy\"\nkind = \"sorted\"\ncolumn = \"x\"",
        ));
        assert!(matches!(res, Err(ConfigError::UnknownKind { .. })));
    }

    #[test]
    fn test_missing_fields() {
        let res = construct_rule(&rule_config("dimension = \"Accuracy\"\nkind = \"null\""));
        assert!(matches!(res, Err(ConfigError::MissingField { ref field, .. }) if field == "column"));

        let res = construct_rule(&rule_config(
            "dimension = \"Accuracy\"\nkind = \"range\"\ncolumn = \"x\"",
        ));
        assert!(matches!(res, Err(ConfigError::MissingField { .. })));

        let res = construct_rule(&rule_config(
            "dimension = \"Consistency\"\nkind = \"is_in\"\ncolumn = \"type\"",
        ));
        assert!(matches!(res, Err(ConfigError::MissingField { ref field, .. }) if field == "members"));
    }

    #[test]
    fn test_inverted_bounds() {
        let res = construct_rule(&rule_config(
            "dimension = \"Accuracy\"\nkind = \"range\"\ncolumn = \"x\"\nmin = 10\nmax = 1",
        ));
        assert!(matches!(res, Err(ConfigError::InvalidRule { .. })));
    }

    #[test]
    fn test_bad_pattern() {
        let res = construct_rule(&rule_config(
            "dimension = \"Consistency\"\nkind = \"regex\"\ncolumn = \"x\"\npattern = \"(\"",
        ));
        assert!(matches!(
            res,
            Err(ConfigError::Core(RuleError::InvalidPattern { .. }))
        ));
    }

    #[test]
    fn test_construct_registry() {
        let dir = TempDir::new().unwrap();
        let rules = vec![
            rule_config("dimension = \"Accuracy\"\nkind = \"range\"\ncolumn = \"release_year\"\nmin = 1900"),
            rule_config("dimension = \"Uniqueness\"\nkind = \"unique\"\ncolumn = \"show_id\""),
            rule_config("dimension = \"Consistency\"\nkind = \"is_in\"\ncolumn = \"type\"\nmembers = [\"Movie\", \"TV Show\"]\nclean = true"),
        ];
        let registry = construct_registry(titles(&dir), &rules).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.rules(Dimension::Accuracy).len(), 1);

        let report = registry.run();
        assert_eq!(report.total_violations(), 3);
        assert_eq!(report.failed_rules(), 0);

        let cleaning = construct_cleaning_rules(&rules).unwrap();
        assert_eq!(cleaning.len(), 1);
        assert_eq!(cleaning[0].description(), "type is_in");
    }

    #[test]
    fn test_lowercase_dimension_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let rules = vec![rule_config(
            "dimension = \"accuracy\"\nkind = \"null\"\ncolumn = \"type\"",
        )];
        let res = construct_registry(titles(&dir), &rules);
        assert!(matches!(
            res,
            Err(ConfigError::Core(RuleError::InvalidDimension(ref d))) if d == "accuracy"
        ));
    }

    #[test]
    fn test_legacy_dimension_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let rules = vec![rule_config(
            "dimension = \"Accurate\"\nkind = \"null\"\ncolumn = \"type\"",
        )];
        let res = construct_registry(titles(&dir), &rules);
        assert!(matches!(
            res,
            Err(ConfigError::Core(RuleError::InvalidDimension(_)))
        ));
    }
}
