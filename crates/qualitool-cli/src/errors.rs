use qualitool_core::RuleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown rule kind '{kind}' for rule '{rule}'. Supported: null, range, regex, length, unique, date, is_in")]
    UnknownKind { kind: String, rule: String },
    #[error("Rule '{rule}' of kind '{kind}' requires field '{field}'")]
    MissingField {
        rule: String,
        kind: String,
        field: String,
    },
    #[error("Rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },
    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(String),
    #[error(transparent)]
    Core(#[from] RuleError),
}
