use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    /// Registration used a name outside the five canonical dimensions
    #[error("Unknown dimension '{0}'. Expected one of: Accuracy, Completeness, Uniqueness, Timeliness, Consistency")]
    InvalidDimension(String),

    /// A rule declared a column the dataset does not have
    #[error("Rule '{rule}' declares column '{column}' which is not in the dataset")]
    ColumnProjectionError { rule: String, column: String },

    /// The predicate itself failed while being evaluated
    #[error("Predicate of rule '{rule}' failed: {message}")]
    PredicateEvaluationError { rule: String, message: String },

    /// Column not found in the dataset
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The value could not be cast to the expected type
    #[error("Failed to cast column '{0}' to type {1}")]
    TypeCastError(String, String),

    /// A regex pattern did not compile
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The Arrow kernel produced an error (e.g., unsupported cast)
    #[error("Arrow computation error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet decoding error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// CSV reading or IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// File extension is neither csv nor parquet
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    /// Generic validation error with message
    #[error("Validation error: {0}")]
    ValidationError(String),
}
