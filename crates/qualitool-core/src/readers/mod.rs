//! Dataset loading.
//!
//! CSV files are read with a header row; column types are inferred unless the
//! configuration asks for plain text. Parquet files keep their stored schema.
//! Either way the batches are merged into a single [`Dataset`].

mod config;
pub mod csv_reader;
pub mod parquet_reader;

use std::path::Path;

use tracing::info;

use crate::{Dataset, RuleError};

pub use config::{ReaderConfig, ReaderConfigBuilder};
pub use csv_reader::read_csv;
pub use parquet_reader::read_parquet;

/// File format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Parquet,
}

impl FileFormat {
    /// Detect format from file extension
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(FileFormat::Csv),
            "parquet" => Some(FileFormat::Parquet),
            _ => None,
        }
    }
}

/// Load a dataset, picking the reader from the file extension.
pub fn read_dataset(path: &str, config: &ReaderConfig) -> Result<Dataset, RuleError> {
    let format =
        FileFormat::from_path(path).ok_or_else(|| RuleError::UnsupportedFormat(path.to_string()))?;
    let dataset = match format {
        FileFormat::Csv => read_csv(path, config)?,
        FileFormat::Parquet => read_parquet(path, config)?,
    };
    info!(
        path,
        rows = dataset.num_rows(),
        columns = dataset.num_columns(),
        "dataset loaded"
    );
    Ok(dataset)
}
