use std::{
    fs::File,
    io::{Seek, SeekFrom},
    sync::Arc,
};

use arrow::{
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema, SchemaRef},
};
use tracing::warn;

use crate::{readers::ReaderConfig, Batches, Dataset, RuleError};

/// Schema from the header row, typed by inference or as all-UTF-8.
fn csv_generate_schema(file: &mut File, config: &ReaderConfig) -> Result<Schema, RuleError> {
    let format = csv_format(config);
    let (schema, _) = format.infer_schema(&mut *file, config.infer_records)?;
    file.seek(SeekFrom::Start(0))?;

    if config.infer_schema {
        return Ok(schema);
    }
    Ok(text_schema(&schema))
}

fn text_schema(schema: &Schema) -> Schema {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect();
    Schema::new(fields)
}

fn csv_format(config: &ReaderConfig) -> Format {
    Format::default()
        .with_header(true)
        .with_delimiter(config.delimiter)
}

fn read_batches(file: File, schema: SchemaRef, config: &ReaderConfig) -> Result<Dataset, RuleError> {
    let reader = ReaderBuilder::new(schema.clone())
        .with_format(csv_format(config))
        .with_batch_size(config.batch_size)
        .build(file)?;

    let mut batches: Batches = Vec::new();
    for batch_result in reader {
        batches.push(Arc::new(batch_result?));
    }
    Dataset::from_batches(schema, &batches)
}

/// Read a whole CSV file into one dataset.
///
/// With inference on, a value that does not decode under the inferred types
/// (only possible when inference sampled part of the file) makes the whole
/// file load again as text, so dirty rows still reach the audit.
pub fn read_csv(path: &str, config: &ReaderConfig) -> Result<Dataset, RuleError> {
    let mut file = File::open(path)?;
    let schema = Arc::new(csv_generate_schema(&mut file, config)?);

    match read_batches(file, schema.clone(), config) {
        Err(RuleError::ArrowError(e)) if config.infer_schema => {
            warn!(path, error = %e, "typed CSV decoding failed, reading every column as text");
            let file = File::open(path)?;
            read_batches(file, Arc::new(text_schema(&schema)), config)
        }
        other => other,
    }
}
