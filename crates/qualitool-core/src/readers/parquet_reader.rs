use std::{fs::File, sync::Arc};

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::{readers::ReaderConfig, Batches, Dataset, RuleError};

/// Read a whole Parquet file into one dataset.
pub fn read_parquet(path: &str, config: &ReaderConfig) -> Result<Dataset, RuleError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();

    let reader = builder.with_batch_size(config.batch_size).build()?;

    let mut batches: Batches = Vec::new();
    for batch_result in reader {
        batches.push(Arc::new(batch_result?));
    }
    Dataset::from_batches(schema, &batches)
}
