//! Immutable tabular dataset audited by the engine.
//!
//! A [`Dataset`] is a single Arrow `RecordBatch` behind an `Arc`, so cloning it
//! is cheap and every rule reads the same snapshot.

use std::{fs::File, path::Path, sync::Arc};

use arrow::{
    array::{ArrayRef, BooleanArray},
    compute::{concat_batches, filter_record_batch},
    csv::WriterBuilder,
    datatypes::SchemaRef,
};

use crate::{Batch, RuleError};

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    batch: Arc<Batch>,
}

impl Dataset {
    pub fn new(batch: Batch) -> Self {
        Self {
            batch: Arc::new(batch),
        }
    }

    /// Build a dataset from named columns, in order.
    pub fn try_from_columns<I, S>(columns: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (S, ArrayRef)>,
        S: AsRef<str>,
    {
        let batch = Batch::try_from_iter(columns)?;
        Ok(Self::new(batch))
    }

    /// Merge reader batches into one dataset.
    pub fn from_batches(schema: SchemaRef, batches: &[Arc<Batch>]) -> Result<Self, RuleError> {
        let batch = concat_batches(&schema, batches.iter().map(|b| b.as_ref()))?;
        Ok(Self::new(batch))
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<&ArrayRef, RuleError> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| RuleError::ColumnNotFound(name.to_string()))
    }

    /// Resolve column names to indices in the dataset's own column order.
    ///
    /// Repeated names collapse to a single index.
    pub fn column_indices<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>, RuleError> {
        let schema = self.batch.schema();
        let mut indices = names
            .iter()
            .map(|name| {
                schema
                    .index_of(name.as_ref())
                    .map_err(|_| RuleError::ColumnNotFound(name.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        indices.sort_unstable();
        indices.dedup();
        Ok(indices)
    }

    /// Rows where `mask` is true. Null mask entries drop the row.
    pub fn filter(&self, mask: &BooleanArray) -> Result<Batch, RuleError> {
        Ok(filter_record_batch(&self.batch, mask)?)
    }

    /// Write the dataset as CSV with a header row, replacing any existing file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), RuleError> {
        let file = File::create(path)?;
        let mut writer = WriterBuilder::new().with_header(true).build(file);
        writer.write(&self.batch)?;
        Ok(())
    }
}

impl From<Batch> for Dataset {
    fn from(batch: Batch) -> Self {
        Self::new(batch)
    }
}
