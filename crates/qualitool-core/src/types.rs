pub type Batch = arrow::record_batch::RecordBatch;
pub type Batches = Vec<std::sync::Arc<Batch>>;
