/// Options for loading a dataset from disk.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub batch_size: usize,
    pub delimiter: u8,
    /// Infer column types from the data; when off every CSV column is read as text
    pub infer_schema: bool,
    /// Records sampled for type inference, `None` for the whole file
    pub infer_records: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 128 * 1024,
            delimiter: b',',
            infer_schema: true,
            infer_records: None,
        }
    }
}

pub struct ReaderConfigBuilder {
    batch_size: usize,
    delimiter: u8,
    infer_schema: bool,
    infer_records: Option<usize>,
}

impl Default for ReaderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderConfigBuilder {
    /// Create a new [`ReaderConfigBuilder`]
    pub fn new() -> Self {
        let reader = ReaderConfig::default();
        Self {
            batch_size: reader.batch_size,
            delimiter: reader.delimiter,
            infer_schema: reader.infer_schema,
            infer_records: reader.infer_records,
        }
    }

    /// Build a [`ReaderConfig`]
    pub fn build(self) -> ReaderConfig {
        ReaderConfig {
            batch_size: self.batch_size.max(1),
            delimiter: self.delimiter,
            infer_schema: self.infer_schema,
            infer_records: self.infer_records,
        }
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_infer_schema(mut self, infer: bool) -> Self {
        self.infer_schema = infer;
        self
    }

    pub fn with_infer_records(mut self, records: Option<usize>) -> Self {
        self.infer_records = records;
        self
    }
}
