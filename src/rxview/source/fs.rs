use super::{parse_records, RecordSource};
use crate::error::{Result, RxviewError};
use crate::model::Record;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads records from a JSON export on disk. Every fetch rereads the file.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_page(&mut self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Err(RxviewError::Source(format!(
                "records file not found: {}",
                self.path.display()
            )));
        }
        let content = fs::read_to_string(&self.path)?;
        let records = parse_records(&content)?;
        tracing::info!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }
}
