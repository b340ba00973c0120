use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::TradeRow;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Read(String),
    #[error("failed to parse dataset: {0}")]
    Parse(String),
}

/// Trade dataset rows loaded from a JSON file on disk.
///
/// The file is re-read on every request. It is small (tens of rows)
/// and re-reading lets the publications team swap it without a
/// restart.
#[derive(Debug, Clone)]
pub struct JsonFileDataset {
    path: PathBuf,
}

impl JsonFileDataset {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileDataset {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub async fn load_rows(&self) -> Result<Vec<TradeRow>, DatasetError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| DatasetError::Read(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_slice(&bytes).map_err(|e| DatasetError::Parse(e.to_string()))
    }
}
