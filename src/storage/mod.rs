//! Filesystem storage for courses, rounds and handicap history.
//!
//! Every record type lives in one JSONL file under the data directory:
//! - `courses.jsonl`
//! - `rounds.jsonl`
//! - `handicap_history.jsonl`

pub mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn courses_path(&self) -> PathBuf {
        self.data_dir.join(RecordType::Course.filename())
    }

    pub fn rounds_path(&self) -> PathBuf {
        self.data_dir.join(RecordType::Round.filename())
    }

    pub fn handicap_history_path(&self) -> PathBuf {
        self.data_dir.join(RecordType::HandicapEntry.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
