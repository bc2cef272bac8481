//! CsvConnection manages the data directory and per-collection file paths.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::models::record::RecordKind;
use crate::storage::error::StorageError;

/// Handle to the base data directory holding all collection files.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a connection rooted at `base_directory`, creating the
    /// directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base = base_directory.as_ref().to_path_buf();
        if !base.exists() {
            fs::create_dir_all(&base).map_err(|source| StorageError::CreateDir {
                path: base.clone(),
                source,
            })?;
        }
        Ok(Self {
            base_directory: base,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// CSV file holding one kind's record collection.
    pub fn record_file_path(&self, kind: RecordKind) -> PathBuf {
        self.base_directory
            .join(format!("{}.csv", kind.storage_key()))
    }

    /// YAML file holding the alert settings.
    pub fn settings_file_path(&self) -> PathBuf {
        self.base_directory.join("settings.yaml")
    }
}
