//! YAML-backed settings repository.
//!
//! The alert settings persist as a single `settings.yaml` at the root of
//! the data directory:
//!
//! ```yaml
//! stock_threshold: 10
//! expiry_months: 1
//! ```
//!
//! A missing or unparsable file reads as the defaults; writes go through
//! a temp file renamed over the original.

use anyhow::Result;
use log::{debug, warn};
use std::fs;
use std::path::PathBuf;

use crate::domain::models::settings::AlertSettings;
use crate::storage::csv::connection::CsvConnection;
use crate::storage::error::StorageError;
use crate::storage::traits::SettingsStorage;

/// Repository for the single persisted settings blob.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    connection: CsvConnection,
}

impl SettingsRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn settings_path(&self) -> PathBuf {
        self.connection.settings_file_path()
    }
}

impl SettingsStorage for SettingsRepository {
    fn load(&self) -> Result<AlertSettings> {
        let path = self.settings_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                debug!("No settings file at {:?}, using defaults", path);
                return Ok(AlertSettings::default());
            }
        };
        match serde_yaml::from_str(&content) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("Settings file {:?} is not valid YAML: {}. Using defaults.", path, e);
                Ok(AlertSettings::default())
            }
        }
    }

    fn save(&self, settings: &AlertSettings) -> Result<()> {
        let path = self.settings_path();
        let temp_path = path.with_extension("yaml.tmp");
        let yaml = serde_yaml::to_string(settings).map_err(|source| StorageError::Encode {
            path: path.clone(),
            source: Box::new(source),
        })?;
        fs::write(&temp_path, yaml).map_err(|source| StorageError::Write {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Saved alert settings to {:?}", path);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.settings_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write { path, source }.into()),
        }
    }
}
