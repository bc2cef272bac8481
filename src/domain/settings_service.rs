//! Service for the persisted alert settings.

use anyhow::Result;
use log::info;

use crate::domain::commands::settings::UpdateSettingsCommand;
use crate::domain::dates;
use crate::domain::models::settings::AlertSettings;
use crate::storage::csv::{CsvConnection, SettingsRepository};
use crate::storage::traits::SettingsStorage;

#[derive(Debug, Clone)]
pub struct SettingsService {
    repository: SettingsRepository,
}

impl SettingsService {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            repository: SettingsRepository::new(connection),
        }
    }

    /// Persisted settings merged over the defaults.
    pub fn get(&self) -> Result<AlertSettings> {
        self.repository.load()
    }

    /// Merge the provided fields into the persisted settings.
    /// Unspecified fields keep their current value.
    pub fn set(&self, command: UpdateSettingsCommand) -> Result<AlertSettings> {
        let mut settings = self.repository.load()?;
        if let Some(raw) = command.stock_threshold {
            settings.stock_threshold = dates::parse_quantity(&raw);
        }
        if let Some(raw) = command.expiry_months {
            settings.expiry_months = dates::parse_quantity(&raw);
        }
        self.repository.save(&settings)?;
        info!(
            "Applied alert settings: threshold={}, window={} months",
            settings.stock_threshold, settings.expiry_months
        );
        Ok(settings)
    }

    /// Drop the persisted settings, restoring defaults.
    pub fn reset(&self) -> Result<()> {
        self.repository.clear()
    }
}
