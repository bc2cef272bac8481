//! Service managing inventory rows and their risk classification.

use anyhow::Result;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::classifier::{self, AlertCounts};
use crate::domain::clock::Clock;
use crate::domain::commands::inventory::{
    AddInventoryCommand, ClassifiedRow, InventoryListQuery, InventoryListResult,
    UpdateInventoryCommand,
};
use crate::domain::dates;
use crate::domain::models::record::{InventoryRecord, RecordKind};
use crate::domain::settings_service::SettingsService;
use crate::storage::csv::{CsvConnection, InventoryRepository};
use crate::storage::traits::RecordStorage;

#[derive(Clone)]
pub struct InventoryService {
    repository: InventoryRepository,
    settings_service: SettingsService,
    clock: Arc<dyn Clock>,
}

impl InventoryService {
    pub fn new(
        connection: CsvConnection,
        settings_service: SettingsService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let repository = InventoryRepository::new(connection, RecordKind::Inventory);
        Self {
            repository,
            settings_service,
            clock,
        }
    }

    /// Create a new inventory row from raw form fields.
    pub fn add(&self, command: AddInventoryCommand) -> Result<InventoryRecord> {
        let now = self.clock.now();
        let record = InventoryRecord {
            id: RecordKind::Inventory.generate_id(now.timestamp_millis() as u64),
            date: dates::normalize_date(&command.date),
            inventaire_num: command.inventaire_num.trim().to_string(),
            code: command.code.trim().to_string(),
            produit: command.produit.trim().to_string(),
            quantite: dates::parse_quantity(&command.quantite),
            quantite_comparee: dates::parse_quantity(&command.quantite_comparee),
            date_expiration: dates::normalize_date(&command.date_expiration),
            created_at: now,
            updated_at: now,
        };
        self.repository.append(&record)?;
        info!("Added inventory record {} ({})", record.id, record.produit);
        Ok(record)
    }

    /// Merge the provided fields into an existing row and stamp
    /// `updated_at`. Returns false without mutating anything when the id
    /// is unknown.
    pub fn update(&self, command: UpdateInventoryCommand) -> Result<bool> {
        let Some(mut record) = self
            .repository
            .list()?
            .into_iter()
            .find(|r| r.id == command.id)
        else {
            warn!("Inventory record not found: {}", command.id);
            return Ok(false);
        };

        if let Some(date) = command.date {
            record.date = dates::normalize_date(&date);
        }
        if let Some(num) = command.inventaire_num {
            record.inventaire_num = num.trim().to_string();
        }
        if let Some(code) = command.code {
            record.code = code.trim().to_string();
        }
        if let Some(produit) = command.produit {
            record.produit = produit.trim().to_string();
        }
        if let Some(quantite) = command.quantite {
            record.quantite = dates::parse_quantity(&quantite);
        }
        if let Some(quantite_comparee) = command.quantite_comparee {
            record.quantite_comparee = dates::parse_quantity(&quantite_comparee);
        }
        if let Some(expiration) = command.date_expiration {
            record.date_expiration = dates::normalize_date(&expiration);
        }
        record.updated_at = self.clock.now();

        let updated = self.repository.replace(&command.id, &record)?;
        if updated {
            info!("Updated inventory record {}", command.id);
        }
        Ok(updated)
    }

    /// Remove a row. Removing an absent id is not an error.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.repository.remove(id)?;
        info!("Deleted inventory record {}", id);
        Ok(())
    }

    /// List rows in insertion order, filtered by the optional inclusive
    /// date bounds and classified against the current settings.
    pub fn list(&self, query: InventoryListQuery) -> Result<InventoryListResult> {
        let settings = self.settings_service.get()?;
        let today = self.clock.today();
        let from = query.from.as_deref().and_then(dates::normalize_date);
        let to = query.to.as_deref().and_then(dates::normalize_date);

        let mut rows = Vec::new();
        let mut counts = AlertCounts::default();
        for record in self.repository.list()? {
            if !dates::in_range(record.date, from, to) {
                continue;
            }
            let status = classifier::classify(&record, &settings, today);
            counts.tally(&status);
            rows.push(ClassifiedRow { record, status });
        }
        debug!(
            "Listed {} inventory rows (low={}, soon={}, expired={})",
            rows.len(),
            counts.low,
            counts.soon,
            counts.expired
        );
        Ok(InventoryListResult { rows, counts })
    }

    /// Number of stored rows, unfiltered.
    pub fn count(&self) -> Result<usize> {
        Ok(self.repository.list()?.len())
    }

    /// Drop every inventory row.
    pub fn clear(&self) -> Result<()> {
        self.repository.clear()
    }
}
