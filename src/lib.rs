//! # Pharma Tracker
//!
//! Record-management core for a pharmacy's operational logs: inventory
//! counts, orders, receipts, and invoices. The crate is a library consumed
//! in-process by a presentation layer; it owns persistence, date-range
//! filtering, inventory risk classification (low stock, expiring soon,
//! expired), and report aggregation, and exposes them through a [`Backend`]
//! facade.
//!
//! Everything is synchronous and single-user. Records persist as one CSV
//! file per kind plus a YAML settings file in a caller-chosen data
//! directory; every read recomputes from stored state, so a query issued
//! after a mutation always observes it. The current time is injected via
//! [`Clock`] so classification stays deterministic under test.

pub mod domain;
pub mod storage;

pub use domain::clock::{Clock, FixedClock, SystemClock};
pub use domain::{InventoryService, RecordService, ReportService, SettingsService};
pub use storage::csv::CsvConnection;
pub use storage::StorageError;

use anyhow::Result;
use chrono::Duration;
use log::info;
use std::path::Path;
use std::sync::Arc;

use domain::commands::inventory::AddInventoryCommand;
use domain::commands::records::AddRecordCommand;
use domain::dates;
use domain::models::record::SimpleKind;

/// Per-kind record counts for dashboard display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordCounts {
    pub inventory: usize,
    pub orders: usize,
    pub receipts: usize,
    pub invoices: usize,
}

impl RecordCounts {
    pub fn total(&self) -> usize {
        self.inventory + self.orders + self.receipts + self.invoices
    }
}

/// Main entry point owning all domain services.
pub struct Backend {
    pub inventory_service: InventoryService,
    pub record_service: RecordService,
    pub report_service: ReportService,
    pub settings_service: SettingsService,
    clock: Arc<dyn Clock>,
}

impl Backend {
    /// Create a backend rooted at `data_dir` with an injected clock.
    pub fn new<P: AsRef<Path>>(data_dir: P, clock: Arc<dyn Clock>) -> Result<Self> {
        let connection = CsvConnection::new(data_dir)?;
        let settings_service = SettingsService::new(connection.clone());
        let inventory_service = InventoryService::new(
            connection.clone(),
            settings_service.clone(),
            clock.clone(),
        );
        let record_service = RecordService::new(connection.clone(), clock.clone());
        let report_service = ReportService::new(connection);
        Ok(Backend {
            inventory_service,
            record_service,
            report_service,
            settings_service,
            clock,
        })
    }

    /// Create a backend that reads the system clock.
    pub fn with_system_clock<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Self::new(data_dir, Arc::new(SystemClock))
    }

    /// Remove every record of every kind and reset settings to defaults.
    pub fn reset_all(&self) -> Result<()> {
        self.inventory_service.clear()?;
        self.record_service.clear_all()?;
        self.settings_service.reset()?;
        info!("All data reset");
        Ok(())
    }

    /// Per-kind record counts.
    pub fn stats(&self) -> Result<RecordCounts> {
        Ok(RecordCounts {
            inventory: self.inventory_service.count()?,
            orders: self.record_service.count(SimpleKind::Orders)?,
            receipts: self.record_service.count(SimpleKind::Receipts)?,
            invoices: self.record_service.count(SimpleKind::Invoices)?,
        })
    }

    /// Seed the demonstration fixtures: three inventory rows (one low and
    /// recently expired, one expiring soon, one long expired) and three
    /// orders, receipts,
    /// and invoices each, dated relative to the clock. Does nothing and
    /// returns false when any collection already holds data.
    pub fn seed_demo_data(&self) -> Result<bool> {
        if self.stats()?.total() > 0 {
            info!("Demo data skipped: store is not empty");
            return Ok(false);
        }
        let today = self.clock.today();
        let days_ago = |n: i64| dates::format_date(Some(today - Duration::days(n)));

        let inventory_rows = [
            ("INV-001", "P-001", "Paracetamol 500mg", "5", "5", days_ago(10), days_ago(30)),
            ("INV-002", "P-002", "Ibuprofène 400mg", "80", "80", days_ago(-20), days_ago(20)),
            ("INV-003", "P-003", "Amoxicilline 1g", "60", "58", days_ago(365), days_ago(10)),
        ];
        for (num, code, produit, quantite, comparee, expiration, date) in inventory_rows {
            self.inventory_service.add(AddInventoryCommand {
                date,
                inventaire_num: num.to_string(),
                code: code.to_string(),
                produit: produit.to_string(),
                quantite: quantite.to_string(),
                quantite_comparee: comparee.to_string(),
                date_expiration: expiration,
            })?;
        }

        for (kind, prefix) in [
            (SimpleKind::Orders, "CMD"),
            (SimpleKind::Receipts, "REC"),
            (SimpleKind::Invoices, "FAC"),
        ] {
            let lines = [
                (1001, "P-001", "Paracetamol 500mg", "20", days_ago(25)),
                (1002, "P-002", "Ibuprofène 400mg", "10", days_ago(15)),
                (1003, "P-003", "Amoxicilline 1g", "5", days_ago(5)),
            ];
            for (seq, code, produit, quantite, date) in lines {
                self.record_service.add(
                    kind,
                    AddRecordCommand {
                        numero: format!("{prefix}-{seq}"),
                        date,
                        code: code.to_string(),
                        produit: produit.to_string(),
                        quantite: quantite.to_string(),
                    },
                )?;
            }
        }

        info!("Demo data seeded");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::commands::inventory::InventoryListQuery;
    use domain::commands::records::RecordListQuery;
    use domain::commands::reports::{Report, ReportQuery};
    use domain::commands::settings::UpdateSettingsCommand;
    use domain::models::record::RecordKind;
    use domain::models::settings::AlertSettings;
    use tempfile::TempDir;

    fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::at_date(
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        ))
    }

    fn setup() -> (Backend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = Backend::new(temp_dir.path(), fixed_clock()).unwrap();
        (backend, temp_dir)
    }

    #[test]
    fn test_seed_demo_data_counts() {
        let (backend, _tmp) = setup();
        assert!(backend.seed_demo_data().unwrap());

        let stats = backend.stats().unwrap();
        assert_eq!(stats.inventory, 3);
        assert_eq!(stats.orders, 3);
        assert_eq!(stats.receipts, 3);
        assert_eq!(stats.invoices, 3);

        // At the fixed date: INV-001 is low and expired (10 days past),
        // INV-002 expires in 20 days (same or next calendar month, so
        // "soon"), INV-003 expired a year ago.
        let listing = backend
            .inventory_service
            .list(InventoryListQuery::default())
            .unwrap();
        assert_eq!(listing.counts.low, 1);
        assert_eq!(listing.counts.soon, 1);
        assert_eq!(listing.counts.expired, 2);
    }

    #[test]
    fn test_seed_demo_data_is_a_no_op_on_existing_data() {
        let (backend, _tmp) = setup();
        assert!(backend.seed_demo_data().unwrap());
        assert!(!backend.seed_demo_data().unwrap());
        assert_eq!(backend.stats().unwrap().inventory, 3);
    }

    #[test]
    fn test_reset_all_empties_every_kind_and_settings() {
        let (backend, _tmp) = setup();
        backend.seed_demo_data().unwrap();
        backend
            .settings_service
            .set(UpdateSettingsCommand {
                stock_threshold: Some("42".to_string()),
                expiry_months: Some("6".to_string()),
            })
            .unwrap();

        backend.reset_all().unwrap();

        assert_eq!(backend.stats().unwrap(), RecordCounts::default());
        for kind in [SimpleKind::Orders, SimpleKind::Receipts, SimpleKind::Invoices] {
            assert!(backend
                .record_service
                .list(kind, RecordListQuery::default())
                .unwrap()
                .is_empty());
        }
        assert_eq!(
            backend.settings_service.get().unwrap(),
            AlertSettings::default()
        );
    }

    #[test]
    fn test_read_after_write_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        {
            let backend = Backend::new(temp_dir.path(), fixed_clock()).unwrap();
            backend.seed_demo_data().unwrap();
        }
        // A fresh backend over the same directory sees the data.
        let backend = Backend::new(temp_dir.path(), fixed_clock()).unwrap();
        assert_eq!(backend.stats().unwrap().total(), 12);
    }

    #[test]
    fn test_end_to_end_report_over_seeded_orders() {
        let (backend, _tmp) = setup();
        backend.seed_demo_data().unwrap();

        let report = backend
            .report_service
            .build(ReportQuery {
                kind: RecordKind::Orders,
                from: None,
                to: None,
            })
            .unwrap();
        match report {
            Report::Simple { total_quantite, rows, .. } => {
                assert_eq!(rows.len(), 3);
                assert_eq!(total_quantite, 35);
            }
            Report::Inventory { .. } => panic!("expected simple report"),
        }
    }

    #[test]
    fn test_end_to_end_alert_scenario() {
        // One low+soon row, one future-dated row with no alert, one
        // expired row, against a controlled clock.
        let (backend, _tmp) = setup();
        let rows = [
            ("Low and soon", "5", "2025-07-05"),
            ("No alert", "80", "2026-06-15"),
            ("Expired", "60", "2025-06-05"),
        ];
        for (produit, quantite, expiration) in rows {
            backend
                .inventory_service
                .add(domain::commands::inventory::AddInventoryCommand {
                    date: "2025-06-01".to_string(),
                    inventaire_num: "INV-001".to_string(),
                    code: "P-001".to_string(),
                    produit: produit.to_string(),
                    quantite: quantite.to_string(),
                    quantite_comparee: quantite.to_string(),
                    date_expiration: expiration.to_string(),
                })
                .unwrap();
        }

        let listing = backend
            .inventory_service
            .list(InventoryListQuery::default())
            .unwrap();
        assert_eq!(listing.counts.low, 1);
        assert_eq!(listing.counts.soon, 1);
        assert_eq!(listing.counts.expired, 1);
    }
}
