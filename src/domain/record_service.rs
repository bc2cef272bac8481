//! Service managing the three simple record kinds: orders, receipts, and
//! invoices. The shapes are identical; only the storage key differs.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::commands::records::{AddRecordCommand, RecordListQuery, UpdateRecordCommand};
use crate::domain::dates;
use crate::domain::models::record::{SimpleKind, SimpleRecord};
use crate::storage::csv::{CsvConnection, SimpleRecordRepository};
use crate::storage::traits::RecordStorage;

#[derive(Clone)]
pub struct RecordService {
    orders: SimpleRecordRepository,
    receipts: SimpleRecordRepository,
    invoices: SimpleRecordRepository,
    clock: Arc<dyn Clock>,
}

impl RecordService {
    pub fn new(connection: CsvConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            orders: SimpleRecordRepository::new(
                connection.clone(),
                SimpleKind::Orders.record_kind(),
            ),
            receipts: SimpleRecordRepository::new(
                connection.clone(),
                SimpleKind::Receipts.record_kind(),
            ),
            invoices: SimpleRecordRepository::new(
                connection,
                SimpleKind::Invoices.record_kind(),
            ),
            clock,
        }
    }

    fn repository(&self, kind: SimpleKind) -> &SimpleRecordRepository {
        match kind {
            SimpleKind::Orders => &self.orders,
            SimpleKind::Receipts => &self.receipts,
            SimpleKind::Invoices => &self.invoices,
        }
    }

    /// Create a new record of the given kind from raw form fields.
    pub fn add(&self, kind: SimpleKind, command: AddRecordCommand) -> Result<SimpleRecord> {
        let now = self.clock.now();
        let record = SimpleRecord {
            id: kind.record_kind().generate_id(now.timestamp_millis() as u64),
            date: dates::normalize_date(&command.date),
            numero: command.numero.trim().to_string(),
            code: command.code.trim().to_string(),
            produit: command.produit.trim().to_string(),
            quantite: dates::parse_quantity(&command.quantite),
            created_at: now,
            updated_at: now,
        };
        self.repository(kind).append(&record)?;
        info!("Added {} record {} ({})", kind, record.id, record.numero);
        Ok(record)
    }

    /// Merge the provided fields into an existing record and stamp
    /// `updated_at`. Returns false without mutating anything when the id
    /// is unknown.
    pub fn update(&self, kind: SimpleKind, command: UpdateRecordCommand) -> Result<bool> {
        let repository = self.repository(kind);
        let Some(mut record) = repository.list()?.into_iter().find(|r| r.id == command.id)
        else {
            warn!("{} record not found: {}", kind, command.id);
            return Ok(false);
        };

        if let Some(numero) = command.numero {
            record.numero = numero.trim().to_string();
        }
        if let Some(date) = command.date {
            record.date = dates::normalize_date(&date);
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
        record.updated_at = self.clock.now();

        let updated = repository.replace(&command.id, &record)?;
        if updated {
            info!("Updated {} record {}", kind, command.id);
        }
        Ok(updated)
    }

    /// Remove a record. Removing an absent id is not an error.
    pub fn delete(&self, kind: SimpleKind, id: &str) -> Result<()> {
        self.repository(kind).remove(id)?;
        info!("Deleted {} record {}", kind, id);
        Ok(())
    }

    /// List records of one kind in insertion order, filtered by the
    /// optional inclusive date bounds.
    pub fn list(&self, kind: SimpleKind, query: RecordListQuery) -> Result<Vec<SimpleRecord>> {
        let from = query.from.as_deref().and_then(dates::normalize_date);
        let to = query.to.as_deref().and_then(dates::normalize_date);
        let records = self
            .repository(kind)
            .list()?
            .into_iter()
            .filter(|r| dates::in_range(r.date, from, to))
            .collect();
        Ok(records)
    }

    /// Number of stored records of one kind, unfiltered.
    pub fn count(&self, kind: SimpleKind) -> Result<usize> {
        Ok(self.repository(kind).list()?.len())
    }

    /// Drop every record of all three kinds.
    pub fn clear_all(&self) -> Result<()> {
        self.orders.clear()?;
        self.receipts.clear()?;
        self.invoices.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (RecordService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let clock = Arc::new(FixedClock::at_date(
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        ));
        (RecordService::new(connection, clock), temp_dir)
    }

    fn add_command(numero: &str, date: &str, quantite: &str) -> AddRecordCommand {
        AddRecordCommand {
            numero: numero.to_string(),
            date: date.to_string(),
            code: "P-001".to_string(),
            produit: "Paracetamol 500mg".to_string(),
            quantite: quantite.to_string(),
        }
    }

    #[test]
    fn test_add_then_list_per_kind() {
        let (service, _tmp) = setup();
        let added = service
            .add(SimpleKind::Orders, add_command("CMD-1001", "2025-06-01", "20"))
            .unwrap();
        assert!(added.id.starts_with("ord-"));

        let orders = service
            .list(SimpleKind::Orders, RecordListQuery::default())
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].numero, "CMD-1001");
        assert_eq!(orders[0].quantite, 20);
    }

    #[test]
    fn test_kinds_are_isolated() {
        let (service, _tmp) = setup();
        service
            .add(SimpleKind::Orders, add_command("CMD-1001", "2025-06-01", "20"))
            .unwrap();
        service
            .add(SimpleKind::Receipts, add_command("REC-1001", "2025-06-02", "10"))
            .unwrap();

        assert_eq!(service.count(SimpleKind::Orders).unwrap(), 1);
        assert_eq!(service.count(SimpleKind::Receipts).unwrap(), 1);
        assert_eq!(service.count(SimpleKind::Invoices).unwrap(), 0);

        let receipts = service
            .list(SimpleKind::Receipts, RecordListQuery::default())
            .unwrap();
        assert_eq!(receipts[0].numero, "REC-1001");
    }

    #[test]
    fn test_update_merges_fields() {
        let (service, _tmp) = setup();
        let added = service
            .add(SimpleKind::Invoices, add_command("FAC-1001", "2025-06-01", "20"))
            .unwrap();

        let updated = service
            .update(
                SimpleKind::Invoices,
                UpdateRecordCommand {
                    id: added.id.clone(),
                    quantite: Some("35".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated);

        let invoices = service
            .list(SimpleKind::Invoices, RecordListQuery::default())
            .unwrap();
        assert_eq!(invoices[0].quantite, 35);
        assert_eq!(invoices[0].numero, "FAC-1001");
        assert_eq!(invoices[0].created_at, added.created_at);
    }

    #[test]
    fn test_update_missing_id_returns_false() {
        let (service, _tmp) = setup();
        let updated = service
            .update(
                SimpleKind::Orders,
                UpdateRecordCommand {
                    id: "ord-missing".to_string(),
                    numero: Some("CMD-9999".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (service, _tmp) = setup();
        let added = service
            .add(SimpleKind::Orders, add_command("CMD-1001", "2025-06-01", "20"))
            .unwrap();
        service.delete(SimpleKind::Orders, &added.id).unwrap();
        service.delete(SimpleKind::Orders, &added.id).unwrap();
        assert_eq!(service.count(SimpleKind::Orders).unwrap(), 0);
    }

    #[test]
    fn test_list_filters_by_date_range() {
        let (service, _tmp) = setup();
        service
            .add(SimpleKind::Orders, add_command("CMD-1001", "2025-05-20", "20"))
            .unwrap();
        service
            .add(SimpleKind::Orders, add_command("CMD-1002", "2025-06-01", "10"))
            .unwrap();
        service
            .add(SimpleKind::Orders, add_command("CMD-1003", "2025-06-10", "5"))
            .unwrap();

        let filtered = service
            .list(
                SimpleKind::Orders,
                RecordListQuery {
                    from: Some("2025-06-01".to_string()),
                    to: Some("2025-06-05".to_string()),
                },
            )
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].numero, "CMD-1002");
    }

    #[test]
    fn test_unbounded_list_includes_dateless_records() {
        let (service, _tmp) = setup();
        service
            .add(SimpleKind::Orders, add_command("CMD-1001", "", "20"))
            .unwrap();

        let all = service
            .list(SimpleKind::Orders, RecordListQuery::default())
            .unwrap();
        assert_eq!(all.len(), 1);

        let bounded = service
            .list(
                SimpleKind::Orders,
                RecordListQuery {
                    from: Some("2024-01-01".to_string()),
                    to: None,
                },
            )
            .unwrap();
        assert!(bounded.is_empty());
    }
}
