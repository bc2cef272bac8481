//! Report aggregation: a filtered view of one kind's records with summed
//! quantities.
//!
//! Reports always apply the strict range predicate, even with no bounds
//! supplied, so a record without a business date never appears in a
//! report (the unbounded *listing*, by contrast, passes dateless records
//! through). Aggregation is a pure fold; nothing is persisted and row
//! order follows storage order.

use anyhow::Result;
use chrono::NaiveDate;
use log::debug;

use crate::domain::commands::reports::{Report, ReportQuery};
use crate::domain::dates;
use crate::domain::models::record::{RecordKind, SimpleKind};
use crate::storage::csv::{CsvConnection, InventoryRepository, SimpleRecordRepository};
use crate::storage::traits::RecordStorage;

#[derive(Clone)]
pub struct ReportService {
    inventory: InventoryRepository,
    orders: SimpleRecordRepository,
    receipts: SimpleRecordRepository,
    invoices: SimpleRecordRepository,
}

impl ReportService {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            inventory: InventoryRepository::new(connection.clone(), RecordKind::Inventory),
            orders: SimpleRecordRepository::new(connection.clone(), RecordKind::Orders),
            receipts: SimpleRecordRepository::new(connection.clone(), RecordKind::Receipts),
            invoices: SimpleRecordRepository::new(connection, RecordKind::Invoices),
        }
    }

    /// Build the report for one kind over an optional date range.
    pub fn build(&self, query: ReportQuery) -> Result<Report> {
        let from = query.from.as_deref().and_then(dates::normalize_date);
        let to = query.to.as_deref().and_then(dates::normalize_date);
        match query.kind {
            RecordKind::Inventory => self.build_inventory(from, to),
            RecordKind::Orders => self.build_simple(SimpleKind::Orders, from, to),
            RecordKind::Receipts => self.build_simple(SimpleKind::Receipts, from, to),
            RecordKind::Invoices => self.build_simple(SimpleKind::Invoices, from, to),
        }
    }

    fn build_inventory(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Report> {
        let mut rows = Vec::new();
        let mut total_quantite = 0i64;
        let mut total_quantite_comparee = 0i64;
        for record in self.inventory.list()? {
            if !dates::in_range_strict(record.date, from, to) {
                continue;
            }
            total_quantite += record.quantite;
            total_quantite_comparee += record.quantite_comparee;
            rows.push(record);
        }
        debug!(
            "Inventory report: {} rows, totals {}/{}",
            rows.len(),
            total_quantite,
            total_quantite_comparee
        );
        Ok(Report::Inventory {
            rows,
            total_quantite,
            total_quantite_comparee,
        })
    }

    fn build_simple(
        &self,
        kind: SimpleKind,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Report> {
        let repository = match kind {
            SimpleKind::Orders => &self.orders,
            SimpleKind::Receipts => &self.receipts,
            SimpleKind::Invoices => &self.invoices,
        };
        let mut rows = Vec::new();
        let mut total_quantite = 0i64;
        for record in repository.list()? {
            if !dates::in_range_strict(record.date, from, to) {
                continue;
            }
            total_quantite += record.quantite;
            rows.push(record);
        }
        debug!("{} report: {} rows, total {}", kind, rows.len(), total_quantite);
        Ok(Report::Simple {
            kind,
            rows,
            total_quantite,
        })
    }
}
