//! Domain models for pharmacy records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide sequence appended to generated IDs so records created
/// within the same millisecond (or under a fixed test clock) stay unique.
static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// The four record categories managed by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Inventory,
    Orders,
    Receipts,
    Invoices,
}

impl RecordKind {
    /// Storage key for this kind's collection; also its file stem.
    pub fn storage_key(&self) -> &'static str {
        match self {
            RecordKind::Inventory => "inventory",
            RecordKind::Orders => "orders",
            RecordKind::Receipts => "receipts",
            RecordKind::Invoices => "invoices",
        }
    }

    /// Prefix used in generated record IDs.
    fn id_prefix(&self) -> &'static str {
        match self {
            RecordKind::Inventory => "inv",
            RecordKind::Orders => "ord",
            RecordKind::Receipts => "rec",
            RecordKind::Invoices => "fac",
        }
    }

    /// Generate a unique record ID for this kind.
    /// Format: `<prefix>-<epoch_millis>-<sequence>`
    /// Example: `inv-1712345678901-00a3`
    pub fn generate_id(&self, timestamp_ms: u64) -> String {
        let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{:04x}", self.id_prefix(), timestamp_ms, seq)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// The three structurally identical "simple" record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleKind {
    Orders,
    Receipts,
    Invoices,
}

impl SimpleKind {
    pub fn record_kind(&self) -> RecordKind {
        match self {
            SimpleKind::Orders => RecordKind::Orders,
            SimpleKind::Receipts => RecordKind::Receipts,
            SimpleKind::Invoices => RecordKind::Invoices,
        }
    }
}

impl fmt::Display for SimpleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_kind().storage_key())
    }
}

/// One inventory count line: counted quantity against a reference quantity,
/// plus an optional expiry date driving the risk classification.
///
/// A `date` or `date_expiration` of `None` means the field was empty or
/// unparsable at the input boundary; it is stored as an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub inventaire_num: String,
    pub code: String,
    pub produit: String,
    pub quantite: i64,
    pub quantite_comparee: i64,
    pub date_expiration: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One order, receipt, or invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleRecord {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub numero: String,
    pub code: String,
    pub produit: String,
    pub quantite: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
