//! Domain-level command and query types.
//!
//! These structs are the inputs and outputs of the domain services. Date
//! and quantity fields arrive as raw form strings; the services normalize
//! them at the boundary (`dates::normalize_date`, `dates::parse_quantity`)
//! so callers never pre-parse.

pub mod inventory {
    use crate::domain::classifier::{AlertCounts, RecordStatus};
    use crate::domain::models::record::InventoryRecord;

    /// Input for creating an inventory row.
    #[derive(Debug, Clone, Default)]
    pub struct AddInventoryCommand {
        pub date: String,
        pub inventaire_num: String,
        pub code: String,
        pub produit: String,
        pub quantite: String,
        pub quantite_comparee: String,
        pub date_expiration: String,
    }

    /// Partial update of an inventory row; `None` fields keep their
    /// current value, `Some("")` on a date field clears it.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateInventoryCommand {
        pub id: String,
        pub date: Option<String>,
        pub inventaire_num: Option<String>,
        pub code: Option<String>,
        pub produit: Option<String>,
        pub quantite: Option<String>,
        pub quantite_comparee: Option<String>,
        pub date_expiration: Option<String>,
    }

    /// Query parameters for listing inventory rows.
    #[derive(Debug, Clone, Default)]
    pub struct InventoryListQuery {
        pub from: Option<String>,
        pub to: Option<String>,
    }

    /// One listed row with its derived risk flags.
    #[derive(Debug, Clone)]
    pub struct ClassifiedRow {
        pub record: InventoryRecord,
        pub status: RecordStatus,
    }

    /// Result of listing inventory: rows plus aggregate alert counters.
    #[derive(Debug, Clone)]
    pub struct InventoryListResult {
        pub rows: Vec<ClassifiedRow>,
        pub counts: AlertCounts,
    }
}

pub mod records {
    /// Input for creating an order, receipt, or invoice line.
    #[derive(Debug, Clone, Default)]
    pub struct AddRecordCommand {
        pub numero: String,
        pub date: String,
        pub code: String,
        pub produit: String,
        pub quantite: String,
    }

    /// Partial update; `None` fields keep their current value.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateRecordCommand {
        pub id: String,
        pub numero: Option<String>,
        pub date: Option<String>,
        pub code: Option<String>,
        pub produit: Option<String>,
        pub quantite: Option<String>,
    }

    /// Query parameters for listing simple records.
    #[derive(Debug, Clone, Default)]
    pub struct RecordListQuery {
        pub from: Option<String>,
        pub to: Option<String>,
    }
}

pub mod reports {
    use crate::domain::models::record::{InventoryRecord, RecordKind, SimpleKind, SimpleRecord};

    /// Query parameters for building a report.
    #[derive(Debug, Clone)]
    pub struct ReportQuery {
        pub kind: RecordKind,
        pub from: Option<String>,
        pub to: Option<String>,
    }

    /// Filtered, aggregated view of one kind's records.
    ///
    /// Row order follows storage order; no re-sorting happens anywhere in
    /// the report path.
    #[derive(Debug, Clone)]
    pub enum Report {
        Inventory {
            rows: Vec<InventoryRecord>,
            total_quantite: i64,
            total_quantite_comparee: i64,
        },
        Simple {
            kind: SimpleKind,
            rows: Vec<SimpleRecord>,
            total_quantite: i64,
        },
    }
}

pub mod settings {
    /// Partial settings update; unspecified fields keep their persisted
    /// value. Raw numeric strings are coerced (unparsable counts as 0).
    #[derive(Debug, Clone, Default)]
    pub struct UpdateSettingsCommand {
        pub stock_threshold: Option<String>,
        pub expiry_months: Option<String>,
    }
}
