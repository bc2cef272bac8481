//! # CSV Storage Module
//!
//! File-based persistence for the tracker. Each record kind lives in one
//! CSV file at the root of the data directory, alongside a YAML file for
//! the alert settings:
//!
//! ```text
//! data/
//! ├── inventory.csv
//! ├── orders.csv
//! ├── receipts.csv
//! ├── invoices.csv
//! └── settings.yaml
//! ```
//!
//! ## CSV Format
//!
//! ```csv
//! id,date,inventaireNum,code,produit,quantite,quantiteComparee,dateExpiration,createdAt,updatedAt
//! inv-1712345678901-0001,2025-05-16,INV-001,P-001,Paracetamol 500mg,5,5,2025-06-05,2025-05-16T09:00:00+00:00,2025-05-16T09:00:00+00:00
//! ```
//!
//! Dates are `YYYY-MM-DD` (empty cell for "no date"), timestamps RFC 3339.
//! Mutations rewrite the whole file atomically; reads tolerate anything,
//! skipping bad rows and treating unreadable files as empty collections.

pub mod connection;
pub mod record_repository;
pub mod settings_repository;

pub use connection::CsvConnection;
pub use record_repository::{CsvRecordRepository, InventoryRepository, SimpleRecordRepository};
pub use settings_repository::SettingsRepository;
