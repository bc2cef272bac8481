//! Inventory risk classification.
//!
//! Pure functions over a record, the alert settings, and an injected
//! "today". "Expired" is a display classification only; no record is ever
//! removed because of it.

use chrono::NaiveDate;

use crate::domain::dates;
use crate::domain::models::record::InventoryRecord;
use crate::domain::models::settings::AlertSettings;

/// Risk flags derived for a single inventory row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordStatus {
    pub is_low: bool,
    pub is_soon: bool,
    pub is_expired: bool,
}

/// Classify one inventory row against the alert settings.
///
/// A row without an expiry date is never expiring-soon or expired. The
/// soon window compares calendar months only (see `dates::month_diff`).
/// Low stock is independent of expiry, so it can coincide with either
/// flag; soon and expired are mutually exclusive.
pub fn classify(
    record: &InventoryRecord,
    settings: &AlertSettings,
    today: NaiveDate,
) -> RecordStatus {
    let is_expired = record.date_expiration.is_some_and(|exp| exp < today);
    let is_soon = match record.date_expiration {
        Some(exp) if !is_expired => {
            let months = dates::month_diff(exp, today);
            months >= 0 && months <= settings.expiry_months
        }
        _ => false,
    };
    let is_low = record.quantite <= settings.stock_threshold;
    RecordStatus {
        is_low,
        is_soon,
        is_expired,
    }
}

/// Aggregate alert counters over a classified set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertCounts {
    pub low: u32,
    pub soon: u32,
    pub expired: u32,
}

impl AlertCounts {
    pub fn tally(&mut self, status: &RecordStatus) {
        if status.is_low {
            self.low += 1;
        }
        if status.is_soon {
            self.soon += 1;
        }
        if status.is_expired {
            self.expired += 1;
        }
    }
}
