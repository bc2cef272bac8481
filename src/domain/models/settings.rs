//! Alert settings controlling the inventory risk classification.

use serde::{Deserialize, Serialize};

/// Process-wide alert configuration.
///
/// Persisted values override the defaults; a missing key falls back to its
/// default on load (`#[serde(default)]` handles the per-key fallback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    /// A quantity at or below this threshold counts as low stock.
    pub stock_threshold: i64,
    /// Width of the expiring-soon window, in calendar months.
    pub expiry_months: i64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            stock_threshold: 10,
            expiry_months: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AlertSettings::default();
        assert_eq!(settings.stock_threshold, 10);
        assert_eq!(settings.expiry_months, 1);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let settings: AlertSettings = serde_yaml::from_str("stock_threshold: 25").unwrap();
        assert_eq!(settings.stock_threshold, 25);
        assert_eq!(settings.expiry_months, 1);
    }
}
