//! Storage abstraction traits.
//!
//! The domain layer only sees these traits, so the persistence format can
//! change without touching the services.

use anyhow::Result;

use crate::domain::models::settings::AlertSettings;

/// Interface for one persisted, insertion-ordered record collection.
///
/// Implementations must preserve storage order: appends go to the end,
/// replacements stay in place, and removals never reorder the remaining
/// records. A missing or unreadable backing store reads as an empty
/// collection rather than an error.
pub trait RecordStorage<T>: Send + Sync {
    /// List all records in storage order.
    fn list(&self) -> Result<Vec<T>>;

    /// Append a new record to the end of the collection.
    fn append(&self, record: &T) -> Result<()>;

    /// Replace the record carrying the same id, in place.
    /// Returns false (and writes nothing) when the id is absent.
    fn replace(&self, id: &str, record: &T) -> Result<bool>;

    /// Remove the record with the given id. Absent ids are not an error.
    fn remove(&self, id: &str) -> Result<()>;

    /// Drop every record in the collection.
    fn clear(&self) -> Result<()>;
}

/// Interface for the persisted alert settings blob.
pub trait SettingsStorage: Send + Sync {
    /// Load settings merged over defaults; unreadable data yields defaults.
    fn load(&self) -> Result<AlertSettings>;

    /// Persist the full settings value.
    fn save(&self, settings: &AlertSettings) -> Result<()>;

    /// Remove the persisted settings, restoring defaults on the next load.
    fn clear(&self) -> Result<()>;
}
