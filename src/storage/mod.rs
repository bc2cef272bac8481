//! Storage layer: persistence traits and the CSV/YAML implementation.

pub mod csv;
pub mod error;
pub mod traits;

pub use error::StorageError;
pub use traits::{RecordStorage, SettingsStorage};
