//! Storage-layer error type.

use std::path::PathBuf;
use thiserror::Error;

/// Unrecoverable persistence failures.
///
/// Malformed stored data never surfaces as an error — collections
/// self-heal to empty and bad rows are skipped. Only a failure of the
/// storage medium itself (create, write, rename) reaches the caller, as a
/// distinguishable type since there is no retry or fallback path for it.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not create data directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode {path:?}")]
    Encode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
