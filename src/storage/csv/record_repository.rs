//! CSV-backed record repositories.
//!
//! Each record kind persists as one CSV file in the data directory. Reads
//! are lenient: a missing or unreadable file reads as an empty collection
//! and a malformed row is skipped with a warning, so a corrupt file can
//! never poison the store. Every mutation rewrites the full collection
//! through a temp file renamed over the original, keeping each write
//! atomic at the file level.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::{Reader, StringRecord, Writer};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::marker::PhantomData;
use std::path::PathBuf;

use crate::domain::dates;
use crate::domain::models::record::{InventoryRecord, RecordKind, SimpleRecord};
use crate::storage::csv::connection::CsvConnection;
use crate::storage::error::StorageError;
use crate::storage::traits::RecordStorage;

/// Row codec tying a record shape to its CSV columns.
pub trait CsvRow: Clone + Send + Sync {
    /// Column header, written on every full rewrite.
    fn headers() -> &'static [&'static str];

    /// Decode one CSV row; `None` marks a row too malformed to keep.
    fn from_row(row: &StringRecord) -> Option<Self>;

    /// Encode into CSV cells, matching `headers()` order.
    fn to_row(&self) -> Vec<String>;

    fn id(&self) -> &str;
}

/// Lenient RFC 3339 parse for stored timestamps; garbage degrades to the
/// epoch instead of dropping the row.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

impl CsvRow for InventoryRecord {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "date",
            "inventaireNum",
            "code",
            "produit",
            "quantite",
            "quantiteComparee",
            "dateExpiration",
            "createdAt",
            "updatedAt",
        ]
    }

    fn from_row(row: &StringRecord) -> Option<Self> {
        let id = row.get(0).unwrap_or("").to_string();
        if id.is_empty() {
            return None;
        }
        Some(InventoryRecord {
            id,
            date: dates::normalize_date(row.get(1).unwrap_or("")),
            inventaire_num: row.get(2).unwrap_or("").to_string(),
            code: row.get(3).unwrap_or("").to_string(),
            produit: row.get(4).unwrap_or("").to_string(),
            quantite: dates::parse_quantity(row.get(5).unwrap_or("0")),
            quantite_comparee: dates::parse_quantity(row.get(6).unwrap_or("0")),
            date_expiration: dates::normalize_date(row.get(7).unwrap_or("")),
            created_at: parse_timestamp(row.get(8).unwrap_or("")),
            updated_at: parse_timestamp(row.get(9).unwrap_or("")),
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            dates::format_date(self.date),
            self.inventaire_num.clone(),
            self.code.clone(),
            self.produit.clone(),
            self.quantite.to_string(),
            self.quantite_comparee.to_string(),
            dates::format_date(self.date_expiration),
            self.created_at.to_rfc3339(),
            self.updated_at.to_rfc3339(),
        ]
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl CsvRow for SimpleRecord {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "date",
            "numero",
            "code",
            "produit",
            "quantite",
            "createdAt",
            "updatedAt",
        ]
    }

    fn from_row(row: &StringRecord) -> Option<Self> {
        let id = row.get(0).unwrap_or("").to_string();
        if id.is_empty() {
            return None;
        }
        Some(SimpleRecord {
            id,
            date: dates::normalize_date(row.get(1).unwrap_or("")),
            numero: row.get(2).unwrap_or("").to_string(),
            code: row.get(3).unwrap_or("").to_string(),
            produit: row.get(4).unwrap_or("").to_string(),
            quantite: dates::parse_quantity(row.get(5).unwrap_or("0")),
            created_at: parse_timestamp(row.get(6).unwrap_or("")),
            updated_at: parse_timestamp(row.get(7).unwrap_or("")),
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            dates::format_date(self.date),
            self.numero.clone(),
            self.code.clone(),
            self.produit.clone(),
            self.quantite.to_string(),
            self.created_at.to_rfc3339(),
            self.updated_at.to_rfc3339(),
        ]
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// File-backed collection for one record kind.
#[derive(Debug, Clone)]
pub struct CsvRecordRepository<T> {
    connection: CsvConnection,
    kind: RecordKind,
    _marker: PhantomData<T>,
}

pub type InventoryRepository = CsvRecordRepository<InventoryRecord>;
pub type SimpleRecordRepository = CsvRecordRepository<SimpleRecord>;

impl<T: CsvRow> CsvRecordRepository<T> {
    pub fn new(connection: CsvConnection, kind: RecordKind) -> Self {
        Self {
            connection,
            kind,
            _marker: PhantomData,
        }
    }

    fn file_path(&self) -> PathBuf {
        self.connection.record_file_path(self.kind)
    }

    /// Read the full collection, skipping anything unreadable.
    fn read_all(&self) -> Vec<T> {
        let path = self.file_path();
        let file = match File::open(&path) {
            Ok(file) => file,
            // No file yet (or unreadable): the collection is empty.
            Err(_) => return Vec::new(),
        };
        let mut csv_reader = Reader::from_reader(BufReader::new(file));
        let mut records = Vec::new();
        for result in csv_reader.records() {
            match result {
                Ok(row) => match T::from_row(&row) {
                    Some(record) => records.push(record),
                    None => warn!("Skipping malformed row in {:?}", path),
                },
                Err(e) => warn!("Skipping unreadable row in {:?}: {}", path, e),
            }
        }
        records
    }

    /// Rewrite the full collection atomically (temp file + rename).
    fn write_all(&self, records: &[T]) -> Result<()> {
        let path = self.file_path();
        let temp_path = path.with_extension("csv.tmp");
        {
            let file = File::create(&temp_path).map_err(|source| StorageError::Write {
                path: temp_path.clone(),
                source,
            })?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));
            csv_writer
                .write_record(T::headers())
                .map_err(|source| StorageError::Encode {
                    path: temp_path.clone(),
                    source: Box::new(source),
                })?;
            for record in records {
                csv_writer
                    .write_record(record.to_row())
                    .map_err(|source| StorageError::Encode {
                        path: temp_path.clone(),
                        source: Box::new(source),
                    })?;
            }
            csv_writer.flush().map_err(|source| StorageError::Write {
                path: temp_path.clone(),
                source,
            })?;
        }
        std::fs::rename(&temp_path, &path).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {} {} records to {:?}", records.len(), self.kind, path);
        Ok(())
    }
}

impl<T: CsvRow> RecordStorage<T> for CsvRecordRepository<T> {
    fn list(&self) -> Result<Vec<T>> {
        Ok(self.read_all())
    }

    fn append(&self, record: &T) -> Result<()> {
        let mut records = self.read_all();
        records.push(record.clone());
        self.write_all(&records)
    }

    fn replace(&self, id: &str, record: &T) -> Result<bool> {
        let mut records = self.read_all();
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(false);
        };
        *slot = record.clone();
        self.write_all(&records)?;
        Ok(true)
    }

    fn remove(&self, id: &str) -> Result<()> {
        let mut records = self.read_all();
        records.retain(|r| r.id() != id);
        self.write_all(&records)
    }

    fn clear(&self) -> Result<()> {
        let path = self.file_path();
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write { path, source }.into()),
        }
    }
}
