//! Storage layer for the time log.
//!
//! [`RecordStore`] owns the canonical, insertion-ordered list of records for the
//! lifetime of the process. It loads the list once when opened and writes the whole
//! list back after every add or delete.
//!
//! # Concurrency
//!
//! The store assumes a single process and a single user. Mutations are synchronous
//! and there is no file locking: two processes writing the same file concurrently
//! race on the load-modify-save cycle and the last writer wins.
//!
//! # File format
//!
//! A JSON array of [`RecordEntity`] objects:
//!
//! ```json
//! [
//!   {
//!     "id": "5f0c…",
//!     "date": "2024-01-15",
//!     "hours": 7.5,
//!     "description": "Sprint planning",
//!     "project": "Client Meeting",
//!     "timestamp": "2024-01-15 17:02:11",
//!     "time_ranges": [{ "start": "09:00 AM", "end": "12:00 PM", "hours": 3.0 }]
//!   }
//! ]
//! ```
//!
//! There is no schema version. Entries missing an `id` get one on load.

mod backend;
mod entity;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tl_core::{Record, RecordId, ValidationError};
use tracing::{debug, info, warn};

pub use backend::{JsonFile, MemoryBackend, Persistence};
pub use entity::RecordEntity;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The backing file is not a valid record list.
    #[error("malformed record file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A stored record failed validation.
    #[error("invalid stored record at index {index}: {source}")]
    Corrupt {
        index: usize,
        #[source]
        source: ValidationError,
    },
    /// Two records share an ID.
    #[error("duplicate record ID: {0}")]
    DuplicateId(RecordId),
    /// No record has the requested ID.
    #[error("record not found: {0}")]
    NotFound(String),
    /// An ID prefix matched more than one record.
    #[error("record ID prefix {prefix} is ambiguous ({matches} matches)")]
    AmbiguousId { prefix: String, matches: usize },
}

/// In-memory record list with write-through persistence.
///
/// If a write fails after `add` or `delete`, the in-memory change stays applied and
/// the error is returned; there is no rollback.
pub struct RecordStore<P> {
    backend: P,
    records: Vec<Record>,
}

impl RecordStore<JsonFile> {
    /// Opens the JSON record file at `path`; a missing file is an empty store.
    pub fn open_file(path: &Path) -> Result<Self, StoreError> {
        Self::open(JsonFile::new(path))
    }
}

impl RecordStore<MemoryBackend> {
    /// Opens an empty in-memory store.
    ///
    /// Useful for testing. Nothing survives the store being dropped.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(MemoryBackend::new())
    }
}

impl<P: Persistence> RecordStore<P> {
    /// Loads every persisted record. Call once, before anything else.
    pub fn open(backend: P) -> Result<Self, StoreError> {
        let entities = backend.read_all()?;

        let mut records = Vec::with_capacity(entities.len());
        let mut seen = HashSet::with_capacity(entities.len());
        let mut generated = 0usize;
        for (index, entity) in entities.into_iter().enumerate() {
            let (record, fresh_id) = entity
                .into_record()
                .map_err(|source| StoreError::Corrupt { index, source })?;
            if !seen.insert(record.id().clone()) {
                return Err(StoreError::DuplicateId(record.id().clone()));
            }
            generated += usize::from(fresh_id);
            records.push(record);
        }
        debug!(count = records.len(), "loaded records");

        let store = Self { backend, records };
        if generated > 0 {
            warn!(generated, "assigned IDs to stored records that had none");
            store.flush()?;
        }
        Ok(store)
    }

    /// Appends a record and persists the whole list.
    pub fn add(&mut self, record: Record) -> Result<(), StoreError> {
        if self.get(record.id()).is_some() {
            return Err(StoreError::DuplicateId(record.id().clone()));
        }
        info!(id = %record.id(), date = %record.date(), hours = record.hours(), "adding record");
        self.records.push(record);
        self.flush()
    }

    /// Removes the record with `id` and persists the whole list.
    ///
    /// An unknown ID is a caller error: the presentation layer only deletes IDs it
    /// has just displayed.
    pub fn delete(&mut self, id: &RecordId) -> Result<Record, StoreError> {
        let position = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.records.remove(position);
        info!(id = %id, "deleted record");
        self.flush()?;
        Ok(removed)
    }

    /// Finds a record by full ID or by a prefix matching exactly one ID.
    pub fn resolve(&self, prefix: &str) -> Result<&Record, StoreError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(StoreError::NotFound(prefix.to_string()));
        }
        if let Some(exact) = self.records.iter().find(|r| r.id().as_str() == prefix) {
            return Ok(exact);
        }

        let mut matches = self
            .records
            .iter()
            .filter(|r| r.id().as_str().starts_with(prefix));
        match (matches.next(), matches.count()) {
            (Some(record), 0) => Ok(record),
            (Some(_), more) => Err(StoreError::AmbiguousId {
                prefix: prefix.to_string(),
                matches: more + 1,
            }),
            (None, _) => Err(StoreError::NotFound(prefix.to_string())),
        }
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Read-only view of every record, in insertion order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub const fn backend(&self) -> &P {
        &self.backend
    }

    fn flush(&self) -> Result<(), StoreError> {
        let entities: Vec<RecordEntity> = self.records.iter().map(RecordEntity::from).collect();
        self.backend.write_all(&entities)
    }
}
