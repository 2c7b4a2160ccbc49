//! Persistence backends: where the whole record list is read from and written to.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::StoreError;
use crate::entity::RecordEntity;

/// Loads and saves the full record list.
///
/// There is no partial update: every write replaces the whole collection.
pub trait Persistence {
    /// Reads every stored record. Nothing persisted yet reads as empty.
    fn read_all(&self) -> Result<Vec<RecordEntity>, StoreError>;

    /// Replaces the stored collection with `records`.
    fn write_all(&self, records: &[RecordEntity]) -> Result<(), StoreError>;
}

/// A pretty-printed JSON array on local disk.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Persistence for JsonFile {
    fn read_all(&self) -> Result<Vec<RecordEntity>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no record file yet; starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes to a temporary file beside the target and renames it into place,
    /// so a reader sees either the old or the new collection, never a mix.
    fn write_all(&self, records: &[RecordEntity]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
                StoreError::Json {
                    path: self.path.clone(),
                    source,
                }
            })?;
            writer.write_all(b"\n").map_err(|e| self.io_error(e))?;
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!(path = %self.path.display(), count = records.len(), "wrote record file");
        Ok(())
    }
}

/// Keeps the collection in process memory.
///
/// Useful for testing. Writes can be made to fail to exercise error paths.
/// Not `Sync`; the store is single-threaded.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RefCell<Vec<RecordEntity>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `records` already persisted.
    pub fn with_records(records: Vec<RecordEntity>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    /// A copy of what is currently persisted.
    pub fn stored(&self) -> Vec<RecordEntity> {
        self.records.borrow().clone()
    }

    /// How many times the collection has been written.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Makes subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl Persistence for MemoryBackend {
    fn read_all(&self) -> Result<Vec<RecordEntity>, StoreError> {
        Ok(self.stored())
    }

    fn write_all(&self, records: &[RecordEntity]) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Io {
                path: PathBuf::from("<memory>"),
                source: io::Error::other("writes disabled"),
            });
        }
        *self.records.borrow_mut() = records.to_vec();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
