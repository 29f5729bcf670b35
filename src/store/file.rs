//! File-backed durable slot.
//!
//! The payload lives in a single JSON file. Writers serialize on an exclusive
//! `fs2` lock held on a sibling `.lock` file, write a temp file, fsync it, and
//! rename it over the slot so readers only ever see a complete payload.

use super::slot::{DurableSlot, SlotTransaction};
use crate::constants::{APP_DATA_DIR_NAME, PAGE_STORE_FILE_NAME, PAGE_STORE_SLOT_NAME};
use crate::error::StorageError;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A durable slot stored as one file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    name: String,
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::named(PAGE_STORE_SLOT_NAME, path)
    }

    pub fn named(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// `$XDG_DATA_HOME/localpage/landingPages.json`, falling back to `~/.local/share`.
    pub fn default_location() -> PathBuf {
        std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(home).join(".local").join("share")
            })
            .join(APP_DATA_DIR_NAME)
            .join(PAGE_STORE_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn ensure_parent(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    fn open_lock_file(&self) -> Result<File, StorageError> {
        self.ensure_parent()
            .and_then(|()| {
                OpenOptions::new()
                    .create(true)
                    .truncate(false)
                    .read(true)
                    .write(true)
                    .open(self.lock_path())
            })
            .map_err(|source| self.lock_error(source))
    }

    fn read_payload(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                slot: self.name.clone(),
                source,
            }),
        }
    }

    fn write_payload(&self, payload: &str) -> Result<(), StorageError> {
        let tmp_path = self.temp_path();
        let result = self.write_via_temp(&tmp_path, payload);
        if result.is_err() {
            // Leave no stale temp file behind
            let _ = fs::remove_file(&tmp_path);
        }
        result.map_err(|source| StorageError::Write {
            slot: self.name.clone(),
            source,
        })
    }

    fn write_via_temp(&self, tmp_path: &Path, payload: &str) -> io::Result<()> {
        self.ensure_parent()?;

        let mut tmp = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(tmp_path)?;
        tmp.write_all(payload.as_bytes())?;
        tmp.sync_all()?;
        drop(tmp);

        fs::rename(tmp_path, &self.path)?;

        #[cfg(unix)]
        if let Some(parent) = self.path.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        log::debug!("Wrote {} bytes to {}", payload.len(), self.path.display());
        Ok(())
    }

    fn lock_error(&self, source: io::Error) -> StorageError {
        StorageError::Lock {
            slot: self.name.clone(),
            source,
        }
    }
}

impl DurableSlot for FileSlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        // Writes land by rename, so an unlocked read sees the old or the new payload
        self.read_payload()
    }

    fn begin(&self) -> Result<Box<dyn SlotTransaction + '_>, StorageError> {
        let lock = self.open_lock_file()?;
        lock.lock_exclusive().map_err(|source| self.lock_error(source))?;
        log::debug!("Acquired lock on slot '{}'", self.name);
        Ok(Box::new(FileTransaction { slot: self, lock }))
    }
}

struct FileTransaction<'a> {
    slot: &'a FileSlot,
    lock: File,
}

impl SlotTransaction for FileTransaction<'_> {
    fn read(&mut self) -> Result<Option<String>, StorageError> {
        self.slot.read_payload()
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        self.slot.write_payload(payload)
    }
}

impl Drop for FileTransaction<'_> {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.lock) {
            log::warn!("Failed to release lock on slot '{}': {}", self.slot.name, e);
        }
    }
}
