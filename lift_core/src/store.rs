//! Set persistence with file locking.
//!
//! The whole collection lives in one JSON document, `{"sets": [...]}`,
//! which is always replaced wholesale. Every operation that touches the
//! document runs under an exclusive lock on a sidecar lock file, so a
//! read-modify-write cycle through [`SetStore::update`] cannot interleave
//! with another process's cycle.

use crate::{Result, TrainingSet};
use fs2::FileExt;
use serde::Serialize;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name of the collection document inside the data directory
pub const STORE_FILE: &str = "sets.json";

const LOCK_FILE: &str = "sets.json.lock";

#[derive(Serialize)]
struct StoreDocument<'a> {
    sets: &'a [TrainingSet],
}

/// Canonical sets recovered from raw stored records
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciled {
    pub sets: Vec<TrainingSet>,
    /// True when any record differed from its canonical form
    pub changed: bool,
}

/// Normalize every raw record and report whether a rewrite is needed
pub fn reconcile(raw: &[Value]) -> Reconciled {
    let mut changed = false;
    let sets = raw
        .iter()
        .map(|record| {
            let set = TrainingSet::normalize(record);
            if !set.matches_raw(record) {
                changed = true;
            }
            set
        })
        .collect();
    Reconciled { sets, changed }
}

/// Exclusive hold on the store, released on drop
struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// The durable collection of logged sets
#[derive(Clone, Debug)]
pub struct SetStore {
    dir: PathBuf,
    path: PathBuf,
}

impl SetStore {
    /// Create a store rooted at `data_dir`; nothing is touched on disk yet
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let dir = data_dir.into();
        let path = dir.join(STORE_FILE);
        Self { dir, path }
    }

    /// Path of the collection document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data directory and an empty collection if missing
    pub fn ensure_store(&self) -> Result<()> {
        let _lock = self.lock()?;
        self.ensure_document()
    }

    /// Load all sets, rewriting the document first if any record drifted
    pub fn read_all(&self) -> Result<Vec<TrainingSet>> {
        let _lock = self.lock()?;
        self.load()
    }

    /// Replace the entire collection
    pub fn write_all(&self, sets: &[TrainingSet]) -> Result<()> {
        let _lock = self.lock()?;
        self.persist(sets)
    }

    /// Load, modify, and save the collection under one exclusive lock
    ///
    /// Nothing is written when `f` returns an error.
    pub fn update<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<TrainingSet>) -> Result<T>,
    {
        let _lock = self.lock()?;
        let mut sets = self.load()?;
        let output = f(&mut sets)?;
        self.persist(&sets)?;
        Ok(output)
    }

    fn lock(&self) -> Result<StoreLock> {
        std::fs::create_dir_all(&self.dir)?;
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(self.dir.join(LOCK_FILE))?;
        file.lock_exclusive()?;
        Ok(StoreLock { file })
    }

    fn ensure_document(&self) -> Result<()> {
        if !self.path.exists() {
            tracing::info!("Creating empty set store at {:?}", self.path);
            self.persist(&[])?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<TrainingSet>> {
        self.ensure_document()?;

        let contents = std::fs::read_to_string(&self.path)?;
        let raw = if contents.trim().is_empty() {
            Vec::new()
        } else {
            let document: Value = serde_json::from_str(&contents)?;
            document
                .get("sets")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };

        let Reconciled { sets, changed } = reconcile(&raw);
        if changed {
            tracing::info!(
                "Normalized drifted records in {:?}, rewriting store",
                self.path
            );
            self.persist(&sets)?;
        }

        tracing::debug!("Loaded {} sets from {:?}", sets.len(), self.path);
        Ok(sets)
    }

    /// Atomically writes the document by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn persist(&self, sets: &[TrainingSet]) -> Result<()> {
        let temp = NamedTempFile::new_in(&self.dir)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, &StoreDocument { sets })?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(&self.path)
            .map_err(|e| crate::Error::Io(e.error))?;

        tracing::debug!("Saved {} sets to {:?}", sets.len(), self.path);
        Ok(())
    }
}
