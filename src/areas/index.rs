//! Staging area
//!
//! A flat `path -> blob digest` table, persisted as text in `.git/index`. The table is ordered by
//! path so the file is rewritten deterministically.
//!
//! Reads take a shared lock on the index file and writes an exclusive one.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoContext, Result};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
    entries: BTreeMap<PathBuf, ObjectId>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table from disk; a missing file is an empty index
    ///
    /// Blank or malformed lines are skipped.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let path = self.path.clone();
        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&path)
            .at_path("open index file", &path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)
            .at_path("lock index file", &path)?;

        let mut content = String::new();
        lock.deref_mut()
            .read_to_string(&mut content)
            .at_path("read index file", &path)?;

        for line in content.lines() {
            match IndexEntry::parse_line(line) {
                Some(entry) => {
                    self.entries.insert(entry.path, entry.oid);
                }
                None if line.trim().is_empty() => {}
                None => warn!(line, "skipping malformed index line"),
            }
        }

        Ok(())
    }

    /// Record a staged file; the last write for a path wins
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.path, entry.oid);
        self.changed = true;
    }

    /// Drop every entry, as before a full re-stage
    pub fn clear(&mut self) {
        self.entries.clear();
        self.changed = true;
    }

    pub fn get(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// The table as a tree-building scope
    pub fn scope(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.entries
    }

    pub fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        self.entries
            .iter()
            .map(|(path, oid)| IndexEntry::new(path.clone(), *oid))
    }

    pub fn write_updates(&mut self) -> Result<()> {
        let path = self.path.clone();
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .at_path("open index file", &path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)
            .at_path("lock index file", &path)?;

        let content = self.entries().map(|entry| entry.to_line()).collect::<String>();
        lock.deref_mut()
            .write_all(content.as_bytes())
            .at_path("write index file", &path)?;

        debug!(entries = self.entries.len(), "index written");
        self.changed = false;

        Ok(())
    }
}
