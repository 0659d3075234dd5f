//! References and their history
//!
//! There is one branch, `main`. `HEAD` is a symbolic reference to it:
//!
//! - `.git/HEAD` holds `ref: refs/heads/main`
//! - `.git/refs/heads/main` holds the 40-hex digest of the latest commit
//! - `.git/logs/refs/heads/main` holds the reflog, newest entry first
//!
//! Ref files are replaced by writing a temp file and renaming it over the old one.

use crate::artifacts::log::reflog_entry::ReflogEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoContext, Result};
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// The only branch this repository format supports
pub const DEFAULT_BRANCH: &str = "main";

const HEADS_PREFIX: &str = "refs/heads/";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository metadata directory (typically `.git`)
    path: Box<Path>,
}

/// Content of a ref file
#[derive(Debug, Clone, PartialEq, Eq)]
enum SymRefOrOid {
    SymRef(String),
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read(path: &Path) -> Result<Option<SymRefOrOid>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).at_path("read ref file", path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_regex = regex::Regex::new(SYMREF_REGEX)
            .map_err(|e| Error::InvalidArgument(format!("invalid symref pattern: {}", e)))?;
        match symref_regex.captures(content) {
            Some(symref_match) => Ok(Some(SymRefOrOid::SymRef(symref_match[1].to_string()))),
            None => ObjectId::try_parse(content)
                .map(|oid| Some(SymRefOrOid::Oid(oid)))
                .map_err(|_| Error::corrupt(format!("ref {} holds {:?}", path.display(), content))),
        }
    }
}

impl Refs {
    /// Write `HEAD` pointing at the default branch unless it already exists
    pub fn init_head(&self) -> Result<()> {
        let head_path = self.head_path();
        if head_path.exists() {
            return Ok(());
        }

        self.update_ref_file(&head_path, &format!("ref: {}{}\n", HEADS_PREFIX, DEFAULT_BRANCH))
    }

    /// The ref `HEAD` points at, e.g. `refs/heads/main`
    ///
    /// A missing or detached `HEAD` falls back to the default branch.
    pub fn current_ref(&self) -> Result<String> {
        match SymRefOrOid::read(&self.head_path())? {
            Some(SymRefOrOid::SymRef(target)) => Ok(target),
            Some(SymRefOrOid::Oid(_)) | None => Ok(format!("{}{}", HEADS_PREFIX, DEFAULT_BRANCH)),
        }
    }

    /// Short branch name of the current ref, e.g. `main`
    pub fn current_branch(&self) -> Result<String> {
        let current_ref = self.current_ref()?;
        Ok(current_ref
            .strip_prefix(HEADS_PREFIX)
            .unwrap_or(&current_ref)
            .to_string())
    }

    /// Digest the current branch points at; `None` before the first commit
    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        self.read_symref(&self.head_path(), 0)
    }

    fn read_symref(&self, path: &Path, depth: usize) -> Result<Option<ObjectId>> {
        // guards against a ref pointing at itself
        if depth > 5 {
            return Err(Error::corrupt(format!(
                "symbolic ref chain through {} is too deep",
                path.display()
            )));
        }

        match SymRefOrOid::read(path)? {
            Some(SymRefOrOid::SymRef(target)) => self.read_symref(&self.path.join(target), depth + 1),
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    /// Point the current branch at `oid`, creating the ref file if needed
    pub fn advance_ref(&self, oid: &ObjectId) -> Result<()> {
        let ref_path = self.path.join(self.current_ref()?);
        self.update_ref_file(&ref_path, &format!("{}\n", oid))?;

        info!(%oid, path = %ref_path.display(), "advanced ref");
        Ok(())
    }

    /// Replace a ref file's content atomically
    pub fn update_ref_file(&self, path: &Path, content: &str) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::InvalidArgument(format!("invalid ref path {}", path.display())))?;
        std::fs::create_dir_all(parent).at_path("create directory", parent)?;

        let temp_path = Self::temp_path_for(path);
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .at_path("open ref file", &temp_path)?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)
            .at_path("lock ref file", &temp_path)?;
        lock.deref_mut()
            .write_all(content.as_bytes())
            .at_path("write ref file", &temp_path)?;
        drop(lock);

        std::fs::rename(&temp_path, path).at_path("rename ref file to", path)
    }

    /// Prepend an entry to the current branch's reflog
    pub fn append_reflog(&self, entry: &ReflogEntry) -> Result<()> {
        let log_path = self.reflog_path()?;
        let existing = self.read_reflog()?;

        let mut content = entry.to_text();
        content.push_str(&existing);
        self.update_ref_file(&log_path, &content)?;

        debug!(oid = %entry.oid, path = %log_path.display(), "prepended reflog entry");
        Ok(())
    }

    /// Full reflog text, newest first; empty before the first commit
    pub fn read_reflog(&self) -> Result<String> {
        let log_path = self.reflog_path()?;
        if !log_path.exists() {
            return Ok(String::new());
        }

        std::fs::read_to_string(&log_path).at_path("read reflog", &log_path)
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn reflog_path(&self) -> Result<PathBuf> {
        Ok(self.path.join("logs").join(self.current_ref()?))
    }

    fn temp_path_for(path: &Path) -> PathBuf {
        let mut file_name = path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".lock");
        path.with_file_name(file_name)
    }
}
