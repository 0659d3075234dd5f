use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::path::{Path, PathBuf};

/// A staged file: its path relative to the repository root and the digest of its blob
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub path: PathBuf,
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Encode as an index line, including the trailing newline
    pub fn to_line(&self) -> String {
        format!("{} {}\n", Self::portable_path(&self.path), self.oid)
    }

    /// Parse one index line; blank or malformed lines yield `None`
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        let (path, oid) = line.rsplit_once(' ')?;

        if path.is_empty() {
            return None;
        }
        let oid = ObjectId::try_parse(oid).ok()?;

        Some(IndexEntry::new(PathBuf::from(path), oid))
    }

    fn portable_path(path: &Path) -> String {
        path.components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
