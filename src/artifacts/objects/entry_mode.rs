//! Tree entry modes
//!
//! On the wire a mode is the ASCII octal text before the entry name:
//!
//! | Entry          | Mode                       |
//! |----------------|----------------------------|
//! | Directory      | `40000`                    |
//! | Regular file   | `100` + permission digits  |
//! | Symbolic link  | `120000`                   |
//! | Submodule link | `160000`                   |
//!
//! Listings always show the zero-padded six-character form (`040000`).

use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use std::fs::Metadata;

const DIRECTORY_MODE: &str = "40000";
const SYMLINK_MODE: &str = "120000";
const GITLINK_MODE: &str = "160000";
const REGULAR_FILE_PREFIX: &str = "100";

/// Default permission bits where the platform has none to offer
const DEFAULT_PERMISSIONS: u32 = 0o644;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryMode {
    Directory,
    /// Regular file with its permission bits (masked to `0o777`)
    RegularFile(u32),
    Symlink,
    GitLink,
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode::RegularFile(DEFAULT_PERMISSIONS)
    }
}

impl EntryMode {
    /// Mode text as stored in tree payloads
    pub fn to_wire(&self) -> String {
        match self {
            EntryMode::Directory => DIRECTORY_MODE.to_string(),
            EntryMode::RegularFile(permissions) => {
                format!("{}{:03o}", REGULAR_FILE_PREFIX, permissions & 0o777)
            }
            EntryMode::Symlink => SYMLINK_MODE.to_string(),
            EntryMode::GitLink => GITLINK_MODE.to_string(),
        }
    }

    /// Mode text as shown to users, always six characters
    pub fn to_display(&self) -> String {
        format!("{:0>6}", self.to_wire())
    }

    pub fn from_octal_str(mode: &str) -> Result<Self> {
        match mode {
            DIRECTORY_MODE => Ok(EntryMode::Directory),
            SYMLINK_MODE => Ok(EntryMode::Symlink),
            GITLINK_MODE => Ok(EntryMode::GitLink),
            _ => {
                let permissions = mode
                    .strip_prefix(REGULAR_FILE_PREFIX)
                    .filter(|bits| bits.len() == 3)
                    .and_then(|bits| u32::from_str_radix(bits, 8).ok())
                    .ok_or_else(|| Error::corrupt(format!("invalid entry mode {:?}", mode)))?;

                Ok(EntryMode::RegularFile(permissions))
            }
        }
    }

    /// Mode of a working-tree path, from metadata that was read without following links
    pub fn from_metadata(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            EntryMode::Directory
        } else if metadata.file_type().is_symlink() {
            EntryMode::Symlink
        } else {
            EntryMode::RegularFile(Self::permissions_of(metadata))
        }
    }

    #[cfg(unix)]
    fn permissions_of(metadata: &Metadata) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o777
    }

    #[cfg(not(unix))]
    fn permissions_of(_metadata: &Metadata) -> u32 {
        DEFAULT_PERMISSIONS
    }

    /// What kind of object an entry with this mode points at
    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::Directory => ObjectType::Tree,
            EntryMode::GitLink => ObjectType::Commit,
            EntryMode::RegularFile(_) | EntryMode::Symlink => ObjectType::Blob,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }
}
