//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs),
//! symbolic links, submodule links and subdirectories (other trees), along with
//! their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! The digest is raw binary embedded in otherwise textual data, so the payload is
//! scanned byte by byte rather than line by line. Names are raw bytes, not necessarily
//! UTF-8, and entries are kept in ascending byte order of their names, which makes the
//! encoding (and therefore the tree digest) deterministic.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io::{BufRead, ErrorKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<Vec<u8>, DatabaseEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, rejecting names that cannot live in a single tree.
    pub fn insert(&mut self, name: impl AsRef<[u8]>, entry: DatabaseEntry) -> Result<()> {
        let name = name.as_ref();
        Self::check_name(name)?;

        match self.entries.entry(name.to_vec()) {
            Entry::Occupied(_) => Err(Error::corrupt(format!(
                "duplicate tree entry name {:?}",
                Self::display_name(name)
            ))),
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
                Ok(())
            }
        }
    }

    fn check_name(name: &[u8]) -> Result<()> {
        let reserved = name.is_empty() || name == b"." || name == b"..";
        if reserved || name.contains(&b'/') || name.contains(&0) {
            return Err(Error::corrupt(format!(
                "invalid tree entry name {:?}",
                Self::display_name(name)
            )));
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<&DatabaseEntry> {
        self.entries.get(name.as_ref())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&[u8], &DatabaseEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_slice(), entry))
    }

    pub fn into_entries(self) -> impl Iterator<Item = (Vec<u8>, DatabaseEntry)> {
        self.entries.into_iter()
    }

    /// A name as shown to users; bytes that are not UTF-8 become U+FFFD
    pub fn display_name(name: &[u8]) -> Cow<'_, str> {
        String::from_utf8_lossy(name)
    }

    /// One `<mode> <type> <oid>\t<name>` line per entry
    pub fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(name, entry)| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode.to_display(),
                    entry.mode.object_type(),
                    entry.oid,
                    Self::display_name(name)
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut content = Vec::new();

        for (name, entry) in &self.entries {
            content.extend_from_slice(entry.mode.to_wire().as_bytes());
            content.push(b' ');
            content.extend_from_slice(name);
            content.push(0);
            content.extend_from_slice(entry.oid.as_bytes());
        }

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> Result<Self> {
        let mut tree = Tree::new();
        let mut reader = reader;
        let read_error = |source| Error::io("unable to read tree payload", source);

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes).map_err(read_error)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(Error::corrupt("unexpected end of tree in entry mode"));
            }

            let mode_str = std::str::from_utf8(&mode_bytes)
                .map_err(|_| Error::corrupt("tree entry mode is not ASCII"))?;
            let mode = EntryMode::from_octal_str(mode_str)?;

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes).map_err(read_error)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(Error::corrupt("unexpected end of tree in entry name"));
            }
            // Exactly 20 raw bytes of object id
            let oid = ObjectId::read_raw_from(&mut reader).map_err(|e| match e.kind() {
                ErrorKind::UnexpectedEof => Error::corrupt("unexpected end of tree in object id"),
                _ => read_error(e),
            })?;

            tree.insert(&name_bytes, DatabaseEntry::new(oid, mode))?;
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
