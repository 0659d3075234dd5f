//! Object identifier (SHA-1 digest)
//!
//! Held as the raw 20 digest bytes; shown as 40 lowercase hex characters.
//!
//! ## Storage
//!
//! Objects are stored in `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, RAW_OBJECT_ID_LENGTH};
use crate::errors::{Error, Result};
use std::io;
use std::path::PathBuf;

/// Object identifier (SHA-1 digest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; RAW_OBJECT_ID_LENGTH]);

impl ObjectId {
    pub fn from_bytes(raw: [u8; RAW_OBJECT_ID_LENGTH]) -> Self {
        Self(raw)
    }

    /// Parse and validate an object ID from its 40-character hex form
    pub fn try_parse(id: &str) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::InvalidArgument(format!(
                "invalid object ID length {} for {:?}, expected {}",
                id.len(),
                id,
                OBJECT_ID_LENGTH
            )));
        }

        let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
        hex::decode_to_slice(id, &mut raw)
            .map_err(|_| Error::InvalidArgument(format!("invalid object ID characters: {}", id)))?;

        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; RAW_OBJECT_ID_LENGTH] {
        &self.0
    }

    /// Write the object ID in binary format (20 bytes), as embedded in tree entries
    pub fn write_raw_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.0)
    }

    /// Read an object ID from binary format (exactly 20 bytes)
    pub fn read_raw_from<R: io::Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
        reader.read_exact(&mut raw)?;

        Ok(Self(raw))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(7);
        hex
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}
