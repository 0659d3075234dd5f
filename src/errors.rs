//! Error kinds surfaced by the object database and the commands built on it

use crate::artifacts::objects::object_id::ObjectId;
use std::path::Path;

/// Errors from repository operations.
///
/// Every error is terminal to the command that produced it; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed user input (digest length, missing flag, unknown path).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested digest is not present in the object database.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// The object header or payload framing violates the codec.
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    /// A file could not be opened, read or written.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The inflate engine rejected the stream.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// No author identity could be resolved; commits are never anonymous.
    #[error("unable to resolve author identity: {0}")]
    MissingIdentity(String),
}

impl Error {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    pub fn io_at(action: &str, path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            context: format!("unable to {} {}", action, path.display()),
            source,
        }
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        Error::CorruptObject(reason.into())
    }
}

/// Result alias for repository operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Attach a path-aware context to `std::io` results.
pub(crate) trait IoContext<T> {
    fn at_path(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at_path(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::io_at(action, path, source))
    }
}
