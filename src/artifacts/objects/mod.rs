//! Object types and operations
//!
//! All content is stored as objects identified by SHA-1 hashes. There are three types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commit, tree)
//!
//! All objects share the encoded layout `<type> <size>\0<payload>`.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_header;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
