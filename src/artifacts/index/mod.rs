//! Staging table format
//!
//! The index is a plain text file with one staged file per line:
//!
//! ```text
//! <path relative to the repository root> <40-hex blob digest>
//! ```
//!
//! Paths always use `/` as separator. The digest is the last space-separated field, so paths
//! may themselves contain spaces.

pub mod index_entry;
