//! Git data structures and algorithms
//!
//! - `core`: hashing and zlib compression
//! - `database`: tree entries as stored in the database
//! - `identity`: author identity and clock sources for commits
//! - `index`: the staging table line format
//! - `log`: reflog entries
//! - `objects`: blob, tree and commit codecs
//! - `snapshot`: building trees from and extracting them into a working directory

pub mod core;
pub mod database;
pub mod identity;
pub mod index;
pub mod log;
pub mod objects;
pub mod snapshot;
