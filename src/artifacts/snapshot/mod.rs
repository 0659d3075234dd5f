//! Conversion between a working directory and a tree object graph
//!
//! - `builder`: directory -> tree digest, optionally scoped to the staged paths
//! - `extractor`: tree digest -> directory, reading trees lazily through the database

pub mod builder;
pub mod extractor;
