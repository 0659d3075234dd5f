//! Byte-level primitives shared by the object database
//!
//! - `digest`: SHA-1 content hashing
//! - `compression`: zlib DEFLATE, both whole-buffer and chunk-fed

pub mod compression;
pub mod digest;
