//! A minimal git-compatible object database and working-tree synchronizer
//!
//! - `areas`: the persistent parts of a repository (objects, index, refs, working directory)
//! - `artifacts`: object codecs and the algorithms that move data between the areas
//! - `commands`: the command-line operations, as `impl Repository` blocks
//! - `errors`: the error kinds every operation reports

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
