//! Core repository components
//!
//! - `database`: content-addressed object storage under `.git/objects`
//! - `index`: the staging table under `.git/index`
//! - `refs`: `HEAD`, the `main` branch and its reflog
//! - `repository`: ties the areas together and carries the injected identity and clock
//! - `workspace`: working directory access and the exclusion set

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
