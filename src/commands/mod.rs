//! Command implementations
//!
//! Commands are `impl Repository` blocks, split the way git splits them:
//!
//! - `plumbing`: object-level commands (hash-object, cat-file, ls-tree, write-tree, commit-tree)
//! - `porcelain`: the user workflow (init, add, commit, log, checkout)

pub mod plumbing;
pub mod porcelain;
