//! Tree entries
//!
//! A tree maps each name to a `DatabaseEntry`: the digest of the child object and the mode
//! that says whether the child is a file, a symlink, a subtree or a submodule.

pub mod database_entry;
