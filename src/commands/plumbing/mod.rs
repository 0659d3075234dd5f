//! Plumbing commands
//!
//! Direct access to the object database, mostly for scripting:
//!
//! - `hash-object`: compute a blob digest and optionally store it
//! - `cat-file`: print an object's content, type or size
//! - `ls-tree`: list the direct entries of a tree
//! - `write-tree`: store the working directory as a tree
//! - `commit-tree`: create a commit from an existing tree

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
