//! Ref history
//!
//! Every commit prepends one entry to `logs/refs/heads/main`; the file therefore reads newest
//! first and `log` can print it as is.

pub mod reflog_entry;
