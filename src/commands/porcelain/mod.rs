//! Porcelain commands
//!
//! The user-facing workflow built on top of the plumbing:
//!
//! - `init`: create the repository metadata directory
//! - `add`: stage files into the index
//! - `commit`: commit the index and advance `main`
//! - `log`: print the reflog
//! - `checkout`: replace the working directory with a commit's tree

pub mod add;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
