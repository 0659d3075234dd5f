//! Who and when a commit is recorded
//!
//! The commit path never reads the environment or the wall clock directly; it asks an
//! `IdentityProvider` for the author and a `Clock` for the timestamp, both injected into the
//! repository so tests can pin them.

pub mod clock;
pub mod identity_provider;
