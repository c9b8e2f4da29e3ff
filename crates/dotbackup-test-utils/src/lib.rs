//! Shared test utilities for the dotbackup workspace.
//!
//! Fixtures used by the test suites of every crate. This is a
//! dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`home`]: [`TestHome`](home::TestHome), a throwaway home directory
//!   with a backup tree and config file helpers
//! - [`tree`]: directory snapshots for comparing copies

pub mod home;
pub mod tree;
