//! Filesystem primitives for dotbackup
//!
//! Provides home-relative path expansion, ignore-pattern matching and the
//! copy/erase operations the sync engine is built from.

pub mod config;
pub mod erase;
pub mod error;
pub mod ignore;
pub mod io;
pub mod mirror;
pub mod path;

pub use config::ConfigStore;
pub use erase::erase;
pub use error::{Error, Result};
pub use ignore::IgnoreMatcher;
pub use mirror::{MirrorOutcome, mirror};
pub use path::{HomeDir, normalize};
