//! Backup and setup runs
//!
//! - **engine**: the [`SyncEngine`] orchestrating a whole run
//! - **app**: the [`AppProcessor`] handling one application's hooks and files

mod app;
mod engine;

pub use app::{AppProcessor, AppReport, FilePair, validate_app};
pub use engine::{SyncEngine, SyncReport};
