//! Command implementations for dotbackup-cli

pub mod list;
pub mod sync;

pub use list::run_list;
pub use sync::run_sync;
