//! Core sync engine for dotbackup
//!
//! This crate turns a configuration into backup and setup runs:
//!
//! - **Configuration**: typed [`Config`] and [`App`] records plus invocation [`Overrides`]
//! - **Hooks**: shell snippets run before and after each phase
//! - **SyncEngine**: pre-flight checks, global hooks and per-application copies
//!
//! # Architecture
//!
//! ```text
//!            dotbackup-cli
//!                  |
//!           dotbackup-core
//!     config / hooks / sync engine
//!                  |
//!            dotbackup-fs
//!   paths / ignore / mirror / erase
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dotbackup_core::{Config, Overrides, SyncEngine};
//!
//! fn example() -> dotbackup_core::Result<()> {
//!     let engine = SyncEngine::from_env()?;
//!     let path = engine.home().expand("~/.config/dotbackup/dotbackup.yml");
//!     let config = Config::load(&path)?;
//!     let report = engine.backup(&config.effective(&Overrides::default()))?;
//!     println!("{} copied", report.copied_count());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod direction;
pub mod error;
pub mod hooks;
pub mod sync;

pub use config::{App, Config, EffectiveConfig, Hooks, Overrides};
pub use direction::Direction;
pub use error::{Error, Result};
pub use hooks::{BACKUP_DIR_ENV, HookContext, run_hooks};
pub use sync::{AppProcessor, AppReport, FilePair, SyncEngine, SyncReport};
