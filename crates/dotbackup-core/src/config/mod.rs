//! Configuration model
//!
//! The dotbackup document (YAML by default) looks like:
//!
//! ```yaml
//! backup_dir: ~/backup
//! clean: false
//! ignore: ["*.log"]
//! pre_backup: ["echo starting"]
//! apps:
//!   nvim:
//!     files: [~/.config/nvim]
//!     ignore: [plugin]
//!     post_setup: ["nvim --headless +PlugInstall +qa"]
//! ```
//!
//! [`Config`] is loaded once and never mutated. Command-line flags are
//! layered on top with [`Overrides`], producing an [`EffectiveConfig`].

mod effective;
mod manifest;

pub use effective::{EffectiveConfig, Overrides};
pub use manifest::{App, Config, Hooks};

/// Where the configuration lives unless `--config` says otherwise.
pub const DEFAULT_CONFIG_FILE: &str = "~/.config/dotbackup/dotbackup.yml";
