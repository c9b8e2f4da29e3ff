//! SyncEngine implementation
//!
//! The SyncEngine drives one backup or setup run: pre-flight checks, global
//! hooks and every selected application in order.

use std::path::{Path, PathBuf};

use dotbackup_fs::HomeDir;
use tracing::debug;

use crate::config::{App, EffectiveConfig};
use crate::direction::Direction;
use crate::hooks::{DEFAULT_SHELL, HookContext, run_hooks};
use crate::{Error, Result};

use super::app::{AppProcessor, AppReport, validate_app};

/// Report from a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Direction of the run
    pub direction: Direction,
    /// Resolved backup directory
    pub backup_dir: PathBuf,
    /// Per-application results, in processing order
    pub apps: Vec<AppReport>,
    /// Global hook commands run
    pub hooks_run: usize,
}

impl SyncReport {
    fn new(direction: Direction, backup_dir: PathBuf) -> Self {
        Self {
            direction,
            backup_dir,
            apps: Vec::new(),
            hooks_run: 0,
        }
    }

    /// Names of the processed applications.
    pub fn app_names(&self) -> Vec<&str> {
        self.apps.iter().map(|app| app.name.as_str()).collect()
    }

    /// Number of files and trees copied across all applications.
    pub fn copied_count(&self) -> usize {
        self.apps.iter().map(|app| app.copied.len()).sum()
    }

    /// Every skipped source across all applications.
    pub fn skipped(&self) -> Vec<&Path> {
        self.apps
            .iter()
            .flat_map(|app| app.skipped.iter().map(PathBuf::as_path))
            .collect()
    }

    /// Every erased destination across all applications.
    pub fn erased(&self) -> Vec<&Path> {
        self.apps
            .iter()
            .flat_map(|app| app.erased.iter().map(PathBuf::as_path))
            .collect()
    }

    /// Hook commands run, global and per application.
    pub fn total_hooks_run(&self) -> usize {
        self.hooks_run + self.apps.iter().map(|app| app.hooks_run).sum::<usize>()
    }
}

/// Engine for backing up and setting up configured applications
///
/// Runs are strictly sequential: hooks, applications and files are handled
/// one at a time in configuration order, and the first fatal error ends
/// the run. Work already done is kept.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    home: HomeDir,
    shell: String,
}

impl SyncEngine {
    /// Create an engine working relative to `home`.
    pub fn new(home: HomeDir) -> Self {
        Self {
            home,
            shell: DEFAULT_SHELL.to_string(),
        }
    }

    /// Create an engine for the current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeNotFound`] if no home directory can be located.
    pub fn from_env() -> Result<Self> {
        HomeDir::from_env().map(Self::new).ok_or(Error::HomeNotFound)
    }

    /// Run hooks with a different shell.
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// The home directory files are resolved against.
    pub fn home(&self) -> &HomeDir {
        &self.home
    }

    /// Back up the selected applications.
    pub fn backup(&self, config: &EffectiveConfig<'_>) -> Result<SyncReport> {
        self.run(config, Direction::Backup)
    }

    /// Set up the selected applications from the backup.
    pub fn setup(&self, config: &EffectiveConfig<'_>) -> Result<SyncReport> {
        self.run(config, Direction::Setup)
    }

    /// Check everything that can be checked before anything is touched.
    ///
    /// In order: every selected application exists, every file of every
    /// configured application lies under home, and the backup directory
    /// exists. Returns the applications to process and the backup directory.
    pub fn preflight<'a>(
        &self,
        config: &EffectiveConfig<'a>,
    ) -> Result<(Vec<&'a App>, PathBuf)> {
        let selected = config.selected()?;

        let backup_dir = self.home.expand(&config.config.backup_dir);
        for app in config.config.apps.values() {
            validate_app(&self.home, &backup_dir, app)?;
        }

        if !backup_dir.is_dir() {
            return Err(Error::BackupDirNotFound { path: backup_dir });
        }

        Ok((selected, backup_dir))
    }

    /// Run a full backup or setup.
    ///
    /// # Errors
    ///
    /// Any pre-flight failure (see [`SyncEngine::preflight`]) before hooks
    /// or copies happen; afterwards the first hook failure, out-of-home file
    /// or filesystem error.
    pub fn run(&self, config: &EffectiveConfig<'_>, direction: Direction) -> Result<SyncReport> {
        let (apps, backup_dir) = self.preflight(config)?;
        debug!(
            "{} of {} application(s) into {} (clean: {})",
            direction,
            apps.len(),
            backup_dir.display(),
            config.clean
        );

        let hooks = HookContext::for_backup_dir(&backup_dir).with_shell(self.shell.clone());
        let mut report = SyncReport::new(direction, backup_dir.clone());

        report.hooks_run += run_hooks(
            direction.pre_label(),
            config.config.hooks.pre(direction),
            &hooks,
        )?;

        let processor = AppProcessor::new(&self.home, &backup_dir, &hooks)
            .clean(config.clean)
            .global_ignore(&config.config.ignore);
        for app in apps {
            report.apps.push(processor.process(app, direction)?);
        }

        report.hooks_run += run_hooks(
            direction.post_label(),
            config.config.hooks.post(direction),
            &hooks,
        )?;

        Ok(report)
    }
}
