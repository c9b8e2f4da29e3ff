//! Backing up or setting up a single application

use std::path::{Path, PathBuf};

use dotbackup_fs::{HomeDir, IgnoreMatcher, MirrorOutcome, erase, mirror};
use tracing::{debug, info, warn};

use crate::config::App;
use crate::direction::Direction;
use crate::hooks::{HookContext, run_hooks};
use crate::{Error, Result};

/// The two locations of one configured file.
///
/// `~/.config/nvim` of application `nvim` pairs with
/// `<backup_dir>/nvim/.config/nvim`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    /// Location under the home directory
    pub home: PathBuf,
    /// Location under the backup tree
    pub backup: PathBuf,
}

impl FilePair {
    /// Resolve a configured file entry of application `app`.
    ///
    /// # Errors
    ///
    /// [`Error::OutsideHome`] when the entry does not expand to a path under
    /// home, since only home-relative paths have a place in the backup tree.
    pub fn resolve(home: &HomeDir, backup_dir: &Path, app: &str, file: &str) -> Result<Self> {
        let home_path = home.expand(file);
        let relative = home.relative(&home_path).ok_or_else(|| Error::OutsideHome {
            app: app.to_string(),
            path: home_path.clone(),
            home: home.path().to_path_buf(),
        })?;

        let mut backup = backup_dir.join(app);
        if !relative.as_os_str().is_empty() {
            backup.push(relative);
        }

        Ok(Self {
            backup,
            home: home_path,
        })
    }

    /// Source and destination for a copy in `direction`.
    pub fn route(&self, direction: Direction) -> (&Path, &Path) {
        match direction {
            Direction::Backup => (&self.home, &self.backup),
            Direction::Setup => (&self.backup, &self.home),
        }
    }
}

/// Check that every file of `app` lies under home, without touching disk.
pub fn validate_app(home: &HomeDir, backup_dir: &Path, app: &App) -> Result<()> {
    for file in &app.files {
        FilePair::resolve(home, backup_dir, &app.name, file)?;
    }
    Ok(())
}

/// What happened while processing one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppReport {
    /// Application name
    pub name: String,
    /// Destinations written, in file order
    pub copied: Vec<PathBuf>,
    /// Sources that did not exist (or were not copyable)
    pub skipped: Vec<PathBuf>,
    /// Destinations erased in clean mode
    pub erased: Vec<PathBuf>,
    /// Hook commands run for this application
    pub hooks_run: usize,
}

/// Runs one application's hooks and copies in a given direction.
#[derive(Debug, Clone)]
pub struct AppProcessor<'a> {
    home: &'a HomeDir,
    backup_dir: &'a Path,
    hooks: &'a HookContext,
    clean: bool,
    global_ignore: &'a [String],
}

impl<'a> AppProcessor<'a> {
    /// Create a processor copying between `home` and `backup_dir`.
    pub fn new(home: &'a HomeDir, backup_dir: &'a Path, hooks: &'a HookContext) -> Self {
        Self {
            home,
            backup_dir,
            hooks,
            clean: false,
            global_ignore: &[],
        }
    }

    /// Erase each destination before copying over it.
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Ignore patterns applied on top of each application's own.
    pub fn global_ignore(mut self, patterns: &'a [String]) -> Self {
        self.global_ignore = patterns;
        self
    }

    /// Process `app`: pre hooks, each file in order, post hooks.
    ///
    /// Missing sources are logged and skipped. Hook failures, files outside
    /// home and filesystem errors abort immediately.
    pub fn process(&self, app: &App, direction: Direction) -> Result<AppReport> {
        info!("doing {} {}...", app.name, direction);
        let mut report = AppReport {
            name: app.name.clone(),
            ..AppReport::default()
        };

        let label = format!("{} {}", app.name, direction.pre_label());
        report.hooks_run += run_hooks(&label, app.hooks.pre(direction), self.hooks)?;

        let ignore = IgnoreMatcher::merged(self.global_ignore, &app.ignore);
        for file in &app.files {
            let pair = FilePair::resolve(self.home, self.backup_dir, &app.name, file)?;
            let (src, dst) = pair.route(direction);

            if self.clean && erase(dst)? {
                report.erased.push(dst.to_path_buf());
            }

            match mirror(src, dst, &ignore)? {
                MirrorOutcome::File => {
                    info!("copied {} to {}", src.display(), dst.display());
                    report.copied.push(dst.to_path_buf());
                }
                MirrorOutcome::Tree { files } => {
                    info!("copied {} to {}", src.display(), dst.display());
                    debug!("{} files copied from {}", files, src.display());
                    report.copied.push(dst.to_path_buf());
                }
                MirrorOutcome::Missing => {
                    warn!(
                        "file or directory not found: {}: this file {} skipped",
                        src.display(),
                        direction
                    );
                    report.skipped.push(src.to_path_buf());
                }
                MirrorOutcome::Unsupported => report.skipped.push(src.to_path_buf()),
            }
        }

        let label = format!("{} {}", app.name, direction.post_label());
        report.hooks_run += run_hooks(&label, app.hooks.post(direction), self.hooks)?;

        Ok(report)
    }
}
