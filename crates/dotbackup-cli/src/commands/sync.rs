//! Backup and setup commands

use std::path::Path;

use dotbackup_core::{Config, Direction, Overrides, SyncEngine};
use dotbackup_fs::HomeDir;
use tracing::debug;

use crate::error::Result;

/// Run a backup or setup of the selected applications.
///
/// Nothing is printed on success: standard output carries hook output only.
pub fn run_sync(
    home: HomeDir,
    config_path: &Path,
    direction: Direction,
    overrides: &Overrides,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let engine = SyncEngine::new(home);
    let report = engine.run(&config.effective(overrides), direction)?;

    debug!(
        "{} finished: {} application(s), {} copied, {} skipped, {} erased, {} hook(s)",
        direction,
        report.apps.len(),
        report.copied_count(),
        report.skipped().len(),
        report.erased().len(),
        report.total_hooks_run()
    );
    Ok(())
}
