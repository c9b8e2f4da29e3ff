//! Listing configured applications

use std::path::Path;

use dotbackup_core::Config;

use crate::error::Result;

/// Run the list command: one application name per line, in document order.
pub fn run_list(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    print!("{}", app_list(&config));
    Ok(())
}

fn app_list(config: &Config) -> String {
    config.app_names().map(|name| format!("{name}\n")).collect()
}
