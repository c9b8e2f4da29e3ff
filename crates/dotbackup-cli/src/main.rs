//! dotbackup CLI
//!
//! Backs up application configuration files into a backup directory and
//! sets them up again from it, driven by a YAML configuration.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use dotbackup_core::{Error, Overrides};
use dotbackup_fs::HomeDir;

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let home = HomeDir::from_env().ok_or(Error::HomeNotFound)?;
    let config_path = home.expand(&cli.config);
    tracing::debug!("Using configuration {}", config_path.display());

    if cli.list {
        return commands::run_list(&config_path);
    }

    let (direction, apps) = cli.action();
    let overrides = Overrides {
        clean: cli.clean,
        apps,
    };
    commands::run_sync(home, &config_path, direction, &overrides)
}
