//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use dotbackup_core::Direction;
use dotbackup_core::config::DEFAULT_CONFIG_FILE;

/// dotbackup - Back up and set up your dotfiles from one YAML file
#[derive(Parser, Debug)]
#[command(name = "dotbackup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file; `~/` is expanded
    #[arg(
        short,
        long,
        global = true,
        env = "DOTBACKUP_CONFIG",
        default_value = DEFAULT_CONFIG_FILE,
        value_name = "CONFIG"
    )]
    pub config: String,

    /// Erase each destination before copying over it
    #[arg(long, global = true)]
    pub clean: bool,

    /// Print configured applications and exit
    #[arg(short, long, global = true)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Applications to back up when no command is given (default: all)
    #[arg(value_name = "APP")]
    pub apps: Vec<String>,

    /// The command to run (default: backup)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Copy application files from home into the backup directory
    ///
    /// Examples:
    ///   dotbackup backup              # Every configured application
    ///   dotbackup backup nvim zsh     # Only nvim and zsh, in that order
    Backup {
        /// Applications to back up (default: all)
        #[arg(value_name = "APP")]
        apps: Vec<String>,
    },

    /// Copy application files from the backup directory into home
    Setup {
        /// Applications to set up (default: all)
        #[arg(value_name = "APP")]
        apps: Vec<String>,
    },
}

impl Cli {
    /// Direction and selected applications.
    ///
    /// Without a command, `dotbackup app_a` backs up `app_a`. Names given
    /// before a command are selected along with the command's own.
    pub fn action(&self) -> (Direction, Vec<String>) {
        let (direction, command_apps) = match &self.command {
            Some(Commands::Backup { apps }) => (Direction::Backup, apps.as_slice()),
            Some(Commands::Setup { apps }) => (Direction::Setup, apps.as_slice()),
            None => (Direction::Backup, [].as_slice()),
        };
        let apps = self.apps.iter().chain(command_apps).cloned().collect();
        (direction, apps)
    }
}
