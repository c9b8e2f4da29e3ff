//! Error types for dotbackup-core

use std::path::PathBuf;

/// Result type for dotbackup-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dotbackup-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration document has no content
    #[error("empty configuration: {path}")]
    EmptyConfig { path: PathBuf },

    /// A required configuration field is absent
    #[error("bad configuration: {field} is not set")]
    MissingField { field: &'static str },

    /// An application name cannot be used as a backup directory segment
    #[error("bad configuration: invalid application name: {name:?}")]
    InvalidAppName { name: String },

    /// A selected application is not in the configuration
    #[error("application not configured: {name}")]
    UnknownApp { name: String },

    /// An application file resolves outside the home directory
    #[error(
        "file or directory not under {home}: {path}: you can use hooks to back up \
         files outside the home directory"
    )]
    OutsideHome {
        app: String,
        path: PathBuf,
        home: PathBuf,
    },

    /// The backup directory does not exist
    #[error("backup directory not found: {path}")]
    BackupDirNotFound { path: PathBuf },

    /// A direction other than `backup` or `setup`
    #[error("unknown direction: {value}")]
    InvalidDirection { value: String },

    /// Neither `$HOME` nor the platform lookup produced a home directory
    #[error("home directory could not be determined")]
    HomeNotFound,

    /// A hook command exited with a non-zero status
    #[error("command failed: {command}")]
    HookFailed {
        label: String,
        command: String,
        code: Option<i32>,
    },

    /// The shell for a hook command could not be started or fed
    #[error("command failed to launch: {command}: {source}")]
    HookSpawn {
        label: String,
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error from dotbackup-fs
    #[error(transparent)]
    Fs(#[from] dotbackup_fs::Error),
}
