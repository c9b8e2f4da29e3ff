//! Shell hooks run around backup and setup
//!
//! Each hook entry is a piece of shell script. It is fed on stdin to its own
//! `sh -s` process, so multi-line scripts, pipes and variables all work.
//! Hook processes share the terminal: their output interleaves with the
//! engine's log lines.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::{Error, Result};

/// Environment variable through which hooks see the resolved backup directory.
pub const BACKUP_DIR_ENV: &str = "BACKUP_DIR";

/// Shell used when none is configured.
pub const DEFAULT_SHELL: &str = "sh";

/// How hook commands are launched: the shell and the extra environment.
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Shell program, invoked as `<shell> -s`
    pub shell: String,
    /// Variables added to every hook process's environment
    pub vars: BTreeMap<String, String>,
}

impl Default for HookContext {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            vars: BTreeMap::new(),
        }
    }
}

impl HookContext {
    /// Context exposing the backup directory as `$BACKUP_DIR`.
    pub fn for_backup_dir(backup_dir: &Path) -> Self {
        let mut context = Self::default();
        context
            .vars
            .insert(BACKUP_DIR_ENV.to_string(), backup_dir.display().to_string());
        context
    }

    /// Use a different shell.
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }
}

/// Run `commands` in order, stopping at the first failure.
///
/// `label` names the hook group in log lines, e.g. `pre-backup` or
/// `nvim post-setup`. Returns the number of commands run.
///
/// # Errors
///
/// [`Error::HookFailed`] when a command exits non-zero and
/// [`Error::HookSpawn`] when the shell cannot be started. Either way the
/// remaining commands are not run.
pub fn run_hooks(label: &str, commands: &[String], context: &HookContext) -> Result<usize> {
    for command in commands {
        info!("running {} hook in shell:\n{}", label, command);
        run_hook(label, command, context)?;
    }
    Ok(commands.len())
}

fn run_hook(label: &str, command: &str, context: &HookContext) -> Result<()> {
    let spawn_error = |source: std::io::Error| Error::HookSpawn {
        label: label.to_string(),
        command: command.to_string(),
        source,
    };

    let mut child = Command::new(&context.shell)
        .arg("-s")
        .envs(&context.vars)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    if let Some(mut stdin) = child.stdin.take() {
        // A script that exits before reading all of its input closes the
        // pipe early; its exit status is what counts.
        match stdin.write_all(command.as_bytes()) {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(spawn_error(e));
            }
            _ => {}
        }
    }

    let status = child.wait().map_err(spawn_error)?;
    if !status.success() {
        return Err(Error::HookFailed {
            label: label.to_string(),
            command: command.to_string(),
            code: status.code(),
        });
    }
    Ok(())
}
