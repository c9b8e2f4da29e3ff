//! Which way files flow in one run

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The direction of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Home to backup tree
    Backup,
    /// Backup tree to home
    Setup,
}

impl Direction {
    /// Label for hooks that run before this direction's copies.
    pub fn pre_label(&self) -> &'static str {
        match self {
            Self::Backup => "pre-backup",
            Self::Setup => "pre-setup",
        }
    }

    /// Label for hooks that run after this direction's copies.
    pub fn post_label(&self) -> &'static str {
        match self {
            Self::Backup => "post-backup",
            Self::Setup => "post-setup",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backup => write!(f, "backup"),
            Self::Setup => write!(f, "setup"),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backup" => Ok(Self::Backup),
            "setup" => Ok(Self::Setup),
            _ => Err(Error::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}
