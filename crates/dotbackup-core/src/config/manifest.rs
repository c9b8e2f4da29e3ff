//! Typed configuration records parsed from the dotbackup document
//!
//! The document is deserialized into private, lenient mirror structs and
//! then validated into [`Config`] and [`App`], so the rest of the engine
//! never deals with optional or raw values.

use std::path::Path;

use dotbackup_fs::ConfigStore;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::direction::Direction;
use crate::{Error, Result};

/// Shell hooks for both directions, global or per application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hooks {
    #[serde(default, deserialize_with = "nullable")]
    pub pre_backup: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub post_backup: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub pre_setup: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub post_setup: Vec<String>,
}

impl Hooks {
    /// Commands to run before copying in `direction`.
    pub fn pre(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Backup => &self.pre_backup,
            Direction::Setup => &self.pre_setup,
        }
    }

    /// Commands to run after copying in `direction`.
    pub fn post(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Backup => &self.post_backup,
            Direction::Setup => &self.post_setup,
        }
    }
}

/// One named group of files and hooks, backed up and set up as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Unique name, also the directory under the backup root
    #[serde(skip)]
    pub name: String,
    /// Paths under home, usually written as `~/...`
    #[serde(default, deserialize_with = "nullable")]
    pub files: Vec<String>,
    /// Glob patterns skipped in this application's directory copies
    #[serde(default, deserialize_with = "nullable")]
    pub ignore: Vec<String>,
    #[serde(flatten)]
    pub hooks: Hooks,
}

/// The whole configuration, immutable once loaded.
///
/// Invocation flags never modify it; see [`Config::effective`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the backup tree as written in the document
    pub backup_dir: String,
    /// Erase each destination before copying over it
    pub clean: bool,
    /// Glob patterns skipped in every application's directory copies
    pub ignore: Vec<String>,
    /// Hooks run once per invocation around all applications
    pub hooks: Hooks,
    /// Applications in document order
    pub apps: IndexMap<String, App>,
}

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    backup_dir: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    clean: bool,
    #[serde(default, deserialize_with = "nullable")]
    ignore: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    apps: IndexMap<String, Option<App>>,
    #[serde(flatten)]
    hooks: Hooks,
}

impl Config {
    /// Load and validate the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = dotbackup_fs::io::read_text(path)?;
        Self::parse(path, &content)
    }

    /// Parse configuration content; `path` picks the format and labels errors.
    ///
    /// # Example
    ///
    /// ```
    /// use std::path::Path;
    /// use dotbackup_core::Config;
    ///
    /// let config = Config::parse(Path::new("dotbackup.yml"), r#"
    /// backup_dir: ~/backup
    /// apps:
    ///   vim:
    ///     files: [~/.vimrc]
    /// "#).unwrap();
    ///
    /// assert_eq!(config.backup_dir, "~/backup");
    /// assert_eq!(config.apps["vim"].files, vec!["~/.vimrc"]);
    /// ```
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(Error::EmptyConfig {
                path: path.to_path_buf(),
            });
        }

        let document: Option<ConfigDocument> = ConfigStore::new().parse(path, content)?;
        let document = document.ok_or_else(|| Error::EmptyConfig {
            path: path.to_path_buf(),
        })?;
        Self::from_document(document)
    }

    fn from_document(document: ConfigDocument) -> Result<Self> {
        let backup_dir = document
            .backup_dir
            .filter(|dir| !dir.trim().is_empty())
            .ok_or(Error::MissingField {
                field: "backup_dir",
            })?;

        let mut apps = IndexMap::with_capacity(document.apps.len());
        for (name, app) in document.apps {
            validate_app_name(&name)?;
            let mut app = app.unwrap_or_default();
            app.name = name.clone();
            apps.insert(name, app);
        }

        Ok(Self {
            backup_dir,
            clean: document.clean,
            ignore: document.ignore,
            hooks: document.hooks,
            apps,
        })
    }

    /// Look up an application by name.
    pub fn app(&self, name: &str) -> Option<&App> {
        self.apps.get(name)
    }

    /// Application names in document order.
    pub fn app_names(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }
}

/// Names become a single directory under the backup root.
fn validate_app_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if bad {
        return Err(Error::InvalidAppName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Treat an explicit `null` like an absent key.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
