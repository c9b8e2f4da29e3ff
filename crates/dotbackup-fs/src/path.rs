//! Home-relative path expansion and lexical normalization

use std::env;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Environment variable consulted first when locating the home directory.
pub const HOME_ENV: &str = "HOME";

/// The user's home directory, resolved once per invocation.
///
/// Every application file must live under this directory: its path relative
/// to home is what places it inside the backup tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HomeDir {
    path: PathBuf,
}

impl HomeDir {
    /// Use `path` as the home directory.
    ///
    /// Relative paths are resolved against the current working directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: normalize(path),
        }
    }

    /// Locate the home directory from the process environment.
    ///
    /// `$HOME` wins when it is set and non-empty; otherwise the platform
    /// default from `dirs` is used.
    pub fn from_env() -> Option<Self> {
        let from_var = env::var_os(HOME_ENV).filter(|value| !value.is_empty());
        from_var
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .map(Self::new)
    }

    /// The absolute home directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Expand a user-supplied path string into a normalized absolute path.
    ///
    /// `~` is the home directory itself and `~/rest` is `rest` under home.
    /// Anything else, including `~user` forms, is normalized as a plain
    /// path, so relative input resolves against the working directory.
    pub fn expand(&self, input: &str) -> PathBuf {
        if input == "~" {
            return self.path.clone();
        }
        if let Some(rest) = input.strip_prefix("~/") {
            return normalize(self.path.join(rest));
        }
        normalize(input)
    }

    /// Whether `path` is home itself or lies below it.
    ///
    /// Compares whole components, so `/home/user2` is not under `/home/user`.
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.path)
    }

    /// The part of `path` below home, or `None` when it lies elsewhere.
    pub fn relative<'a>(&self, path: &'a Path) -> Option<&'a Path> {
        path.strip_prefix(&self.path).ok()
    }
}

/// Lexically normalize a path into absolute form.
///
/// Relative input is joined onto the current working directory, `.`
/// segments are dropped and `..` segments remove their parent. No symlinks
/// are resolved and the filesystem is never consulted, so this cannot fail.
/// If the working directory is unavailable the path stays relative.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    clean(&absolute)
}

fn clean(path: &Path) -> PathBuf {
    let mut root = PathBuf::new();
    let mut parts: Vec<OsString> = Vec::new();
    let mut leading_parents = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => root.push(prefix.as_os_str()),
            Component::RootDir => root.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() && !path.has_root() {
                    leading_parents += 1;
                }
            }
            Component::Normal(part) => parts.push(part.to_os_string()),
        }
    }

    let mut out = root;
    for _ in 0..leading_parents {
        out.push("..");
    }
    for part in parts {
        out.push(part);
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
