//! [`TestHome`] builder for dotbackup test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use dotbackup_fs::HomeDir;
use tempfile::TempDir;

/// Where a test home keeps its configuration, relative to home.
pub const CONFIG_FILE: &str = ".config/dotbackup/dotbackup.yml";

/// Where hook scripts in test configs append their output, relative to home.
pub const HOOK_LOG: &str = "hooks.log";

/// A temporary home directory with helper methods for test setup and
/// assertion.
///
/// Paths given to the helpers are relative to the home directory; a leading
/// `~/` is accepted and stripped.
///
/// # Example
///
/// ```rust,no_run
/// use dotbackup_test_utils::home::TestHome;
///
/// let home = TestHome::with_backup_dir();
/// home.write("~/.config/app_a/x.txt", "hello");
/// home.write_config("backup_dir: ~/backup\napps:\n  app_a:\n    files: [~/.config/app_a]\n");
/// home.assert_file_contains("~/.config/app_a/x.txt", "hello");
/// ```
pub struct TestHome {
    _temp_dir: TempDir,
    home: PathBuf,
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHome {
    /// Create an empty home directory.
    ///
    /// Home sits one level below the temporary root so tests can also place
    /// files outside of it.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("home");
        fs::create_dir(&home).unwrap();
        Self {
            _temp_dir: temp_dir,
            home,
        }
    }

    /// Create a home directory that already contains `~/backup`.
    pub fn with_backup_dir() -> Self {
        let home = Self::new();
        home.mkdir("backup");
        home
    }

    /// Return the home directory path.
    pub fn path(&self) -> &Path {
        &self.home
    }

    /// Return the home directory as the engine sees it.
    pub fn home_dir(&self) -> HomeDir {
        HomeDir::new(&self.home)
    }

    /// Return the backup directory `~/backup`.
    pub fn backup_dir(&self) -> PathBuf {
        self.home.join("backup")
    }

    /// A directory next to home, outside of it.
    pub fn outside(&self) -> PathBuf {
        self.home.with_file_name("outside")
    }

    /// Resolve a home-relative path.
    pub fn join(&self, path: &str) -> PathBuf {
        let relative = path.strip_prefix("~/").unwrap_or(path);
        if relative == "~" {
            return self.home.clone();
        }
        self.home.join(relative)
    }

    /// Write `content` to a home-relative file, creating parent directories.
    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("TestHome::write: {}: {e}", full_path.display()));
    }

    /// Read a home-relative file.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("TestHome::read: {}: {e}", full_path.display()))
    }

    /// Create a home-relative directory and its parents.
    pub fn mkdir(&self, path: &str) {
        fs::create_dir_all(self.join(path)).unwrap();
    }

    /// Remove a home-relative file or directory tree if present.
    pub fn remove(&self, path: &str) {
        let full_path = self.join(path);
        if full_path.is_dir() {
            fs::remove_dir_all(&full_path).unwrap();
        } else if full_path.exists() {
            fs::remove_file(&full_path).unwrap();
        }
    }

    /// Write the configuration file at [`CONFIG_FILE`] and return its path.
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        self.write(CONFIG_FILE, yaml);
        self.join(CONFIG_FILE)
    }

    /// Shell snippet appending `message` to the hook log.
    ///
    /// Use inside hook lists of test configs; combine with
    /// [`TestHome::hook_log`] to assert ordering.
    pub fn hook_echo(&self, message: &str) -> String {
        format!("echo {} >> '{}'", message, self.join(HOOK_LOG).display())
    }

    /// Lines appended to the hook log so far.
    pub fn hook_log(&self) -> Vec<String> {
        let path = self.join(HOOK_LOG);
        if !path.exists() {
            return Vec::new();
        }
        self.read(HOOK_LOG).lines().map(str::to_string).collect()
    }

    /// Assert that `path` (relative to home) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to home) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to home) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            self.join(path).display(),
            content,
            file_content
        );
    }
}
