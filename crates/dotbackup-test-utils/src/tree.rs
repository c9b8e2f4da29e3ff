//! Directory snapshots for comparing the two sides of a copy.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

/// Relative path and bytes of every regular file below `root`, sorted by path.
///
/// Returns an empty snapshot when `root` does not exist. A single file root
/// yields one entry with an empty relative path.
///
/// # Panics
/// Panics if an existing entry cannot be read.
pub fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
    if !root.exists() {
        return Vec::new();
    }

    let mut out: Vec<(String, Vec<u8>)> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.unwrap_or_else(|e| panic!("snapshot: failed to walk {}: {e}", root.display()))
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .replace('\\', "/");
            (relative, read_bytes(entry.path()))
        })
        .collect();
    out.sort();
    out
}

/// Relative paths of every regular file below `root`, sorted.
pub fn file_list(root: &Path) -> Vec<String> {
    snapshot(root).into_iter().map(|(path, _)| path).collect()
}

fn read_bytes(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| panic!("snapshot: failed to read {}: {e}", path.display()))
}
