//! Removing a stale destination before it is copied over

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use crate::{Error, Result};

/// Delete whatever exists at `path`: a file, a symlink, or a whole tree.
///
/// Returns `false` without touching anything when nothing is there.
/// Symlinks are removed themselves and never followed.
pub fn erase(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(Error::io(path, e)),
    };

    info!("found old {}, deleting...", path.display());
    if metadata.is_dir() {
        fs::remove_dir_all(path).map_err(|e| Error::io(path, e))?;
    } else {
        fs::remove_file(path).map_err(|e| Error::io(path, e))?;
    }
    Ok(true)
}
