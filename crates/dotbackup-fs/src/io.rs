//! Metadata-preserving file operations

use std::fs::{self, File, FileTimes};
use std::path::Path;

use crate::{Error, Result};

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Copy one regular file, creating the destination's parent directories.
///
/// An existing destination file is overwritten. Permission bits come along
/// with the copy; access and modification times are applied afterwards.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    fs::copy(src, dst).map_err(|e| Error::io(dst, e))?;
    copy_times(src, dst)
}

/// Apply a source directory's permissions and times to its copy.
///
/// Run this after the directory's contents are copied, since writing
/// entries into a directory updates its modification time.
pub fn copy_dir_metadata(src: &Path, dst: &Path) -> Result<()> {
    let metadata = fs::metadata(src).map_err(|e| Error::io(src, e))?;
    // Directory handles cannot be opened for timestamp updates on Windows.
    if cfg!(unix) {
        copy_times(src, dst)?;
    }
    fs::set_permissions(dst, metadata.permissions()).map_err(|e| Error::io(dst, e))
}

fn copy_times(src: &Path, dst: &Path) -> Result<()> {
    let metadata = fs::metadata(src).map_err(|e| Error::io(src, e))?;
    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    // Owners may set timestamps through a read-only handle on unix, which
    // keeps read-only copies working.
    let handle = if cfg!(windows) {
        File::options().write(true).open(dst)
    } else {
        File::open(dst)
    };
    handle
        .and_then(|file| file.set_times(times))
        .map_err(|e| Error::io(dst, e))
}
