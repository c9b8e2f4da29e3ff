//! Copying a single file or directory tree from source to destination
//!
//! Directory copies merge into the destination: entries already present
//! there but absent from the source are left alone.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::{Error, IgnoreMatcher, Result, io};

/// What a mirror call did with its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// A regular file was copied.
    File,
    /// A directory tree was merged into the destination.
    Tree {
        /// Regular files copied.
        files: usize,
    },
    /// The source does not exist (or is a dangling symlink); nothing was done.
    Missing,
    /// The source is neither a file nor a directory; nothing was done.
    Unsupported,
}

impl MirrorOutcome {
    /// Whether anything was written to the destination.
    pub fn copied(&self) -> bool {
        matches!(self, Self::File | Self::Tree { .. })
    }
}

/// Mirror `src` onto `dst`.
///
/// A missing source is not an error: a fresh home directory lacks files
/// that only exist in the backup, and the other way round before the first
/// backup. Ignore patterns apply to entries inside a directory tree, never
/// to `src` itself.
pub fn mirror(src: &Path, dst: &Path, ignore: &IgnoreMatcher) -> Result<MirrorOutcome> {
    let metadata = match fs::metadata(src) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound || is_symlink(src) => {
            return Ok(MirrorOutcome::Missing);
        }
        Err(e) => return Err(Error::io(src, e)),
    };

    if metadata.is_file() {
        io::copy_file(src, dst)?;
        Ok(MirrorOutcome::File)
    } else if metadata.is_dir() {
        let files = copy_tree(src, dst, ignore)?;
        Ok(MirrorOutcome::Tree { files })
    } else {
        warn!("not a regular file or directory: {}: skipped", src.display());
        Ok(MirrorOutcome::Unsupported)
    }
}

fn copy_tree(src: &Path, dst: &Path, ignore: &IgnoreMatcher) -> Result<usize> {
    let mut files = 0;
    let mut dirs: Vec<(PathBuf, PathBuf)> = Vec::new();

    let walker = WalkDir::new(src)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !ignore.is_ignored(entry.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(src).to_path_buf();
                if err.loop_ancestor().is_some() {
                    warn!("symlink loop at {}: skipped", path.display());
                    continue;
                }
                if err.io_error().map(|e| e.kind()) == Some(ErrorKind::NotFound) {
                    warn!("dangling entry {}: skipped", path.display());
                    continue;
                }
                return Err(Error::io(path, err.into()));
            }
        };

        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
            dirs.push((entry.path().to_path_buf(), target));
        } else if file_type.is_file() {
            io::copy_file(entry.path(), &target)?;
            files += 1;
        } else {
            warn!("not a regular file or directory: {}: skipped", entry.path().display());
        }
    }

    // Deepest directories first, after all their contents are in place.
    for (source_dir, target_dir) in dirs.iter().rev() {
        io::copy_dir_metadata(source_dir, target_dir)?;
    }

    Ok(files)
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|metadata| metadata.file_type().is_symlink())
        .unwrap_or(false)
}
