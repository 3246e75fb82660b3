//! Filesystem utilities for file reading, writing, and working-tree traversal.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The repository metadata directory name, analogous to `.git`.
pub const REPO_DIR: &str = ".kit";

/// Reads the entire contents of a file as bytes.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    fs::read(path.as_ref()).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(path.as_ref().display().to_string())
        } else {
            Error::Io(e)
        }
    })
}

/// Writes data to a file atomically: write to a sibling temp file, then
/// rename over the target so a crash mid-write never leaves a partial file.
pub fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = {
        let mut temp = path.to_path_buf();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "temp".to_string());
        temp.set_file_name(format!(".{file_name}.tmp"));
        temp
    };

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Returns true if any non-leaf component of `relative_path` starts with
/// `.`, or if the path itself names a directory starting with `.`.
///
/// A leaf file name starting with `.` (e.g. `.gitignore`) is not excluded
/// by itself — only a dot-prefixed directory anywhere in the path hides
/// everything beneath it.
pub fn is_dot_path(relative_path: &Path, is_dir: bool) -> bool {
    let components: Vec<_> = relative_path
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    if components.is_empty() {
        return false;
    }

    let checked = if is_dir {
        &components[..]
    } else {
        &components[..components.len() - 1]
    };

    checked.iter().any(|c| c.starts_with('.'))
}

/// Validates that a path does not escape its root directory.
pub fn safe_join<P: AsRef<Path>, Q: AsRef<Path>>(root: P, path: Q) -> Result<PathBuf> {
    let root = root.as_ref();
    let path = path.as_ref();

    for component in path.components() {
        match component {
            std::path::Component::ParentDir => {
                return Err(Error::InvalidInput(format!(
                    "path escapes repository root: {}",
                    path.display()
                )));
            }
            std::path::Component::Normal(s) => {
                if s.to_string_lossy().contains('\0') {
                    return Err(Error::InvalidInput(format!(
                        "path contains a null byte: {}",
                        path.display()
                    )));
                }
            }
            _ => {}
        }
    }

    let joined = root.join(path);

    if joined.exists() {
        let canonical_root = root
            .canonicalize()
            .map_err(|_| Error::NotFound(root.display().to_string()))?;
        let canonical_joined = joined
            .canonicalize()
            .map_err(|_| Error::NotFound(joined.display().to_string()))?;

        if !canonical_joined.starts_with(&canonical_root) {
            return Err(Error::InvalidInput(format!(
                "path escapes repository root: {}",
                path.display()
            )));
        }

        Ok(canonical_joined)
    } else {
        Ok(joined)
    }
}
