//! Filesystem operations
//!
//! Handles the file and directory probes used by the build pipeline and the
//! self-rebuild check.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::Pattern;

use crate::error::FilesystemError;

/// Check whether a path exists
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Check whether a path is an existing directory
pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

/// Create a directory and all parent directories
///
/// Returns `true` when the directory was created and `false` when something
/// already existed at the path.
pub fn create_dir(path: &Path) -> Result<bool, FilesystemError> {
    if path.exists() {
        return Ok(false);
    }
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(true)
}

/// Remove a directory and all its contents
pub fn remove_dir(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Remove a file, returning whether it existed
pub fn remove_file(path: &Path) -> Result<bool, FilesystemError> {
    if !path.is_file() {
        return Ok(false);
    }
    std::fs::remove_file(path).map_err(|e| FilesystemError::RemoveFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(true)
}

/// Last modification time of a file
pub fn modified(path: &Path) -> Result<SystemTime, FilesystemError> {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| FilesystemError::Stat {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
}

/// Absolute path with every symlink and `.`/`..` component resolved
pub fn canonicalize(path: &Path) -> Result<PathBuf, FilesystemError> {
    std::fs::canonicalize(path).map_err(|e| FilesystemError::Stat {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Rename a file, replacing the destination if present
pub fn rename(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    std::fs::rename(from, to).map_err(|e| FilesystemError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    })
}

/// List the entries of `dir` whose file name matches a shell-style pattern
///
/// Results are `dir/name` paths in directory-iteration order, which is not
/// sorted.
pub fn glob(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, FilesystemError> {
    let matcher = Pattern::new(pattern).map_err(|e| FilesystemError::InvalidPattern {
        pattern: pattern.to_string(),
        error: e.to_string(),
    })?;

    let read_dir_err = |e: std::io::Error| FilesystemError::ReadDir {
        path: dir.to_path_buf(),
        error: e.to_string(),
    };

    let mut matches = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let name = entry.file_name();
        if matcher.matches(&name.to_string_lossy()) {
            matches.push(dir.join(name));
        }
    }
    Ok(matches)
}
