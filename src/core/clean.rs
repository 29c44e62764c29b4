//! Clean logic
//!
//! Removes the artifacts the pipeline produces for one target: the object
//! file and the linked binary. The build directory is only removed on
//! request, and never when that would take the working directory with it.

use std::path::{Component, Path, PathBuf};

use crate::core::command::{binary_path, object_path};
use crate::core::toolchain::ToolchainConfig;
use crate::error::{ConfigError, FilesystemError};
use crate::infra::filesystem;

/// Result of clean operation
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Files that were removed
    pub removed: Vec<PathBuf>,
    /// Files that didn't exist (skipped)
    pub skipped: Vec<PathBuf>,
}

/// Artifacts produced for a configured target, object file first
pub fn artifacts(cfg: &ToolchainConfig) -> Result<Vec<PathBuf>, ConfigError> {
    if !cfg.compiler_configured() {
        return Err(ConfigError::CompilerNotConfigured);
    }
    Ok(vec![
        PathBuf::from(object_path(cfg)),
        PathBuf::from(binary_path(cfg)),
    ])
}

/// Remove the object file and binary of a target
pub fn clean_artifacts(cfg: &ToolchainConfig) -> Result<CleanResult, CleanError> {
    let mut result = CleanResult::default();

    for path in artifacts(cfg)? {
        if filesystem::remove_file(&path)? {
            result.removed.push(path);
        } else {
            result.skipped.push(path);
        }
    }

    Ok(result)
}

/// Remove the build directory of a target
///
/// Returns whether a directory was deleted. A build path of `.` is left
/// alone. A build path that climbs with `..`, or that resolves to the current
/// directory or one of its ancestors, is refused.
pub fn clean_build_dir(cfg: &ToolchainConfig) -> Result<bool, CleanError> {
    if !cfg.compiler_configured() {
        return Err(CleanError::Config(ConfigError::CompilerNotConfigured));
    }

    let dir = Path::new(cfg.build_path());
    if is_current_dir(dir) {
        return Ok(false);
    }
    if dir.components().any(|c| c == Component::ParentDir) {
        return Err(CleanError::Protected {
            path: dir.to_path_buf(),
        });
    }
    if !filesystem::is_dir(dir) {
        return Ok(false);
    }

    let resolved = filesystem::canonicalize(dir)?;
    let cwd = filesystem::canonicalize(Path::new("."))?;
    if encloses(&resolved, &cwd) {
        return Err(CleanError::Protected {
            path: dir.to_path_buf(),
        });
    }

    filesystem::remove_dir(&resolved)?;
    Ok(true)
}

fn is_current_dir(dir: &Path) -> bool {
    dir.components().all(|c| c == Component::CurDir)
}

/// Whether removing `dir` would also remove `cwd`
fn encloses(dir: &Path, cwd: &Path) -> bool {
    cwd.starts_with(dir)
}

/// Errors from [`clean_artifacts`] and [`clean_build_dir`]
#[derive(thiserror::Error, Debug)]
pub enum CleanError {
    /// Target is not configured
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Removal failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Build directory contains the working directory or escapes with `..`
    #[error("Refusing to remove build directory '{path}': it contains the working directory or uses '..'")]
    Protected { path: PathBuf },
}
