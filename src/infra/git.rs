//! Git operations
//!
//! One-shot cloning of a repository into a directory using the gix crate.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::BuildError;

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Failed to clone repository
    #[error("Failed to clone '{url}': {error}")]
    CloneFailed { url: String, error: String },

    /// Destination already holds files
    #[error("Destination '{path}' already exists and is not empty")]
    DestinationNotEmpty { path: PathBuf },
}

/// Clone `url` into `target`, or into the current directory when `None`
///
/// Returns the path of the checked-out working tree.
pub fn clone_repo(url: &str, target: Option<&Path>) -> Result<PathBuf, GitError> {
    let dest = target.map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    if is_non_empty_dir(&dest) {
        return Err(GitError::DestinationNotEmpty { path: dest });
    }

    tracing::debug!("Cloning {url} into {}", dest.display());

    let clone_err = |e: &dyn std::fmt::Display| GitError::CloneFailed {
        url: url.to_string(),
        error: e.to_string(),
    };

    let mut prepare = gix::prepare_clone(url, &dest).map_err(|e| clone_err(&e))?;

    let (mut checkout, _outcome) = prepare
        .fetch_then_checkout(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
        .map_err(|e| clone_err(&e))?;

    let (_repo, _outcome) = checkout
        .main_worktree(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
        .map_err(|e| clone_err(&e))?;

    Ok(dest)
}

/// Clone only one folder of a repository
pub fn clone_folder(_url: &str, _folder: &str, _clone_root: bool) -> Result<PathBuf, BuildError> {
    Err(BuildError::NotImplemented {
        operation: "clone_folder",
    })
}

fn is_non_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
