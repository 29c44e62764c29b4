//! Clone command implementation
//!
//! A failed clone is reported as a warning, not an error: the usual cause is
//! that the repository was already cloned by an earlier run.

use std::path::Path;

use anyhow::Result;

use crate::cli::output::status;
use crate::infra::git;

/// Execute the clone command
pub fn execute(url: &str, dir: Option<&Path>) -> Result<()> {
    match git::clone_repo(url, dir) {
        Ok(path) => println!("{} Cloned {url} into {}", status::SUCCESS, path.display()),
        Err(e) => {
            tracing::warn!("Git failed to clone {url}, maybe the repository already exists: {e}");
        }
    }
    Ok(())
}
