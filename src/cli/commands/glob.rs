//! Glob command implementation

use std::path::Path;

use anyhow::Result;

use crate::infra::filesystem;

/// Execute the glob command
pub fn execute(dir: &Path, pattern: &str) -> Result<()> {
    for path in filesystem::glob(dir, pattern)? {
        println!("{}", path.display());
    }
    Ok(())
}
