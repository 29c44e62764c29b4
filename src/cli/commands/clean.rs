//! CLI implementation for `cpm clean` command

use anyhow::{Context, Result};

use super::TargetArgs;
use crate::cli::output::status;
use crate::core::clean::{clean_artifacts, clean_build_dir};

/// Execute the clean command
pub fn execute(target: &TargetArgs, all: bool) -> Result<()> {
    let cfg = target
        .load()?
        .configure()
        .context("Invalid build configuration")?;

    // The directory goes first so a refused path leaves every file in place
    let removed_dir = if all {
        clean_build_dir(&cfg).context("Failed to remove build directory")?
    } else {
        false
    };
    let result = clean_artifacts(&cfg).context("Failed to clean build artifacts")?;

    if result.removed.is_empty() && !removed_dir {
        println!("{} Nothing to clean", status::SUCCESS);
        return Ok(());
    }

    println!("{} Cleaned build artifacts:", status::SUCCESS);
    for path in &result.removed {
        println!("  Removed {}", path.display());
    }
    if removed_dir {
        println!("  Removed {}/", cfg.build_path().trim_end_matches('/'));
    }

    Ok(())
}
