//! Build command implementation
//!
//! Implements `cpm build`: compile a target and, unless `--no-link` is
//! given, link it.

use std::path::Path;

use anyhow::{Context, Result};

use super::TargetArgs;
use crate::cli::output::status;
use crate::core::command::{binary_path, object_path};
use crate::core::pipeline::Pipeline;
use crate::infra::filesystem;

/// Execute the build command
pub fn execute(target: &TargetArgs, no_link: bool) -> Result<()> {
    let description = target.load()?;
    let cfg = description
        .configure()
        .context("Invalid build configuration")?;

    let build_dir = Path::new(cfg.build_path());
    if filesystem::create_dir(build_dir)? {
        tracing::info!("Created build directory {}", build_dir.display());
    }

    let pipeline = Pipeline::host();
    let produced = if no_link {
        pipeline.build(&cfg)?;
        object_path(&cfg)
    } else {
        pipeline.build_and_link(&cfg)?;
        binary_path(&cfg)
    };

    println!("{} Built {produced}", status::SUCCESS);
    cfg.cleanup();
    Ok(())
}
