//! Print command implementation
//!
//! Shows the command lines `cpm build` would run.

use anyhow::{Context, Result};
use serde::Serialize;

use super::TargetArgs;
use crate::core::command::{compile_command, link_command, CommandLine};

/// Both assembled commands of a target
#[derive(Debug, Serialize)]
pub struct AssembledCommands {
    /// Compile stage
    pub compile: CommandLine,
    /// Link stage
    pub link: CommandLine,
}

/// Execute the print command
pub fn execute(target: &TargetArgs, json: bool) -> Result<()> {
    let cfg = target
        .load()?
        .configure()
        .context("Invalid build configuration")?;

    let commands = AssembledCommands {
        compile: compile_command(&cfg)?,
        link: link_command(&cfg)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&commands)?);
    } else {
        println!("{}", commands.compile);
        println!("{}", commands.link);
    }
    Ok(())
}
