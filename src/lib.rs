//! cpm - Embeddable build orchestration
//!
//! A program describes how to compile and link a target by filling in a
//! [`core::toolchain::ToolchainConfig`], then runs the compile and link
//! stages through [`core::pipeline::Pipeline`], which shells out to an
//! external toolchain. A builder binary can also rebuild itself when its own
//! source is newer than the binary ([`core::bootstrap`]).
//!
//! ```no_run
//! use cpm::core::pipeline::Pipeline;
//! use cpm::core::toolchain::{CompilerOptions, LinkerOptions, ToolchainConfig};
//!
//! # fn main() -> Result<(), cpm::error::BuildError> {
//! let mut cfg = ToolchainConfig::new();
//! cfg.configure_compiler(CompilerOptions::new().compiler("cc").sources("main.c").name("app"))?;
//! cfg.configure_linker(LinkerOptions::new())?;
//! Pipeline::host().build_and_link(&cfg)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Configuration, command assembly, pipeline and bootstrap
//! - [`infra`] - Infrastructure layer (filesystem, processes, git, logging)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
