//! Core business logic module
//!
//! This module contains the build configuration state machine, command
//! assembly and the self-rebuild protocol. Filesystem and process access
//! goes through [`crate::infra`].
//!
//! # Submodules
//!
//! - [`toolchain`] - Two-stage compiler/linker configuration
//! - [`command`] - Compile and link command assembly
//! - [`pipeline`] - Compile then link through a shell runner
//! - [`bootstrap`] - Rebuilding a stale builder binary
//! - [`description`] - Build description (cpm.toml) parsing
//! - [`clean`] - Removing a target's artifacts

pub mod bootstrap;
pub mod clean;
pub mod command;
pub mod description;
pub mod pipeline;
pub mod toolchain;
