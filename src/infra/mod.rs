//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem, external processes, repository
//! cloning and log output. This module is the only place where side effects
//! occur.

pub mod filesystem;
pub mod git;
pub mod logger;
pub mod shell;
