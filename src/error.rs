//! Error types for cpm
//!
//! Domain-specific error types using thiserror.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A pipeline stage, used to name what failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Producing the object file
    Compile,
    /// Producing the linked binary
    Link,
    /// Moving the running executable aside before a rebuild
    Rename,
    /// Configuring the toolchain for a rebuild
    Configure,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Compile => write!(f, "compiling"),
            Stage::Link => write!(f, "linking"),
            Stage::Rename => write!(f, "renaming"),
            Stage::Configure => write!(f, "configuring"),
        }
    }
}

/// Toolchain configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field was absent or empty
    #[error("'{field}' must be provided: compiler, sources and name are required")]
    MissingField { field: &'static str },

    /// Linker stage (or a build) entered before the compiler stage
    #[error("compiler is not configured: run configure_compiler first")]
    CompilerNotConfigured,

    /// Link requested before the linker stage
    #[error("linker is not configured: run configure_linker first")]
    LinkerNotConfigured,

    /// A configure stage was run twice on the same record
    #[error("{stage} is already configured")]
    AlreadyConfigured { stage: &'static str },
}

/// External process errors
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The command ran and exited unsuccessfully
    #[error("command failed with {}: {command}", describe_status(.status))]
    Failed {
        command: String,
        status: Option<i32>,
    },

    /// The shell itself could not be started
    #[error("failed to spawn '{command}': {error}")]
    Spawn { command: String, error: String },
}

impl ProcessError {
    /// Exit status of the failed command, if it exited normally
    pub fn exit_status(&self) -> Option<i32> {
        match self {
            Self::Failed { status, .. } => *status,
            Self::Spawn { .. } => None,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to read file metadata
    #[error("Failed to stat '{path}': {error}")]
    Stat { path: PathBuf, error: String },

    /// Failed to rename a file
    #[error("Failed to rename '{from}' to '{to}': {error}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to remove file
    #[error("Failed to remove file '{path}': {error}")]
    RemoveFile { path: PathBuf, error: String },

    /// Failed to list a directory
    #[error("Failed to open directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },

    /// Glob pattern did not parse
    #[error("Invalid pattern '{pattern}': {error}")]
    InvalidPattern { pattern: String, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Build description errors
#[derive(Error, Debug)]
pub enum DescriptionError {
    /// Failed to read the description file
    #[error("Failed to read build description '{path}': {error}")]
    Read { path: String, error: String },

    /// Failed to parse the description file
    #[error("Failed to parse build description '{path}': {error}")]
    Parse { path: String, error: String },

    /// Failed to serialize or write the description file
    #[error("Failed to write build description '{path}': {error}")]
    Write { path: String, error: String },
}

/// Top-level build error type
#[derive(Error, Debug)]
pub enum BuildError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A stage's subprocess failed
    #[error("{stage} failed: {source}")]
    Process {
        stage: Stage,
        #[source]
        source: ProcessError,
    },

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Build description error
    #[error("Description error: {0}")]
    Description(#[from] DescriptionError),

    /// Declared capability without an implementation
    #[error("{operation} is not implemented yet")]
    NotImplemented { operation: &'static str },
}

impl BuildError {
    /// Wrap a process error with the stage it happened in
    pub fn process(stage: Stage, source: ProcessError) -> Self {
        Self::Process { stage, source }
    }

    /// Stage that failed, when the error came from a subprocess
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Process { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
