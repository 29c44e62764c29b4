//! Command assembly
//!
//! Turns a configured [`ToolchainConfig`] into the compile and link command
//! lines. Assembly is pure: the same config always yields the same tokens.
//!
//! Tokens are joined with single spaces and handed to the shell unquoted, so
//! a path containing whitespace is split by the shell.

use std::fmt;

use serde::Serialize;

use crate::config::defaults::OBJECT_EXTENSION;
use crate::core::toolchain::ToolchainConfig;
use crate::error::ConfigError;

/// Ordered tokens of one shell command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Start a command line with its program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![program.into()],
        }
    }

    /// Append a token; empty tokens are dropped
    pub fn push(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !token.is_empty() {
            self.tokens.push(token);
        }
    }

    /// Program being invoked
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// All tokens, program first
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of tokens equal to `token`
    pub fn count(&self, token: &str) -> usize {
        self.tokens.iter().filter(|t| *t == token).count()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// Join a build directory and a file name with exactly one separator
pub fn join_build_path(build_path: &str, name: &str) -> String {
    if build_path.ends_with('/') {
        format!("{build_path}{name}")
    } else {
        format!("{build_path}/{name}")
    }
}

/// Path of the object file produced by the compile stage
pub fn object_path(cfg: &ToolchainConfig) -> String {
    format!(
        "{}.{OBJECT_EXTENSION}",
        join_build_path(cfg.build_path(), cfg.object_name())
    )
}

/// Path of the binary produced by the link stage
pub fn binary_path(cfg: &ToolchainConfig) -> String {
    join_build_path(cfg.build_path(), cfg.object_name())
}

/// `compiler -c [flags] sources -o build/name.o`
pub fn compile_command(cfg: &ToolchainConfig) -> Result<CommandLine, ConfigError> {
    if !cfg.compiler_configured() {
        return Err(ConfigError::CompilerNotConfigured);
    }

    let mut line = CommandLine::new(cfg.compiler());
    line.push("-c");
    line.push(cfg.compiler_flags());
    line.push(cfg.sources_path());
    line.push("-o");
    line.push(object_path(cfg));
    Ok(line)
}

/// `linker build/name.o -o build/name -Llib [libs] [-Iinclude] [flags]`
///
/// The include path is only passed when linking with something other than
/// the compiler, which would otherwise supply it implicitly.
pub fn link_command(cfg: &ToolchainConfig) -> Result<CommandLine, ConfigError> {
    if !cfg.compiler_configured() {
        return Err(ConfigError::CompilerNotConfigured);
    }
    if !cfg.linker_configured() {
        return Err(ConfigError::LinkerNotConfigured);
    }

    let mut line = CommandLine::new(cfg.linker());
    line.push(object_path(cfg));
    line.push("-o");
    line.push(binary_path(cfg));
    line.push(format!("-L{}", cfg.library_path()));
    line.push(cfg.additional_libraries());
    if cfg.uses_custom_linker() {
        line.push(format!("-I{}", cfg.include_path()));
    }
    line.push(cfg.linker_flags());
    Ok(line)
}
