//! Process invocation through the host shell
//!
//! Assembled command lines are handed to `sh -c` (`cmd /C` on Windows) as a
//! single string, so whatever word splitting the shell does applies. Paths
//! containing whitespace or shell metacharacters are not quoted.

use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::core::command::CommandLine;
use crate::error::ProcessError;

/// Something that can run an assembled command line to completion
pub trait ShellRunner {
    /// Run the command, blocking until it exits
    fn run(&self, command: &CommandLine) -> Result<(), ProcessError>;
}

impl<T: ShellRunner + ?Sized> ShellRunner for &T {
    fn run(&self, command: &CommandLine) -> Result<(), ProcessError> {
        (**self).run(command)
    }
}

/// Runs commands through the platform shell, inheriting stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct HostShell;

impl HostShell {
    /// Create a host shell runner
    pub fn new() -> Self {
        Self
    }
}

impl ShellRunner for HostShell {
    fn run(&self, command: &CommandLine) -> Result<(), ProcessError> {
        run_line(&command.to_string())
    }
}

/// Shell program and the flag that makes it read a command string
pub fn shell_program() -> (&'static str, &'static str) {
    if cfg!(windows) {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

/// Run a raw command line through the shell
pub fn run_line(line: &str) -> Result<(), ProcessError> {
    let (shell, flag) = shell_program();
    debug!(shell = %shell, command = %line, "spawning process");

    let status = Command::new(shell)
        .arg(flag)
        .arg(line)
        .status()
        .map_err(|e| ProcessError::Spawn {
            command: line.to_string(),
            error: e.to_string(),
        })?;

    check_status(line, status)
}

/// Run an executable directly with the given arguments and return its exit code
pub fn run_program(program: &Path, args: &[String]) -> Result<i32, ProcessError> {
    let shown = program.display().to_string();
    debug!(program = %shown, args = ?args, "spawning process");

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| ProcessError::Spawn {
            command: shown.clone(),
            error: e.to_string(),
        })?;

    status.code().ok_or(ProcessError::Failed {
        command: shown,
        status: None,
    })
}

fn check_status(line: &str, status: ExitStatus) -> Result<(), ProcessError> {
    if status.success() {
        Ok(())
    } else {
        Err(ProcessError::Failed {
            command: line.to_string(),
            status: status.code(),
        })
    }
}
