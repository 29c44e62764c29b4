//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::{Command, Output};

use cpm::core::command::CommandLine;
use cpm::error::ProcessError;
use cpm::infra::shell::ShellRunner;
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run the cpm binary inside the project
    pub fn cpm(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_cpm"))
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("CPM_SUPPRESS_LINKER_WARNING")
            .args(args)
            .output()
            .expect("Failed to execute cpm")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Description whose compiler is `true`, so builds succeed without a C toolchain
pub const NOOP_DESCRIPTION: &str = r#"
[compiler]
compiler = "true"
sources = "main.c"
build_path = "out"
name = "app"
"#;

/// Description for a real C build
pub const SAMPLE_DESCRIPTION: &str = r#"
[compiler]
compiler = "cc"
sources = "main.c"
build_path = "out"
name = "app"
flags = "-O2"

[linker]
libraries = "-lm"
"#;

/// Runner that records commands instead of running them
///
/// Commands whose program is listed in `failing` report exit status 1.
#[derive(Default)]
pub struct RecordingRunner {
    pub commands: RefCell<Vec<String>>,
    pub failing: Vec<String>,
}

impl RecordingRunner {
    /// Runner that fails every command run through `program`
    pub fn failing_on(program: &str) -> Self {
        Self {
            commands: RefCell::new(Vec::new()),
            failing: vec![program.to_string()],
        }
    }

    /// Recorded command lines
    pub fn lines(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl ShellRunner for RecordingRunner {
    fn run(&self, command: &CommandLine) -> Result<(), ProcessError> {
        self.commands.borrow_mut().push(command.to_string());
        if self.failing.iter().any(|p| p == command.program()) {
            return Err(ProcessError::Failed {
                command: command.to_string(),
                status: Some(1),
            });
        }
        Ok(())
    }
}
