//! Integration tests for the self-rebuild bootstrap
//!
//! A builder whose description is not newer than its binary must not touch
//! anything. A stale builder is renamed to `<path>.old` exactly once, before
//! any compile or link command runs.

mod common;

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use common::TestProject;
use cpm::core::bootstrap::{
    backup_path, rebuild_and_reexec, Bootstrap, BootstrapOutcome, Staleness,
};
use cpm::core::command::CommandLine;
use cpm::core::pipeline::Pipeline;
use cpm::error::{ProcessError, Stage};
use cpm::infra::logger::{LogLevel, MemoryLogger};
use cpm::infra::shell::ShellRunner;
use filetime::{set_file_mtime, FileTime};
use proptest::prelude::*;

/// Records, for every command, whether the executable and its backup existed
struct FileObserver {
    executable: PathBuf,
    backup: PathBuf,
    seen: RefCell<Vec<(String, bool, bool)>>,
}

impl FileObserver {
    fn new(executable: &Path) -> Self {
        Self {
            executable: executable.to_path_buf(),
            backup: backup_path(executable),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl ShellRunner for FileObserver {
    fn run(&self, command: &CommandLine) -> Result<(), ProcessError> {
        self.seen.borrow_mut().push((
            command.to_string(),
            self.executable.exists(),
            self.backup.exists(),
        ));
        Ok(())
    }
}

/// Create `build.c` and `build` with the given modification times
fn builder(project: &TestProject, description_time: i64, executable_time: i64) -> (PathBuf, PathBuf) {
    project.create_file("build.c", "int main(void) { return 0; }\n");
    project.create_file("build", "old binary");
    let description = project.path().join("build.c");
    let executable = project.path().join("build");
    set_file_mtime(&description, FileTime::from_unix_time(description_time, 0)).unwrap();
    set_file_mtime(&executable, FileTime::from_unix_time(executable_time, 0)).unwrap();
    (description, executable)
}

#[test]
fn test_equal_times_are_up_to_date() {
    let project = TestProject::new();
    let (description, executable) = builder(&project, 1_500_000, 1_500_000);

    let bootstrap = Bootstrap::new(&description, &executable);
    assert_eq!(bootstrap.check().unwrap(), Staleness::UpToDate);
}

#[test]
fn test_rebuild_commands_target_executable() {
    let project = TestProject::new();
    let (description, executable) = builder(&project, 2_000_000, 1_000_000);
    let observer = FileObserver::new(&executable);
    let logger = MemoryLogger::new();

    let outcome = Bootstrap::new(&description, &executable)
        .with_flags("-O2")
        .run(&Pipeline::new(&observer, &logger))
        .unwrap();

    assert!(outcome.is_rebuilt());
    let dir = project.path().display().to_string();
    let seen = observer.seen.borrow();
    assert_eq!(
        seen[0].0,
        format!("cc -c -O2 {dir}/build.c -o {dir}/build.o")
    );
    assert_eq!(seen[1].0, format!("cc {dir}/build.o -o {dir}/build -L./"));
    assert!(logger
        .messages(LogLevel::Warning)
        .iter()
        .any(|m| m.starts_with("rebuilding")));
}

#[test]
fn test_missing_executable_is_error() {
    let project = TestProject::new();
    project.create_file("build.c", "");
    let result = Bootstrap::new(project.path().join("build.c"), project.path().join("build"))
        .run(&Pipeline::new(&FileObserver::new(Path::new("unused")), MemoryLogger::new()));

    assert!(result.is_err());
}

#[cfg(unix)]
#[test]
fn test_failed_rebuild_reports_stage_and_keeps_backup() {
    let project = TestProject::new();
    let (description, executable) = builder(&project, 2_000_000, 1_000_000);
    let logger = MemoryLogger::new();

    let outcome = Bootstrap::new(&description, &executable)
        .with_compiler("false")
        .run(&Pipeline::new(cpm::infra::shell::HostShell::new(), &logger))
        .unwrap();

    match &outcome {
        BootstrapOutcome::Failed { stage, backup, .. } => {
            assert_eq!(*stage, Stage::Compile);
            assert_eq!(backup.as_deref(), Some(backup_path(&executable).as_path()));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(outcome.exit_code(), 1);
    assert!(project.file_exists("build.old"));
    assert!(!project.file_exists("build"));
}

/// Compiler stand-in: `-c src -o obj` copies the source, and linking
/// installs `child.sh` as the new binary
#[cfg(unix)]
fn fake_compiler(project: &TestProject) -> String {
    let dir = project.path().display().to_string();
    project.create_file(
        "fakecc.sh",
        &format!(
            "if [ \"$1\" = \"-c\" ]; then cp \"$2\" \"$4\"; \
             else cp '{dir}/child.sh' \"$3\" && chmod +x \"$3\"; fi\n"
        ),
    );
    project.create_file(
        "child.sh",
        &format!("#!/bin/sh\necho \"$@\" > '{dir}/child-args.txt'\nexit 42\n"),
    );
    format!("sh {dir}/fakecc.sh")
}

#[cfg(unix)]
#[test]
fn test_stale_builder_is_rebuilt_and_rerun() {
    let project = TestProject::new();
    let (description, executable) = builder(&project, 2_000_000, 1_000_000);
    let compiler = fake_compiler(&project);
    let logger = MemoryLogger::new();

    let code = rebuild_and_reexec(
        &Bootstrap::new(&description, &executable).with_compiler(compiler),
        &Pipeline::new(cpm::infra::shell::HostShell::new(), &logger),
        &["--target".to_string(), "app".to_string()],
    );

    assert_eq!(code, Some(42));
    assert_eq!(project.read_file("build.old"), "old binary");
    assert!(project.read_file("build").contains("exit 42"));
    assert_eq!(project.read_file("child-args.txt"), "--target app\n");
}

#[cfg(unix)]
#[test]
fn test_rebuild_without_new_binary_exits_one() {
    let project = TestProject::new();
    let (description, executable) = builder(&project, 2_000_000, 1_000_000);
    let logger = MemoryLogger::new();

    let code = rebuild_and_reexec(
        &Bootstrap::new(&description, &executable).with_compiler("true"),
        &Pipeline::new(cpm::infra::shell::HostShell::new(), &logger),
        &[],
    );

    // `true` succeeds for both stages without writing anything, so the
    // re-exec of the missing binary is what fails
    assert_eq!(code, Some(1));
    assert!(project.file_exists("build.old"));
    assert!(!project.file_exists("build"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_bootstrap_acts_only_when_stale(
        description_time in 1_000_000i64..1_000_100,
        executable_time in 1_000_000i64..1_000_100,
    ) {
        let project = TestProject::new();
        let (description, executable) = builder(&project, description_time, executable_time);
        let observer = FileObserver::new(&executable);
        let logger = MemoryLogger::new();

        let outcome = Bootstrap::new(&description, &executable)
            .run(&Pipeline::new(&observer, &logger))
            .unwrap();
        let seen = observer.seen.borrow();

        if description_time <= executable_time {
            prop_assert!(matches!(outcome, BootstrapOutcome::UpToDate));
            prop_assert!(seen.is_empty());
            prop_assert!(project.file_exists("build"));
            prop_assert!(!project.file_exists("build.old"));
            prop_assert!(logger.entries().is_empty());
        } else {
            prop_assert!(outcome.is_rebuilt());
            prop_assert_eq!(seen.len(), 2);
            // Renamed before the first command, and only once
            for (_, executable_present, backup_present) in seen.iter() {
                prop_assert!(!executable_present);
                prop_assert!(backup_present);
            }
            prop_assert_eq!(
                logger
                    .messages(LogLevel::Warning)
                    .iter()
                    .filter(|m| m.starts_with("changing"))
                    .count(),
                1
            );
        }
    }
}
