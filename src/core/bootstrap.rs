//! Self-rebuild bootstrap
//!
//! A build description compiled into a builder binary can notice that its
//! source file is newer than the binary, move the binary aside to
//! `<executable>.old`, rebuild itself onto the original path and hand control
//! to the new binary.
//!
//! A failed rebuild leaves the `.old` backup where it is. Nothing is restored
//! automatically, so a broken description stays visible to the operator.

use std::path::{Path, PathBuf};

use crate::config::defaults::{BACKUP_SUFFIX, DEFAULT_BOOTSTRAP_COMPILER};
use crate::core::pipeline::Pipeline;
use crate::core::toolchain::{CompilerOptions, LinkerOptions, ToolchainConfig};
use crate::error::{BuildError, FilesystemError, ProcessError, Stage};
use crate::infra::filesystem;
use crate::infra::logger::Logger;
use crate::infra::shell::{self, ShellRunner};

/// Whether the builder binary is older than its description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// The binary is at least as new as the description
    UpToDate,
    /// The description was modified after the binary was built
    Stale,
}

/// Compare modification times of the description and the executable
///
/// Stale only when the description is strictly newer. Both files must exist.
pub fn staleness(description: &Path, executable: &Path) -> Result<Staleness, FilesystemError> {
    let description_time = filesystem::modified(description)?;
    let executable_time = filesystem::modified(executable)?;

    if description_time > executable_time {
        Ok(Staleness::Stale)
    } else {
        Ok(Staleness::UpToDate)
    }
}

/// Path the running executable is moved to before a rebuild
pub fn backup_path(executable: &Path) -> PathBuf {
    let mut backup = executable.as_os_str().to_os_string();
    backup.push(BACKUP_SUFFIX);
    PathBuf::from(backup)
}

/// Result of a bootstrap check
#[derive(Debug)]
pub enum BootstrapOutcome {
    /// Nothing to do
    UpToDate,
    /// A fresh binary is in place and should be re-executed
    Rebuilt {
        /// Path of the new binary
        executable: PathBuf,
        /// Where the previous binary was moved
        backup: PathBuf,
    },
    /// The rebuild stopped part way
    Failed {
        /// Step that failed
        stage: Stage,
        /// Why it failed
        error: BuildError,
        /// Backup left behind, if the rename happened
        backup: Option<PathBuf>,
    },
}

impl BootstrapOutcome {
    /// Process exit code for a caller that terminates on this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UpToDate | Self::Rebuilt { .. } => 0,
            Self::Failed { .. } => 1,
        }
    }

    /// Whether a new binary was built
    pub fn is_rebuilt(&self) -> bool {
        matches!(self, Self::Rebuilt { .. })
    }
}

/// Rebuild settings for one builder binary
#[derive(Debug, Clone)]
pub struct Bootstrap {
    description: PathBuf,
    executable: PathBuf,
    compiler: String,
    flags: Option<String>,
}

impl Bootstrap {
    /// Bootstrap for `executable`, built from the single source `description`
    pub fn new(description: impl Into<PathBuf>, executable: impl Into<PathBuf>) -> Self {
        Self {
            description: description.into(),
            executable: executable.into(),
            compiler: DEFAULT_BOOTSTRAP_COMPILER.to_string(),
            flags: None,
        }
    }

    /// Compiler used for the rebuild
    #[must_use]
    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Extra compiler flags used for the rebuild
    #[must_use]
    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    /// Description file path
    pub fn description(&self) -> &Path {
        &self.description
    }

    /// Executable path
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Compare timestamps without acting on the result
    pub fn check(&self) -> Result<Staleness, FilesystemError> {
        staleness(&self.description, &self.executable)
    }

    /// Toolchain config that rebuilds the executable onto its own path
    pub fn rebuild_config(&self) -> Result<ToolchainConfig, BuildError> {
        let name = self
            .executable
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let build_path = self
            .executable
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut options = CompilerOptions::new()
            .compiler(self.compiler.clone())
            .sources(self.description.to_string_lossy())
            .name(name)
            .build_path(build_path);
        options.flags.clone_from(&self.flags);

        let mut cfg = ToolchainConfig::new();
        cfg.configure_compiler(options)?;
        cfg.configure_linker(LinkerOptions::new())?;
        Ok(cfg)
    }

    /// Rebuild the executable when its description is newer
    ///
    /// Only a failure to stat either file is returned as an error; anything
    /// that goes wrong after the check is reported as
    /// [`BootstrapOutcome::Failed`].
    pub fn run<R: ShellRunner, L: Logger>(
        &self,
        pipeline: &Pipeline<R, L>,
    ) -> Result<BootstrapOutcome, FilesystemError> {
        if self.check()? == Staleness::UpToDate {
            return Ok(BootstrapOutcome::UpToDate);
        }

        let logger = pipeline.logger();
        let backup = backup_path(&self.executable);

        logger.warn(&format!(
            "changing {} to {}",
            self.executable.display(),
            backup.display()
        ));
        if let Err(e) = filesystem::rename(&self.executable, &backup) {
            logger.error(&e.to_string());
            return Ok(BootstrapOutcome::Failed {
                stage: Stage::Rename,
                error: e.into(),
                backup: None,
            });
        }

        let cfg = match self.rebuild_config() {
            Ok(cfg) => cfg,
            Err(error) => {
                logger.error(&error.to_string());
                return Ok(BootstrapOutcome::Failed {
                    stage: Stage::Configure,
                    error,
                    backup: Some(backup),
                });
            }
        };

        logger.warn(&format!("rebuilding {}", self.description.display()));
        if let Err(error) = pipeline.build_and_link(&cfg) {
            let stage = error.stage().unwrap_or(Stage::Compile);
            return Ok(BootstrapOutcome::Failed {
                stage,
                error,
                backup: Some(backup),
            });
        }
        cfg.cleanup();

        Ok(BootstrapOutcome::Rebuilt {
            executable: self.executable.clone(),
            backup,
        })
    }
}

/// Run the rebuilt binary with the original arguments and return its exit code
///
/// `args` excludes the program name. A bare file name is resolved against the
/// current directory rather than `PATH`.
pub fn reexec(executable: &Path, args: &[String]) -> Result<i32, ProcessError> {
    if executable.components().count() == 1 {
        shell::run_program(&Path::new(".").join(executable), args)
    } else {
        shell::run_program(executable, args)
    }
}

/// Bootstrap, then hand control to the rebuilt binary
///
/// Returns `None` when the builder is up to date and should carry on, or the
/// exit code the current process should terminate with: the child's status
/// after a rebuild, 1 when the rebuild or the re-exec failed.
pub fn rebuild_and_reexec<R: ShellRunner, L: Logger>(
    bootstrap: &Bootstrap,
    pipeline: &Pipeline<R, L>,
    args: &[String],
) -> Option<i32> {
    let logger = pipeline.logger();
    match bootstrap.run(pipeline) {
        Ok(BootstrapOutcome::UpToDate) => None,
        Ok(BootstrapOutcome::Rebuilt { executable, .. }) => {
            logger.warn(&format!("running new builder {}", executable.display()));
            match reexec(&executable, args) {
                Ok(code) => Some(code),
                Err(e) => {
                    logger.error(&format!("failed to run new builder: {e}"));
                    Some(1)
                }
            }
        }
        Ok(outcome) => {
            logger.error(&format!(
                "failed to rebuild {} from {}",
                bootstrap.executable().display(),
                bootstrap.description().display()
            ));
            Some(outcome.exit_code())
        }
        Err(e) => {
            logger.error(&e.to_string());
            Some(1)
        }
    }
}

/// Rebuild the running builder when its description changed
///
/// `description` is the source file the builder binary is compiled from,
/// relative to the working directory the builder runs in. `compiler`
/// defaults to `cc`. The running executable is taken from `argv[0]`.
///
/// On a rebuild the new binary is run with the same arguments and the
/// process exits with its status; a failed rebuild exits with 1. When
/// nothing changed, execution continues after the macro.
///
/// ```no_run
/// fn main() {
///     cpm::rebuild_self!("build.c");
///     // describe and build the project here
/// }
/// ```
#[macro_export]
macro_rules! rebuild_self {
    ($description:expr) => {
        $crate::rebuild_self!(
            $description,
            $crate::config::defaults::DEFAULT_BOOTSTRAP_COMPILER
        )
    };
    ($description:expr, $compiler:expr) => {
        $crate::rebuild_self!(
            $description,
            $compiler,
            $crate::core::pipeline::Pipeline::host()
        )
    };
    ($description:expr, $compiler:expr, $pipeline:expr) => {{
        let mut args = ::std::env::args();
        let executable = ::std::path::PathBuf::from(args.next().unwrap_or_default());
        let rest: ::std::vec::Vec<::std::string::String> = args.collect();
        let bootstrap = $crate::core::bootstrap::Bootstrap::new($description, executable)
            .with_compiler($compiler);
        if let ::std::option::Option::Some(code) =
            $crate::core::bootstrap::rebuild_and_reexec(&bootstrap, &$pipeline, &rest)
        {
            ::std::process::exit(code);
        }
    }};
}
