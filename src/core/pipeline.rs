//! Build pipeline
//!
//! Drives command assembly and process invocation for the two stages. A
//! stage that fails stops the pipeline; there is no partial success.

use crate::core::command::{compile_command, link_command, CommandLine};
use crate::core::toolchain::ToolchainConfig;
use crate::error::{BuildError, Stage};
use crate::infra::logger::{Logger, TracingLogger};
use crate::infra::shell::{HostShell, ShellRunner};

/// Warning emitted when linking with something other than the compiler
pub const CUSTOM_LINKER_WARNING: &str =
    "using custom linker, you will need to provide all extra arguments from the linker flags";

/// How to silence [`CUSTOM_LINKER_WARNING`]
pub const CUSTOM_LINKER_HINT: &str =
    "suppress this warning with LinkerOptions::suppress_warning or CPM_SUPPRESS_LINKER_WARNING";

/// Compile and link driver
#[derive(Debug, Default)]
pub struct Pipeline<R = HostShell, L = TracingLogger> {
    runner: R,
    logger: L,
}

impl Pipeline {
    /// Pipeline using the host shell and `tracing` output
    pub fn host() -> Self {
        Self::default()
    }
}

impl<R: ShellRunner, L: Logger> Pipeline<R, L> {
    /// Create a pipeline from a runner and a logger
    pub fn new(runner: R, logger: L) -> Self {
        Self { runner, logger }
    }

    /// The logger progress is reported to
    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Compile stage: produce `build_path/name.o`
    pub fn build(&self, cfg: &ToolchainConfig) -> Result<(), BuildError> {
        let line = compile_command(cfg).map_err(|e| {
            self.logger
                .error(&format!("build configuration is incomplete: {e}"));
            e
        })?;
        self.run_stage(Stage::Compile, &line)
    }

    /// Link stage: produce `build_path/name`
    pub fn link(&self, cfg: &ToolchainConfig) -> Result<(), BuildError> {
        let line = link_command(cfg).map_err(|e| {
            self.logger
                .error(&format!("link configuration is incomplete: {e}"));
            e
        })?;

        if cfg.uses_custom_linker() && !cfg.suppress_linker_warning() {
            self.logger.warn(CUSTOM_LINKER_WARNING);
            self.logger.warn(CUSTOM_LINKER_HINT);
        }

        self.run_stage(Stage::Link, &line)
    }

    /// Compile then link; link is never attempted after a failed compile
    pub fn build_and_link(&self, cfg: &ToolchainConfig) -> Result<(), BuildError> {
        self.build(cfg)?;
        self.link(cfg)
    }

    /// Start a compile without waiting for it
    pub fn build_async(&self, _cfg: &ToolchainConfig) -> Result<(), BuildError> {
        self.not_implemented("build_async")
    }

    /// Poll a compile started by [`Pipeline::build_async`]
    pub fn build_async_poll(&self, _cfg: &ToolchainConfig) -> Result<(), BuildError> {
        self.not_implemented("build_async_poll")
    }

    fn run_stage(&self, stage: Stage, line: &CommandLine) -> Result<(), BuildError> {
        self.logger.info(&format!("{stage}: {line}"));
        self.runner.run(line).map_err(|e| {
            self.logger.error(&format!("{stage} failed: {e}"));
            BuildError::process(stage, e)
        })
    }

    fn not_implemented(&self, operation: &'static str) -> Result<(), BuildError> {
        self.logger
            .error(&format!("{operation} is not implemented yet!"));
        Err(BuildError::NotImplemented { operation })
    }
}
