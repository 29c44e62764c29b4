//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clean;
pub mod clone;
pub mod glob;
pub mod print;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::config::defaults::{DESCRIPTION_FILE, SUPPRESS_LINKER_WARNING_ENV};
use crate::core::description::BuildDescription;
use crate::core::toolchain::{CompilerOptions, LinkerOptions};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile and link a target
    Build {
        #[command(flatten)]
        target: TargetArgs,

        /// Only produce the object file
        #[arg(long)]
        no_link: bool,
    },

    /// Print the compile and link commands without running them
    Print {
        #[command(flatten)]
        target: TargetArgs,

        /// Output as JSON token lists
        #[arg(long)]
        json: bool,
    },

    /// Remove a target's object file and binary
    Clean {
        #[command(flatten)]
        target: TargetArgs,

        /// Also remove the build directory
        #[arg(long)]
        all: bool,
    },

    /// List entries of a directory matching a shell pattern
    Glob {
        /// Directory to search
        dir: PathBuf,

        /// Pattern matched against entry names, e.g. '*.c'
        pattern: String,
    },

    /// Clone a git repository
    Clone {
        /// Repository URL
        url: String,

        /// Destination directory (defaults to the current directory)
        dir: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        match self {
            Self::Build { target, no_link } => build::execute(&target, no_link),
            Self::Print { target, json } => print::execute(&target, json),
            Self::Clean { target, all } => clean::execute(&target, all),
            Self::Glob { dir, pattern } => glob::execute(&dir, &pattern),
            Self::Clone { url, dir } => clone::execute(&url, dir.as_deref()),
        }
    }
}

/// Where a target is described, plus per-field overrides
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Build description file
    #[arg(short, long, default_value = DESCRIPTION_FILE)]
    pub file: PathBuf,

    /// Compiler executable
    #[arg(long)]
    pub compiler: Option<String>,

    /// Source file(s)
    #[arg(long)]
    pub sources: Option<String>,

    /// Include directory
    #[arg(long)]
    pub include: Option<String>,

    /// Output directory for the object file and binary
    #[arg(long)]
    pub build_dir: Option<String>,

    /// Object and binary name
    #[arg(long)]
    pub name: Option<String>,

    /// Extra compiler flags
    #[arg(long, allow_hyphen_values = true)]
    pub cflags: Option<String>,

    /// Linker executable (defaults to the compiler)
    #[arg(long)]
    pub linker: Option<String>,

    /// Library search path
    #[arg(long)]
    pub lib_path: Option<String>,

    /// Additional libraries, e.g. '-lm'
    #[arg(long, allow_hyphen_values = true)]
    pub libs: Option<String>,

    /// Extra linker flags
    #[arg(long, allow_hyphen_values = true)]
    pub ldflags: Option<String>,

    /// Do not warn when linking with a custom linker
    #[arg(long, env = SUPPRESS_LINKER_WARNING_ENV)]
    pub suppress_linker_warning: bool,
}

impl TargetArgs {
    /// Overrides given on the command line
    pub fn overrides(&self) -> BuildDescription {
        BuildDescription {
            suppress_linker_warning: self.suppress_linker_warning,
            compiler: CompilerOptions {
                compiler: self.compiler.clone(),
                sources: self.sources.clone(),
                include_path: self.include.clone(),
                build_path: self.build_dir.clone(),
                name: self.name.clone(),
                flags: self.cflags.clone(),
            },
            linker: LinkerOptions {
                linker: self.linker.clone(),
                library_path: self.lib_path.clone(),
                libraries: self.libs.clone(),
                flags: self.ldflags.clone(),
                suppress_warning: false,
            },
        }
    }

    /// Description file merged with command-line overrides
    pub fn load(&self) -> Result<BuildDescription> {
        let description = BuildDescription::load_from_path(&self.file)
            .with_context(|| format!("Failed to load {}", self.file.display()))?;
        Ok(description.merge(self.overrides()))
    }
}
