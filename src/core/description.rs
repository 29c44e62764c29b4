//! Build description files
//!
//! A build description is a small TOML file (`cpm.toml` by default) holding
//! the compiler and linker options of one target:
//!
//! ```toml
//! suppress_linker_warning = false
//!
//! [compiler]
//! compiler = "cc"
//! sources = "src/main.c"
//! build_path = "build"
//! name = "app"
//!
//! [linker]
//! libraries = "-lm"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::toolchain::{CompilerOptions, LinkerOptions, ToolchainConfig};
use crate::error::{ConfigError, DescriptionError};
use crate::infra::filesystem;

/// Compiler and linker options for one target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildDescription {
    /// Silence the custom linker warning
    #[serde(default)]
    pub suppress_linker_warning: bool,

    /// Compiler stage options
    #[serde(default)]
    pub compiler: CompilerOptions,

    /// Linker stage options
    #[serde(default)]
    pub linker: LinkerOptions,
}

impl BuildDescription {
    /// Load a description from a specific path
    ///
    /// A missing file yields an empty description, so every field can still
    /// come from overrides. A file that exists but does not parse is an error.
    pub fn load_from_path(path: &Path) -> Result<Self, DescriptionError> {
        if !filesystem::exists(path) {
            tracing::debug!("No build description at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| DescriptionError::Read {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            DescriptionError::Parse { error, .. } => DescriptionError::Parse {
                path: path.display().to_string(),
                error,
            },
            other => other,
        })
    }

    /// Parse a description from TOML text
    pub fn from_toml(content: &str) -> Result<Self, DescriptionError> {
        toml::from_str(content).map_err(|e| DescriptionError::Parse {
            path: "<inline>".to_string(),
            error: e.to_string(),
        })
    }

    /// Write the description to a specific path
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to_path(&self, path: &Path) -> Result<(), DescriptionError> {
        let write_err = |e: &dyn std::fmt::Display| DescriptionError::Write {
            path: path.display().to_string(),
            error: e.to_string(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_err(&e))?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| write_err(&e))?;
        fs::write(path, content).map_err(|e| write_err(&e))
    }

    /// Overlay every field set in `overrides`
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            suppress_linker_warning: self.suppress_linker_warning
                || overrides.suppress_linker_warning,
            compiler: self.compiler.merge(overrides.compiler),
            linker: self.linker.merge(overrides.linker),
        }
    }

    /// Run both configure stages on a fresh record
    pub fn configure(&self) -> Result<ToolchainConfig, ConfigError> {
        let mut cfg = ToolchainConfig::new();
        cfg.configure_compiler(self.compiler.clone())?;

        let linker = self.linker.clone();
        let suppress = linker.suppress_warning || self.suppress_linker_warning;
        cfg.configure_linker(linker.suppress_warning(suppress))?;
        Ok(cfg)
    }
}
