//! Toolchain configuration
//!
//! A [`ToolchainConfig`] starts empty and is filled in two ordered stages:
//! [`ToolchainConfig::configure_compiler`] and then, optionally,
//! [`ToolchainConfig::configure_linker`]. A config that has only been through
//! the compiler stage can still produce an object file; linking needs both.
//!
//! Every path-like field falls back to a concrete default so assembled
//! commands never carry a dangling flag such as a bare `-L`.

use serde::{Deserialize, Serialize};

use crate::config::defaults::{DEFAULT_BUILD_PATH, DEFAULT_INCLUDE_PATH, DEFAULT_LIBRARY_PATH};
use crate::error::ConfigError;

/// Inputs to the compiler stage
///
/// `compiler`, `sources` and `name` are required; an empty string counts as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerOptions {
    /// Compiler executable
    pub compiler: Option<String>,
    /// Source file(s) handed to the compiler
    pub sources: Option<String>,
    /// Include directory
    pub include_path: Option<String>,
    /// Directory receiving the object file and binary
    pub build_path: Option<String>,
    /// Object and output name
    pub name: Option<String>,
    /// Extra compiler flags, space separated
    pub flags: Option<String>,
}

impl CompilerOptions {
    /// Create empty compiler options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compiler executable
    #[must_use]
    pub fn compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = Some(compiler.into());
        self
    }

    /// Set the sources
    #[must_use]
    pub fn sources(mut self, sources: impl Into<String>) -> Self {
        self.sources = Some(sources.into());
        self
    }

    /// Set the include path
    #[must_use]
    pub fn include_path(mut self, path: impl Into<String>) -> Self {
        self.include_path = Some(path.into());
        self
    }

    /// Set the build path
    #[must_use]
    pub fn build_path(mut self, path: impl Into<String>) -> Self {
        self.build_path = Some(path.into());
        self
    }

    /// Set the object and output name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set extra compiler flags
    #[must_use]
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    /// Overlay every field set in `other` on top of `self`
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            compiler: other.compiler.or(self.compiler),
            sources: other.sources.or(self.sources),
            include_path: other.include_path.or(self.include_path),
            build_path: other.build_path.or(self.build_path),
            name: other.name.or(self.name),
            flags: other.flags.or(self.flags),
        }
    }
}

/// Inputs to the linker stage, all optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkerOptions {
    /// Linker executable; defaults to the compiler
    pub linker: Option<String>,
    /// Library search path
    pub library_path: Option<String>,
    /// Additional libraries, e.g. `-lm -lpthread`
    pub libraries: Option<String>,
    /// Extra linker flags, space separated
    pub flags: Option<String>,
    /// Do not warn when a custom linker is used
    #[serde(default)]
    pub suppress_warning: bool,
}

impl LinkerOptions {
    /// Create empty linker options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the linker executable
    #[must_use]
    pub fn linker(mut self, linker: impl Into<String>) -> Self {
        self.linker = Some(linker.into());
        self
    }

    /// Set the library search path
    #[must_use]
    pub fn library_path(mut self, path: impl Into<String>) -> Self {
        self.library_path = Some(path.into());
        self
    }

    /// Set additional libraries
    #[must_use]
    pub fn libraries(mut self, libraries: impl Into<String>) -> Self {
        self.libraries = Some(libraries.into());
        self
    }

    /// Set extra linker flags
    #[must_use]
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    /// Silence the custom linker warning
    #[must_use]
    pub fn suppress_warning(mut self, suppress: bool) -> Self {
        self.suppress_warning = suppress;
        self
    }

    /// Overlay every field set in `other` on top of `self`
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            linker: other.linker.or(self.linker),
            library_path: other.library_path.or(self.library_path),
            libraries: other.libraries.or(self.libraries),
            flags: other.flags.or(self.flags),
            suppress_warning: self.suppress_warning || other.suppress_warning,
        }
    }
}

/// Compiler and linker identity, paths and flags for one target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainConfig {
    compiler: String,
    linker: String,
    compiler_flags: String,
    linker_flags: String,
    sources_path: String,
    include_path: String,
    build_path: String,
    library_path: String,
    additional_libraries: String,
    object_name: String,
    compiler_configured: bool,
    linker_configured: bool,
    suppress_linker_warning: bool,
}

/// Treat `None` and `""` alike
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    non_empty(value).ok_or(ConfigError::MissingField { field })
}

impl ToolchainConfig {
    /// Create an unconfigured record
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiler stage
    ///
    /// Leaves the record untouched on error.
    pub fn configure_compiler(&mut self, options: CompilerOptions) -> Result<(), ConfigError> {
        if self.compiler_configured {
            return Err(ConfigError::AlreadyConfigured { stage: "compiler" });
        }

        let compiler = required(options.compiler, "compiler")?;
        let sources_path = required(options.sources, "sources")?;
        let object_name = required(options.name, "name")?;

        self.compiler = compiler;
        self.sources_path = sources_path;
        self.object_name = object_name;
        self.build_path =
            non_empty(options.build_path).unwrap_or_else(|| DEFAULT_BUILD_PATH.to_string());
        self.include_path =
            non_empty(options.include_path).unwrap_or_else(|| DEFAULT_INCLUDE_PATH.to_string());
        self.compiler_flags = options.flags.unwrap_or_default();
        self.compiler_configured = true;

        tracing::debug!(
            compiler = %self.compiler,
            sources = %self.sources_path,
            name = %self.object_name,
            "compiler configured"
        );
        Ok(())
    }

    /// Linker stage; requires the compiler stage
    pub fn configure_linker(&mut self, options: LinkerOptions) -> Result<(), ConfigError> {
        if !self.compiler_configured {
            return Err(ConfigError::CompilerNotConfigured);
        }
        if self.linker_configured {
            return Err(ConfigError::AlreadyConfigured { stage: "linker" });
        }

        self.linker = non_empty(options.linker).unwrap_or_else(|| self.compiler.clone());
        self.library_path =
            non_empty(options.library_path).unwrap_or_else(|| DEFAULT_LIBRARY_PATH.to_string());
        self.additional_libraries = options.libraries.unwrap_or_default();
        self.linker_flags = options.flags.unwrap_or_default();
        self.suppress_linker_warning = options.suppress_warning;
        self.linker_configured = true;

        tracing::debug!(linker = %self.linker, "linker configured");
        Ok(())
    }

    /// Release the record
    pub fn cleanup(self) {
        tracing::debug!(name = %self.object_name, "toolchain config released");
    }

    /// Whether the compiler stage has completed
    pub fn compiler_configured(&self) -> bool {
        self.compiler_configured
    }

    /// Whether the linker stage has completed
    pub fn linker_configured(&self) -> bool {
        self.linker_configured
    }

    /// Whether linking goes through something other than the compiler
    pub fn uses_custom_linker(&self) -> bool {
        self.linker_configured && self.linker != self.compiler
    }

    /// Whether the custom linker warning is silenced
    pub fn suppress_linker_warning(&self) -> bool {
        self.suppress_linker_warning
    }

    /// Compiler executable
    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    /// Linker executable
    pub fn linker(&self) -> &str {
        &self.linker
    }

    /// Extra compiler flags
    pub fn compiler_flags(&self) -> &str {
        &self.compiler_flags
    }

    /// Extra linker flags
    pub fn linker_flags(&self) -> &str {
        &self.linker_flags
    }

    /// Sources handed to the compiler
    pub fn sources_path(&self) -> &str {
        &self.sources_path
    }

    /// Include directory
    pub fn include_path(&self) -> &str {
        &self.include_path
    }

    /// Build output directory
    pub fn build_path(&self) -> &str {
        &self.build_path
    }

    /// Library search path
    pub fn library_path(&self) -> &str {
        &self.library_path
    }

    /// Additional libraries
    pub fn additional_libraries(&self) -> &str {
        &self.additional_libraries
    }

    /// Object and output name
    pub fn object_name(&self) -> &str {
        &self.object_name
    }
}
