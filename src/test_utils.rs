//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::toolchain::{CompilerOptions, LinkerOptions, ToolchainConfig};

    /// Generate a compiler or linker executable name
    pub fn tool_id() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("cc".to_string()),
            Just("gcc".to_string()),
            Just("clang".to_string()),
            "[a-z][a-z0-9_+-]{0,12}",
        ]
    }

    /// Generate a source path such as `src/main.c`
    pub fn source_path() -> impl Strategy<Value = String> {
        ("([a-z]{1,8}/){0,2}", "[a-z][a-z0-9_]{0,10}")
            .prop_map(|(dir, stem)| format!("{dir}{stem}.c"))
    }

    /// Generate an object/binary name
    pub fn object_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,15}"
    }

    /// Generate an optional directory path
    pub fn dir_path() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z]{1,8}(/[a-z]{1,8}){0,2}/?")
    }

    /// Generate compiler options with every required field present
    pub fn compiler_options() -> impl Strategy<Value = CompilerOptions> {
        (tool_id(), source_path(), object_name(), dir_path(), dir_path()).prop_map(
            |(compiler, sources, name, build_path, include_path)| CompilerOptions {
                compiler: Some(compiler),
                sources: Some(sources),
                include_path,
                build_path,
                name: Some(name),
                flags: None,
            },
        )
    }

    /// Configure both stages, panicking on failure
    pub fn configured(compiler: CompilerOptions, linker: LinkerOptions) -> ToolchainConfig {
        let mut cfg = ToolchainConfig::new();
        cfg.configure_compiler(compiler).unwrap();
        cfg.configure_linker(linker).unwrap();
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    use crate::config::defaults::MIN_PROPTEST_ITERATIONS;
    use crate::core::command::{compile_command, link_command};
    use crate::core::toolchain::{CompilerOptions, LinkerOptions, ToolchainConfig};
    use crate::error::ConfigError;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(MIN_PROPTEST_ITERATIONS))]

        #[test]
        fn test_default_linker_stage_always_succeeds(options in compiler_options()) {
            let mut cfg = ToolchainConfig::new();
            prop_assert!(cfg.configure_compiler(options).is_ok());
            prop_assert!(cfg.configure_linker(LinkerOptions::default()).is_ok());
            prop_assert!(cfg.linker_configured());
        }

        #[test]
        fn test_linker_before_compiler_always_fails(
            linker in proptest::option::of(tool_id()),
            library_path in dir_path(),
            suppress in any::<bool>(),
        ) {
            let mut cfg = ToolchainConfig::new();
            let options = LinkerOptions {
                linker,
                library_path,
                libraries: None,
                flags: None,
                suppress_warning: suppress,
            };
            prop_assert_eq!(cfg.configure_linker(options), Err(ConfigError::CompilerNotConfigured));
            prop_assert!(!cfg.linker_configured());
        }

        #[test]
        fn test_assembly_is_deterministic(options in compiler_options()) {
            let cfg = configured(options, LinkerOptions::default());
            prop_assert_eq!(
                compile_command(&cfg).unwrap().to_string(),
                compile_command(&cfg).unwrap().to_string()
            );
            prop_assert_eq!(
                link_command(&cfg).unwrap().to_string(),
                link_command(&cfg).unwrap().to_string()
            );
        }

        #[test]
        fn test_default_linker_never_adds_include(options in compiler_options()) {
            let cfg = configured(options, LinkerOptions::default());
            let link = link_command(&cfg).unwrap();
            prop_assert!(link.tokens().iter().all(|t| !t.starts_with("-I")));
        }

        #[test]
        fn test_custom_linker_adds_include_once(
            options in compiler_options(),
            linker in tool_id(),
        ) {
            prop_assume!(options.compiler.as_deref() != Some(linker.as_str()));
            let cfg = configured(options, LinkerOptions::new().linker(linker));
            let link = link_command(&cfg).unwrap();
            let include = format!("-I{}", cfg.include_path());
            prop_assert_eq!(link.count(&include), 1);
        }

        #[test]
        fn test_source_path_generator(path in source_path()) {
            prop_assert!(path.ends_with(".c"));
            prop_assert!(!path.starts_with('/'));
        }
    }

    #[test]
    fn test_configured_helper() {
        let cfg = configured(
            CompilerOptions::new().compiler("cc").sources("a.c").name("a"),
            LinkerOptions::default(),
        );
        assert!(cfg.compiler_configured());
        assert!(cfg.linker_configured());
    }
}
