//! Default configuration values

/// Build path used when none is given
pub const DEFAULT_BUILD_PATH: &str = ".";

/// Include path used when none is given
pub const DEFAULT_INCLUDE_PATH: &str = "./";

/// Library search path used when none is given
pub const DEFAULT_LIBRARY_PATH: &str = "./";

/// Compiler used to rebuild a stale build description
pub const DEFAULT_BOOTSTRAP_COMPILER: &str = "cc";

/// Suffix appended to the running executable before it is rebuilt
pub const BACKUP_SUFFIX: &str = ".old";

/// Extension of compiled object files
pub const OBJECT_EXTENSION: &str = "o";

/// Build description file looked up by the CLI
pub const DESCRIPTION_FILE: &str = "cpm.toml";

/// Environment variable that silences the custom linker warning
pub const SUPPRESS_LINKER_WARNING_ENV: &str = "CPM_SUPPRESS_LINKER_WARNING";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
