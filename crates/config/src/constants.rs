//! Fixed, non-configurable layout names and limits
//!
//! These values are baked into bundles at build time. Changing them breaks
//! every bundle produced before the change, so they are not exposed via TOML.

/// Directory holding the relocation tool and the launcher in a flat bundle.
pub const BIN_DIR: &str = "bin";

/// Directory holding the real application binary in a flat bundle.
pub const EXE_DIR: &str = "exe";

/// Resources directory name in a flat bundle.
pub const RESOURCES_DIR: &str = "resources";

/// Bundled dynamic loader, relative to the bundle root.
pub const INTERPRETER_PATH: &str = "interp/ld.so";

/// Path length ceiling on platforms without a reported maximum.
pub const FLAT_PATH_MAX: usize = 5000;

/// Optional per-bundle configuration file, looked up in the bundle root.
pub const CONFIG_FILE_NAME: &str = "reloc.toml";

/// Debug log directory, relative to the bundle root.
pub const LOGS_DIR: &str = "logs";

/// Application launched when nothing else is configured.
pub const DEFAULT_APP: &str = "why3";
