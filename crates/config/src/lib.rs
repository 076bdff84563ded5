#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for the reloc bundle tools
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (`<bundle>/reloc.toml` or `--config`)
//! - Environment variables
//! - CLI flags (applied by the binaries)

pub mod constants;

/// Alias kept for call sites that read better with a path-oriented name
pub use constants as fixed_paths;

use reloc_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub resources: ResourceConfig,

    #[serde(default)]
    pub relocate: RelocateConfig,

    #[serde(default)]
    pub launch: LaunchConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// Files and directories inside the resources directory, relative to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(default = "default_pixbuf_loaders")]
    pub pixbuf_loaders: PathBuf,
    #[serde(default = "default_im_modules")]
    pub im_modules: PathBuf,
    #[serde(default = "default_data_home")]
    pub data_home: PathBuf,
    #[serde(default = "default_fontconfig")]
    pub fontconfig: PathBuf,
    /// Additional text caches carrying the cache placeholder
    #[serde(default)]
    pub extra_caches: Vec<PathBuf>,
}

/// Relocation driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocateConfig {
    #[serde(default)]
    pub dry_run: bool,
    /// Patch the interpreter field of the launcher binary (flat layout only)
    #[serde(default = "default_patch_interpreter")]
    pub patch_interpreter: bool,
    /// Binary carrying the interpreter placeholder, relative to the bundle root
    pub interpreter_target: Option<PathBuf>,
}

/// Launch driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    #[serde(default = "default_app")]
    pub app: String,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            pixbuf_loaders: default_pixbuf_loaders(),
            im_modules: default_im_modules(),
            data_home: default_data_home(),
            fontconfig: default_fontconfig(),
            extra_caches: Vec::new(),
        }
    }
}

impl Default for RelocateConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            patch_interpreter: true,
            interpreter_target: None,
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self { app: default_app() }
    }
}

// Default value functions for serde
fn default_log_filter() -> String {
    "info".to_string()
}

fn default_pixbuf_loaders() -> PathBuf {
    PathBuf::from("lib/gdk-pixbuf-2.0/2.10.0/loaders.cache")
}

fn default_im_modules() -> PathBuf {
    PathBuf::from("lib/gtk-3.0/3.0.0/immodules.cache")
}

fn default_data_home() -> PathBuf {
    PathBuf::from("share")
}

fn default_fontconfig() -> PathBuf {
    PathBuf::from("etc/fonts")
}

fn default_patch_interpreter() -> bool {
    true
}

fn default_app() -> String {
    constants::DEFAULT_APP.to_string()
}

impl ResourceConfig {
    /// Text caches patched with the cache placeholder, in patch order
    #[must_use]
    pub fn caches(&self) -> Vec<&Path> {
        let mut caches = vec![self.pixbuf_loaders.as_path(), self.im_modules.as_path()];
        caches.extend(self.extra_caches.iter().map(PathBuf::as_path));
        caches
    }
}

impl RelocateConfig {
    /// Launcher binary carrying the interpreter placeholder, relative to the bundle root
    #[must_use]
    pub fn interpreter_target(&self, app: &str) -> PathBuf {
        self.interpreter_target
            .clone()
            .unwrap_or_else(|| Path::new(constants::BIN_DIR).join(app))
    }
}

impl Config {
    /// Default config file location for a bundle
    #[must_use]
    pub fn default_path(bundle_root: &Path) -> PathBuf {
        bundle_root.join(constants::CONFIG_FILE_NAME)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::ReadFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional explicit path, falling back to the
    /// bundle's own `reloc.toml` and then to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or if any file that
    /// is read cannot be parsed.
    pub fn load_or_default(explicit: Option<&Path>, bundle_root: &Path) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let bundled = Self::default_path(bundle_root);
        if bundled.exists() {
            debug!(path = %bundled.display(), "Loading bundle configuration");
            Self::load_from_file(&bundled)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // RELOC_APP
        if let Ok(app) = std::env::var("RELOC_APP") {
            if !is_plain_file_name(&app) {
                return Err(ConfigError::InvalidValue {
                    field: "RELOC_APP".to_string(),
                    value: app,
                }
                .into());
            }
            self.launch.app = app;
        }

        // RELOC_LOG
        if let Ok(filter) = std::env::var("RELOC_LOG") {
            self.general.log_filter = filter;
        }

        // RELOC_DRY_RUN
        if let Ok(dry_run) = std::env::var("RELOC_DRY_RUN") {
            self.relocate.dry_run = match dry_run.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "RELOC_DRY_RUN".to_string(),
                        value: dry_run,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }

    /// Reject values that would escape the bundle or name nothing
    fn validate(&self) -> Result<(), Error> {
        if !is_plain_file_name(&self.launch.app) {
            return Err(ConfigError::InvalidValue {
                field: "launch.app".to_string(),
                value: self.launch.app.clone(),
            }
            .into());
        }

        let relative_fields = [
            ("resources.pixbuf_loaders", &self.resources.pixbuf_loaders),
            ("resources.im_modules", &self.resources.im_modules),
            ("resources.data_home", &self.resources.data_home),
            ("resources.fontconfig", &self.resources.fontconfig),
        ];
        let extras = self
            .resources
            .extra_caches
            .iter()
            .map(|path| ("resources.extra_caches", path));
        let target = self
            .relocate
            .interpreter_target
            .iter()
            .map(|path| ("relocate.interpreter_target", path));

        for (field, path) in relative_fields.into_iter().chain(extras).chain(target) {
            let escapes = path
                .components()
                .any(|component| matches!(component, Component::ParentDir));
            if path.as_os_str().is_empty() || path.is_absolute() || escapes {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: path.display().to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}
