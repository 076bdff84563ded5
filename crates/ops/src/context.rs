//! Operations context shared by the relocation and launch drivers

use reloc_config::Config;
use reloc_errors::Error;
use reloc_platform::{current_exe_path, BundleLayout, BundlePaths, PlatformFamily};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything an operation needs: resolved bundle paths, the layout that
/// produced them and the effective configuration
pub struct OpsCtx {
    pub executable: PathBuf,
    pub layout: Box<dyn BundleLayout>,
    pub paths: BundlePaths,
    pub config: Config,
}

impl OpsCtx {
    #[must_use]
    pub fn bundle_root(&self) -> &Path {
        self.paths.bundle_root.as_path()
    }

    #[must_use]
    pub fn resources_dir(&self) -> &Path {
        self.paths.resources_dir.as_path()
    }
}

impl std::fmt::Debug for OpsCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpsCtx")
            .field("executable", &self.executable)
            .field("layout", &self.layout.name())
            .field("paths", &self.paths)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`OpsCtx`]
///
/// Unset parts fall back to the running process: the executable comes from
/// the OS self-path query, the layout from the host's platform family, and
/// the configuration from the bundle's `reloc.toml` plus environment.
#[derive(Default)]
pub struct OpsContextBuilder {
    executable: Option<PathBuf>,
    layout: Option<Box<dyn BundleLayout>>,
    config: Option<Config>,
    config_path: Option<PathBuf>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve from this executable path instead of the running one
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    /// Set the directory layout
    #[must_use]
    pub fn with_layout(mut self, layout: Box<dyn BundleLayout>) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Use this configuration as-is (no file or environment lookup)
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from this file instead of the bundle default
    #[must_use]
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Resolve paths and load configuration
    ///
    /// # Errors
    ///
    /// Returns resolution errors (own path unavailable, bad layout, path too
    /// long) and configuration errors (missing explicit file, bad TOML, bad
    /// environment values).
    pub fn build(self) -> Result<OpsCtx, Error> {
        let layout = self
            .layout
            .unwrap_or_else(|| PlatformFamily::current().relocation_layout());

        let executable = match self.executable {
            Some(path) => path,
            None => current_exe_path()?.into_path_buf(),
        };

        let paths = layout.resolve_paths(&executable)?;
        debug!(
            layout = layout.name(),
            executable = %executable.display(),
            bundle_root = %paths.bundle_root,
            resources_dir = %paths.resources_dir,
            "Resolved bundle paths"
        );

        let config = match self.config {
            Some(config) => config,
            None => {
                let mut config = Config::load_or_default(
                    self.config_path.as_deref(),
                    paths.bundle_root.as_path(),
                )?;
                config.merge_env()?;
                config
            }
        };

        Ok(OpsCtx {
            executable,
            layout,
            paths,
            config,
        })
    }
}
