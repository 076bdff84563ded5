//! Core layout abstractions shared by every platform variant

use crate::implementations::{AppleBundleLayout, FlatLayout};
use crate::path::BoundedPath;
use reloc_config::ResourceConfig;
use reloc_errors::ResolveError;
use std::fmt;
use std::path::{Path, PathBuf};

/// `PROC_PIDPATHINFO_MAXSIZE` (four times `MAXPATHLEN`)
pub const APPLE_PATH_MAX: usize = 4 * 1024;

/// Operating-system family, as far as bundle layout is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFamily {
    /// `.app` bundles: `<root>/Contents/Resources/...`
    Apple,
    /// Everything else: `<root>/bin`, `<root>/resources`, ...
    Flat,
}

impl PlatformFamily {
    /// Family of the host this binary was built for
    #[must_use]
    pub fn current() -> Self {
        if cfg!(target_vendor = "apple") {
            Self::Apple
        } else {
            Self::Flat
        }
    }

    /// Longest path, in bytes, this family's tools accept
    #[must_use]
    pub fn path_limit(self) -> usize {
        match self {
            Self::Apple => APPLE_PATH_MAX,
            Self::Flat => reloc_config::fixed_paths::FLAT_PATH_MAX,
        }
    }

    /// Whether the launcher points fontconfig at the bundled configuration
    #[must_use]
    pub fn uses_bundled_fontconfig(self) -> bool {
        matches!(self, Self::Flat)
    }

    /// Layout the relocation driver resolves with on this family
    #[must_use]
    pub fn relocation_layout(self) -> Box<dyn BundleLayout> {
        match self {
            Self::Apple => Box::new(AppleBundleLayout),
            Self::Flat => Box::new(FlatLayout),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Flat => "flat",
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bundle root and resources directory derived from an executable path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePaths {
    pub bundle_root: BoundedPath,
    pub resources_dir: BoundedPath,
}

/// One environment assignment made by the launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: &'static str,
    pub value: PathBuf,
}

impl EnvVar {
    fn new(name: &'static str, value: BoundedPath) -> Self {
        Self {
            name,
            value: value.into_path_buf(),
        }
    }
}

/// A directory layout that locates a bundle from one of its executables
pub trait BundleLayout {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Family whose path limit and environment conventions apply
    fn family(&self) -> PlatformFamily;

    /// Compute the bundle root and resources directory from an absolute,
    /// symlink-resolved executable path. No existence checks are made.
    ///
    /// # Errors
    ///
    /// Returns `RelativePath`, `NoParent` or `PathTooLong`.
    fn resolve_paths(&self, executable: &Path) -> Result<BundlePaths, ResolveError>;

    /// Whether the bundle carries a launcher binary with an interpreter
    /// placeholder that has to be patched
    fn patches_interpreter(&self) -> bool {
        false
    }

    /// Environment the launcher sets so bundled libraries find their caches
    ///
    /// # Errors
    ///
    /// Returns `PathTooLong` if any derived path does not fit.
    fn environment_layout(
        &self,
        resources_dir: &BoundedPath,
        resources: &ResourceConfig,
    ) -> Result<Vec<EnvVar>, ResolveError> {
        let mut vars = vec![
            EnvVar::new(
                "GDK_PIXBUF_MODULE_FILE",
                resources_dir.join(&resources.pixbuf_loaders)?,
            ),
            EnvVar::new(
                "GTK_IM_MODULE_FILE",
                resources_dir.join(&resources.im_modules)?,
            ),
            EnvVar::new("XDG_DATA_HOME", resources_dir.join(&resources.data_home)?),
        ];

        if self.family().uses_bundled_fontconfig() {
            vars.push(EnvVar::new(
                "FONTCONFIG_PATH",
                resources_dir.join(&resources.fontconfig)?,
            ));
        }

        Ok(vars)
    }
}

/// Wrap an executable path for a layout, rejecting relative input
pub(crate) fn bounded_executable(
    executable: &Path,
    family: PlatformFamily,
) -> Result<BoundedPath, ResolveError> {
    if !executable.is_absolute() {
        return Err(ResolveError::RelativePath {
            path: executable.display().to_string(),
        });
    }
    BoundedPath::new(executable, family.path_limit())
}
