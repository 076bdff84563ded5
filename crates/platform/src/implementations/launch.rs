//! Layout used by the launcher on every platform

use crate::core::{bounded_executable, BundleLayout, BundlePaths, PlatformFamily};
use crate::path::BoundedPath;
use reloc_config::fixed_paths;
use reloc_errors::ResolveError;
use std::path::Path;

/// The launcher lives at `<root>/bin/<exe>` and starts `<root>/exe/<app>`.
///
/// Ascent is the same as [`crate::FlatLayout`] but it is kept as its own rule:
/// on Apple platforms the launcher still uses this layout while the
/// relocation tool uses [`crate::AppleBundleLayout`].
#[derive(Debug, Clone, Copy)]
pub struct LaunchLayout {
    family: PlatformFamily,
}

impl LaunchLayout {
    #[must_use]
    pub fn new(family: PlatformFamily) -> Self {
        Self { family }
    }

    /// Real application binary for `app`
    ///
    /// # Errors
    ///
    /// Returns `PathTooLong` if the result does not fit.
    pub fn app_path(
        &self,
        bundle_root: &BoundedPath,
        app: &str,
    ) -> Result<BoundedPath, ResolveError> {
        bundle_root.join(fixed_paths::EXE_DIR)?.join(app)
    }
}

impl Default for LaunchLayout {
    fn default() -> Self {
        Self::new(PlatformFamily::current())
    }
}

impl BundleLayout for LaunchLayout {
    fn name(&self) -> &'static str {
        "launch"
    }

    fn family(&self) -> PlatformFamily {
        self.family
    }

    fn resolve_paths(&self, executable: &Path) -> Result<BundlePaths, ResolveError> {
        let exe = bounded_executable(executable, self.family)?;
        let bundle_root = exe.ascend(2)?;
        let resources_dir = bundle_root.join(fixed_paths::RESOURCES_DIR)?;
        Ok(BundlePaths {
            bundle_root,
            resources_dir,
        })
    }
}
