//! `.app` bundle layout used by the relocation tool on Apple platforms

use crate::core::{bounded_executable, BundleLayout, BundlePaths, PlatformFamily};
use reloc_errors::ResolveError;
use std::path::Path;

/// The tool lives at `<root>/Contents/Resources/bin/<exe>`.
///
/// Two `dirname` steps from the executable give `<root>/Contents/Resources`,
/// which is the resources directory itself; two more give the bundle root.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppleBundleLayout;

impl BundleLayout for AppleBundleLayout {
    fn name(&self) -> &'static str {
        "apple-bundle"
    }

    fn family(&self) -> PlatformFamily {
        PlatformFamily::Apple
    }

    fn resolve_paths(&self, executable: &Path) -> Result<BundlePaths, ResolveError> {
        let exe = bounded_executable(executable, self.family())?;
        let resources_dir = exe.ascend(2)?;
        let bundle_root = resources_dir.ascend(2)?;
        Ok(BundlePaths {
            bundle_root,
            resources_dir,
        })
    }
}
