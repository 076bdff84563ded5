//! Flat layout used by the relocation tool everywhere except Apple platforms

use crate::core::{bounded_executable, BundleLayout, BundlePaths, PlatformFamily};
use reloc_config::fixed_paths;
use reloc_errors::ResolveError;
use std::path::Path;

/// The tool lives at `<root>/bin/<exe>`; resources are `<root>/resources`.
///
/// Bundles in this layout also ship their own dynamic loader, so the launcher
/// binary carries an interpreter placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatLayout;

impl BundleLayout for FlatLayout {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn family(&self) -> PlatformFamily {
        PlatformFamily::Flat
    }

    fn resolve_paths(&self, executable: &Path) -> Result<BundlePaths, ResolveError> {
        let exe = bounded_executable(executable, self.family())?;
        let bundle_root = exe.ascend(2)?;
        let resources_dir = bundle_root.join(fixed_paths::RESOURCES_DIR)?;
        Ok(BundlePaths {
            bundle_root,
            resources_dir,
        })
    }

    fn patches_interpreter(&self) -> bool {
        true
    }
}
