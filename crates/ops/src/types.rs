//! Types for operations and results

use reloc_errors::Error;
use reloc_patch::PatchReport;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of one relocation run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelocationReport {
    /// Layout used to resolve the bundle
    pub layout: String,
    pub bundle_root: PathBuf,
    pub resources_dir: PathBuf,
    /// Nothing was written; counts are what a real run would replace
    pub dry_run: bool,
    /// One entry per file, in patch order
    pub patches: Vec<PatchReport>,
}

impl RelocationReport {
    /// Total placeholder occurrences replaced across all files
    #[must_use]
    pub fn total_replacements(&self) -> usize {
        self.patches.iter().map(|p| p.replacements).sum()
    }

    /// Files in which no placeholder was found
    pub fn untouched(&self) -> impl Iterator<Item = &PatchReport> {
        self.patches.iter().filter(|p| p.replacements == 0)
    }

    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
