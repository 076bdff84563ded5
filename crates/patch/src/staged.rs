//! Temporary output with atomic publish
//!
//! A `StagedPatch` owns the fully written temporary file. Publishing renames
//! it over the original; dropping it unpublished deletes it, so an
//! interrupted run never leaves a half-patched target behind.

use crate::file::PatchReport;
use reloc_errors::PatchError;
use std::fs::Permissions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Patched content waiting to replace its original
#[derive(Debug)]
pub struct StagedPatch {
    destination: PathBuf,
    temp: Option<NamedTempFile>,
    report: PatchReport,
}

impl StagedPatch {
    /// Nothing to write: the original already has no placeholder
    pub(crate) fn unchanged(destination: PathBuf, report: PatchReport) -> Self {
        Self {
            destination,
            temp: None,
            report,
        }
    }

    /// Write `content` to a temporary file beside `destination`, carrying
    /// over `permissions`
    pub(crate) fn write(
        destination: PathBuf,
        content: &[u8],
        permissions: Permissions,
        report: PatchReport,
    ) -> Result<Self, PatchError> {
        let dir = staging_dir(&destination);
        let file_name = destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut temp = tempfile::Builder::new()
            .prefix(&format!(".{file_name}."))
            .suffix(".reloc-tmp")
            .tempfile_in(dir)
            .map_err(|e| PatchError::CannotOpenDestination {
                dir: dir.display().to_string(),
                message: e.to_string(),
            })?;

        let write_failed = |e: std::io::Error| PatchError::WriteFailed {
            path: temp_display(&destination),
            message: e.to_string(),
        };
        temp.write_all(content).map_err(write_failed)?;
        temp.as_file().sync_all().map_err(write_failed)?;

        // Fresh temp files get 0600; the original mode must survive the rename
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| PatchError::PermissionsFailed {
                path: temp.path().display().to_string(),
                message: e.to_string(),
            })?;

        debug!(
            temp = %temp.path().display(),
            destination = %destination.display(),
            bytes = content.len(),
            "Staged patched content"
        );

        Ok(Self {
            destination,
            temp: Some(temp),
            report,
        })
    }

    /// File this patch will replace
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Temporary file holding the patched content, if anything was staged
    #[must_use]
    pub fn temp_path(&self) -> Option<&Path> {
        self.temp.as_ref().map(NamedTempFile::path)
    }

    /// Outcome so far; `rewritten` turns true only after publishing
    #[must_use]
    pub fn report(&self) -> &PatchReport {
        &self.report
    }

    /// Atomically replace the original with the staged content
    ///
    /// # Errors
    ///
    /// Returns `PublishFailed` if the rename fails. The temporary file is
    /// removed and the original left as it was.
    pub fn publish(self) -> Result<PatchReport, PatchError> {
        let Self {
            destination,
            temp,
            mut report,
        } = self;

        let Some(temp) = temp else {
            return Ok(report);
        };

        temp.persist(&destination)
            .map_err(|e| PatchError::PublishFailed {
                path: destination.display().to_string(),
                message: e.error.to_string(),
            })?;

        report.rewritten = true;
        Ok(report)
    }
}

fn staging_dir(destination: &Path) -> &Path {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn temp_display(destination: &Path) -> String {
    format!("temporary file for {}", destination.display())
}
