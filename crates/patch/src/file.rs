//! Patching files on disk

use crate::scan::{PaddingMode, PatchTarget};
use crate::staged::StagedPatch;
use reloc_errors::PatchError;
use serde::{Deserialize, Serialize};
use std::fs::{File, Permissions};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of patching one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchReport {
    pub path: PathBuf,
    pub mode: PaddingMode,
    pub replacements: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
    /// Whether the file on disk was replaced
    pub rewritten: bool,
}

/// Patch `target` in place (via temp file and rename) and report what changed.
///
/// A file without any occurrence of the placeholder is left untouched and
/// reported with zero replacements.
///
/// # Errors
///
/// Returns `CannotOpenSource` if the file cannot be read,
/// `CannotOpenDestination` if no temporary file can be created beside it, and
/// `WriteFailed`, `PermissionsFailed` or `PublishFailed` for later stages. On
/// any error the original file is unchanged.
pub fn patch_file(target: &PatchTarget) -> Result<PatchReport, PatchError> {
    let report = stage_patch(target)?.publish()?;

    info!(
        path = %report.path.display(),
        replacements = report.replacements,
        mode = ?report.mode,
        bytes_before = report.bytes_before,
        bytes_after = report.bytes_after,
        "Applied placeholder patch"
    );

    Ok(report)
}

/// Count what [`patch_file`] would replace without writing anything
///
/// # Errors
///
/// Returns `CannotOpenSource` if the file cannot be read.
pub fn scan_file(target: &PatchTarget) -> Result<PatchReport, PatchError> {
    let (content, _) = read_source(target.path())?;
    let patched = target.apply(&content);
    Ok(report_for(
        target,
        content.len(),
        &patched.bytes,
        patched.replacements,
    ))
}

/// Read, patch in memory and stage the result without publishing it.
///
/// Dropping the returned value instead of calling
/// [`StagedPatch::publish`] discards the temporary file.
///
/// # Errors
///
/// Same as [`patch_file`], minus `PublishFailed`.
pub fn stage_patch(target: &PatchTarget) -> Result<StagedPatch, PatchError> {
    let (content, permissions) = read_source(target.path())?;
    let patched = target.apply(&content);
    let report = report_for(target, content.len(), &patched.bytes, patched.replacements);

    debug!(
        path = %target.path().display(),
        replacements = patched.replacements,
        "Scanned for placeholder"
    );

    if patched.replacements == 0 {
        return Ok(StagedPatch::unchanged(target.path().to_path_buf(), report));
    }

    StagedPatch::write(
        target.path().to_path_buf(),
        &patched.bytes,
        permissions,
        report,
    )
}

fn read_source(path: &Path) -> Result<(Vec<u8>, Permissions), PatchError> {
    let cannot_open = |e: std::io::Error| PatchError::CannotOpenSource {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut file = File::open(path).map_err(cannot_open)?;
    let metadata = file.metadata().map_err(cannot_open)?;
    let capacity = usize::try_from(metadata.len()).unwrap_or(0);
    let mut content = Vec::with_capacity(capacity);
    file.read_to_end(&mut content).map_err(cannot_open)?;

    Ok((content, metadata.permissions()))
}

fn report_for(
    target: &PatchTarget,
    before: usize,
    after: &[u8],
    replacements: usize,
) -> PatchReport {
    PatchReport {
        path: target.path().to_path_buf(),
        mode: target.mode(),
        replacements,
        bytes_before: u64::try_from(before).unwrap_or(u64::MAX),
        bytes_after: u64::try_from(after.len()).unwrap_or(u64::MAX),
        rewritten: false,
    }
}
