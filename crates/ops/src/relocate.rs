//! Relocation driver: patch a freshly installed bundle for its real location

use crate::context::OpsCtx;
use crate::types::RelocationReport;
use reloc_config::fixed_paths;
use reloc_errors::Error;
use reloc_patch::{patch_file, scan_file, PaddingMode, PatchTarget, Placeholder};
use tracing::{info, warn};

/// Every patch a relocation run performs, in order.
///
/// All targets are built before any file is touched, so a replacement that
/// cannot fit its reserved field is reported before the bundle is modified.
///
/// # Errors
///
/// Returns `PathTooLong` if a target path does not fit the platform limit and
/// `ReplacementTooLong` if the interpreter path is wider than its field.
pub fn plan_relocation(ctx: &OpsCtx) -> Result<Vec<PatchTarget>, Error> {
    let resources_dir = &ctx.paths.resources_dir;
    let mut targets = Vec::new();

    for cache in ctx.config.resources.caches() {
        let path = resources_dir.join(cache)?;
        targets.push(PatchTarget::with_path_replacement(
            path.into_path_buf(),
            Placeholder::cache(),
            resources_dir.as_path(),
            PaddingMode::Exact,
        )?);
    }

    if ctx.layout.patches_interpreter() && ctx.config.relocate.patch_interpreter {
        let bundle_root = &ctx.paths.bundle_root;
        let launcher =
            bundle_root.join(ctx.config.relocate.interpreter_target(&ctx.config.launch.app))?;
        let interpreter = bundle_root.join(fixed_paths::INTERPRETER_PATH)?;
        targets.push(PatchTarget::with_path_replacement(
            launcher.into_path_buf(),
            Placeholder::interpreter(),
            interpreter.as_path(),
            PaddingMode::ZeroPadded,
        )?);
    }

    Ok(targets)
}

/// Patch the bundle described by `ctx`.
///
/// Files are patched one at a time. The first failure stops the run; files
/// patched before it stay patched. Running again on a relocated bundle finds
/// no placeholders and changes nothing.
///
/// # Errors
///
/// Returns the first planning or patching error.
pub fn relocate(ctx: &OpsCtx) -> Result<RelocationReport, Error> {
    let dry_run = ctx.config.relocate.dry_run;
    let targets = plan_relocation(ctx)?;

    info!(
        layout = ctx.layout.name(),
        bundle_root = %ctx.paths.bundle_root,
        resources_dir = %ctx.paths.resources_dir,
        files = targets.len(),
        dry_run,
        "Relocating bundle"
    );

    let mut patches = Vec::with_capacity(targets.len());
    for target in &targets {
        let report = if dry_run {
            scan_file(target)?
        } else {
            patch_file(target)?
        };

        if report.replacements == 0 {
            warn!(
                path = %report.path.display(),
                "No placeholder found; file already relocated or not built for relocation"
            );
        }
        patches.push(report);
    }

    let report = RelocationReport {
        layout: ctx.layout.name().to_string(),
        bundle_root: ctx.paths.bundle_root.as_path().to_path_buf(),
        resources_dir: ctx.paths.resources_dir.as_path().to_path_buf(),
        dry_run,
        patches,
    };

    info!(
        files = report.patches.len(),
        replacements = report.total_replacements(),
        "Relocation finished"
    );

    Ok(report)
}
