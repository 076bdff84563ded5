//! relocate - patch an installed application bundle for its current location
//!
//! Run once after the bundle has been unpacked or moved. It finds the bundle
//! from its own executable path and rewrites the build-time placeholders in
//! the resource caches (and, on flat bundles, the launcher's interpreter).

mod cli;
mod display;
mod error;
mod logging;

use crate::cli::Cli;
use crate::display::OutputRenderer;
use crate::error::CliError;
use clap::Parser;
use reloc_config::Config;
use reloc_ops::{OpsContextBuilder, OpsCtx};
use reloc_platform::{current_exe_path, PlatformFamily};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    // Logging needs the bundle root and the configured filter; settle those
    // first so that the real resolution below is logged
    let (bundle_root, log_filter) = match logging_target(&cli) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    logging::init_tracing(json_mode, cli.debug, &bundle_root, &log_filter);

    if let Err(e) = build_context(&cli).and_then(|ctx| run(&ctx, json_mode)) {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Bundle root and log filter, computed without any logging
fn logging_target(cli: &Cli) -> Result<(PathBuf, String), CliError> {
    let executable = match &cli.exe_path {
        Some(path) => path.clone(),
        None => current_exe_path()
            .map_err(reloc_errors::Error::from)?
            .into_path_buf(),
    };
    let paths = PlatformFamily::current()
        .relocation_layout()
        .resolve_paths(&executable)
        .map_err(reloc_errors::Error::from)?;

    let mut config = Config::load_or_default(cli.config.as_deref(), paths.bundle_root.as_path())?;
    config.merge_env()?;
    Ok((paths.bundle_root.into_path_buf(), config.general.log_filter))
}

/// Resolve the bundle and load configuration with proper precedence:
/// defaults, then file, then environment, then CLI flags
fn build_context(cli: &Cli) -> Result<OpsCtx, CliError> {
    let mut builder = OpsContextBuilder::new().with_config_path(cli.config.clone());
    if let Some(exe_path) = &cli.exe_path {
        builder = builder.with_executable(exe_path);
    }
    let mut ctx = builder.build()?;

    apply_cli_config(&mut ctx, cli);
    Ok(ctx)
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(ctx: &mut OpsCtx, cli: &Cli) {
    if cli.dry_run {
        ctx.config.relocate.dry_run = true;
    }
}

/// Main application logic
fn run(ctx: &OpsCtx, json_mode: bool) -> Result<(), CliError> {
    info!("Starting relocate v{}", env!("CARGO_PKG_VERSION"));

    let report = reloc_ops::relocate(ctx)?;
    OutputRenderer::new(json_mode).render_report(&report)?;

    info!("Relocation completed successfully");
    Ok(())
}
