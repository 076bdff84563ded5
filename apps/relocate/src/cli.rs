//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;

/// relocate - patch an installed bundle for its current location
#[derive(Parser)]
#[command(name = "relocate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Patch an installed application bundle for its current location")]
#[command(long_about = None)]
pub struct Cli {
    /// Resolve the bundle from this executable path instead of our own
    #[arg(long, value_name = "PATH")]
    pub exe_path: Option<PathBuf>,

    /// Report what would be patched without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output the relocation report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging to <bundle>/logs/
    #[arg(long)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
