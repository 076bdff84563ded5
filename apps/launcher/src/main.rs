//! launcher - start the real application with bundle-local resources
//!
//! Installed as `<bundle>/bin/<app>`. It points the GTK stack at the bundle's
//! own caches and data and then replaces itself with `<bundle>/exe/<app>`,
//! forwarding every argument untouched. It has no options of its own.

use reloc_errors::UserFacingError;
use reloc_ops::{plan_launch, OpsContextBuilder};
use reloc_platform::LaunchLayout;
use std::process;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let err = match run() {
        Ok(err) => reloc_errors::Error::from(err),
        Err(err) => err,
    };

    error!("Launch failed: {}", err);
    eprintln!("Error: {}", err.user_message());
    if let Some(hint) = err.user_hint() {
        eprintln!("  Hint: {hint}");
    }
    process::exit(1);
}

/// Returns only on failure: `Ok` carries the exec error
fn run() -> Result<reloc_errors::LaunchError, reloc_errors::Error> {
    let ctx = OpsContextBuilder::new()
        .with_layout(Box::new(LaunchLayout::default()))
        .build()?;
    let plan = plan_launch(&ctx, std::env::args_os())?;

    for var in &plan.env {
        debug!(name = var.name, value = %var.value.display(), "Setting environment");
    }
    debug!(program = %plan.program.display(), "Executing application");

    Ok(plan.exec())
}

/// Quiet unless `RELOC_LOG` asks for more; stderr belongs to the application
fn init_tracing() {
    let filter = EnvFilter::try_from_env("RELOC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
