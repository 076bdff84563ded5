//! Tracing subscriber setup

use reloc_config::fixed_paths;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides `default_filter`. With `--debug` logs go as JSON to a
/// timestamped file under `<bundle_root>/logs/`; in JSON output mode nothing
/// is written to the console.
pub fn init_tracing(json_mode: bool, debug_enabled: bool, bundle_root: &Path, default_filter: &str) {
    if debug_enabled {
        let log_dir = bundle_root.join(fixed_paths::LOGS_DIR);
        let log_file = log_dir.join(format!(
            "relocate-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        let opened = std::fs::create_dir_all(&log_dir)
            .and_then(|()| std::fs::File::create(&log_file));
        match opened {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(filter("debug"))
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) => {
                if !json_mode {
                    eprintln!("Warning: Failed to create log file: {e}");
                }
            }
        }
    }

    if json_mode {
        // Keep stdout clean for the report
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter(default_filter))
            .init();
    }
}
