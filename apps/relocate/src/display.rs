//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use reloc_ops::RelocationReport;
use reloc_patch::PaddingMode;
use std::io;

/// Output renderer for relocation reports
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }

    /// Render the report to stdout
    pub fn render_report(&self, report: &RelocationReport) -> io::Result<()> {
        if self.json_output {
            let json = report.to_json().map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        println!("Bundle:    {}", report.bundle_root.display());
        println!("Resources: {}", report.resources_dir.display());
        println!("Layout:    {}", report.layout);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("File").add_attribute(Attribute::Bold),
            Cell::new("Mode").add_attribute(Attribute::Bold),
            Cell::new("Replaced").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

        for patch in &report.patches {
            let status = if patch.replacements == 0 {
                Cell::new("no placeholder").fg(Color::Yellow)
            } else if patch.rewritten {
                Cell::new("patched").fg(Color::Green)
            } else {
                Cell::new("would patch").fg(Color::Cyan)
            };
            let mode = match patch.mode {
                PaddingMode::Exact => "exact",
                PaddingMode::ZeroPadded => "zero-padded",
            };

            table.add_row(vec![
                Cell::new(patch.path.display()),
                Cell::new(mode),
                Cell::new(patch.replacements),
                status,
            ]);
        }

        println!("{table}");

        if report.dry_run {
            println!(
                "Dry run: {} placeholder(s) would be replaced.",
                report.total_replacements()
            );
        } else {
            println!("Replaced {} placeholder(s).", report.total_replacements());
        }

        Ok(())
    }
}
