//! Handlers for the `report` and `analyze` commands

use super::HandlerContext;
use crate::analytics::{self, RawTicket};
use crate::cli::OutputFormatter;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Render the analysis report, optionally saving it to a file
pub fn handle_report_command(
    output_file: Option<&Path>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let lines = ctx.desk.report()?;

    if let Some(path) = output_file {
        fs::write(path, lines.join("\n"))?;
        tracing::debug!("Report written to {}", path.display());
    }

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "report": lines,
            "saved_to": output_file,
        }))?;
    } else {
        for line in &lines {
            output.info(line);
        }
        if let Some(path) = output_file {
            output.success(&format!("Report saved to: {}", path.display()));
        }
    }

    Ok(())
}

/// Print the full analysis as JSON
///
/// With `input`, the analysis runs over an exported ticket file (a JSON
/// array or a `{"data": [...]}` envelope) instead of the configured store.
pub fn handle_analyze_command(
    input: Option<&Path>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let analysis = match input {
        Some(path) => {
            let records = RawTicket::parse_export(&fs::read_to_string(path)?)?;
            tracing::debug!("Read {} records from {}", records.len(), path.display());
            analytics::analyze(&records)
        },
        None => ctx.desk.analyze()?,
    };

    output.print_json(&analysis)
}
