//! Handler for the `submit` command

use super::HandlerContext;
use crate::cli::OutputFormatter;
use crate::core::NewTicket;
use crate::error::Result;

/// Submit a customer ticket
///
/// Validation problems are reported together, one line per field.
pub fn handle_submit_command(
    fields: NewTicket,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.desk.submit(&fields)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "status": "success",
            "ticket": ticket,
        }))?;
    } else {
        output.success(&format!(
            "Ticket {} submitted for {} ({})",
            ticket.id.short(),
            ticket.name,
            ticket.device_name
        ));
        output.info(&format!("Full ID: {}", ticket.id));
    }

    Ok(())
}
