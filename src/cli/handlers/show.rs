//! Handlers for the `list` and `show` commands

use super::HandlerContext;
use crate::cli::OutputFormatter;
use crate::core::{Status, Ticket};
use crate::error::Result;
use chrono::{DateTime, Local, Utc};
use colored::Colorize;

/// List tickets, optionally filtered by status
pub fn handle_list_command(
    status: Option<&str>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let tickets = match status.map(str::parse::<Status>).transpose()? {
        Some(status) => ctx.desk.tickets_with_status(status)?,
        None => ctx.desk.tickets()?,
    };

    if output.is_json() {
        return output.print_json(&serde_json::json!({
            "tickets": tickets,
            "count": tickets.len(),
        }));
    }

    if tickets.is_empty() {
        output.info("No tickets found");
        return Ok(());
    }

    for ticket in &tickets {
        output.info(&format_ticket_line(ticket));
    }
    output.info(&format!("\n{} ticket(s)", tickets.len()));
    Ok(())
}

/// Show every field of one ticket, including its notes
pub fn handle_show_command(
    reference: &str,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let id = ctx.resolve_ticket_id(reference)?;
    let ticket = ctx.desk.ticket(&id)?;

    if output.is_json() {
        return output.print_json(&ticket);
    }

    output.heading(&format!("Ticket {}", ticket.id));
    output.info(&format!("Status:      {}", colorize_status(ticket.status)));
    output.info(&format!("Priority:    {}", ticket.priority));
    output.info(&format!(
        "Assigned to: {}",
        ticket.assigned_to.as_deref().unwrap_or("-")
    ));
    output.info(&format!("Customer:    {}", ticket.name));
    output.info(&format!("Phone:       {}", ticket.phone));
    output.info(&format!("Email:       {}", ticket.email));
    output.info(&format!("Device:      {}", ticket.device_name));
    output.info(&format!("Created:     {}", format_datetime(ticket.created_at)));
    output.info(&format!("Updated:     {}", format_datetime(ticket.updated_at)));
    output.info("");
    output.info(&ticket.description);

    if !ticket.notes.is_empty() {
        output.info("");
        output.heading("Notes");
        for note in &ticket.notes {
            output.info(&format!(
                "  [{}] {}: {}",
                format_datetime(note.timestamp),
                note.author,
                note.text
            ));
        }
    }

    Ok(())
}

pub(super) fn format_ticket_line(ticket: &Ticket) -> String {
    format!(
        "{}  {} {:<7} {:<20} {}",
        ticket.id.short(),
        colorize_status(ticket.status),
        ticket.priority.to_string(),
        ticket.name,
        ticket.device_name
    )
}

fn colorize_status(status: Status) -> String {
    let label = format!("{:<11}", status.as_str());
    match status {
        Status::New => label.cyan().to_string(),
        Status::InProgress => label.yellow().to_string(),
        Status::Resolved => label.green().to_string(),
        Status::Closed => label.dimmed().to_string(),
    }
}

fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
