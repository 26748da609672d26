//! Handler for the `update` command
//!
//! A CLI process has no long-lived session, so the handler logs in with the
//! staff credentials, applies one patch, and logs out before returning.

use super::HandlerContext;
use super::show::format_ticket_line;
use crate::cli::OutputFormatter;
use crate::core::{NoteDraft, Priority, Status, TicketPatch};
use crate::error::Result;
use dialoguer::{Password, theme::ColorfulTheme};

/// Parameters for updating a ticket
#[derive(Debug, Default)]
pub struct UpdateArgs {
    pub ticket: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assign: Option<String>,
    pub note: Option<String>,
    pub author: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UpdateArgs {
    /// Turn the raw flags into a patch, rejecting unknown status or priority names
    pub fn to_patch(&self) -> Result<TicketPatch> {
        Ok(TicketPatch {
            status: self.status.as_deref().map(str::parse::<Status>).transpose()?,
            priority: self
                .priority
                .as_deref()
                .map(str::parse::<Priority>)
                .transpose()?,
            assigned_to: self.assign.clone(),
            note: self.note.as_ref().map(|text| NoteDraft {
                text: text.clone(),
                author: self.author.clone(),
            }),
        })
    }
}

/// Apply a staff update to one ticket
pub fn handle_update_command(
    args: UpdateArgs,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let patch = args.to_patch()?;

    let username = args
        .username
        .clone()
        .unwrap_or_else(|| ctx.config.auth.username.clone());
    let password = match args.password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Password for {username}"))
            .interact()?,
    };

    // Credentials are checked before the ticket reference is resolved
    let session = ctx.desk.login(&username, &password)?;
    let result = ctx
        .resolve_ticket_id(&args.ticket)
        .and_then(|id| ctx.desk.update(Some(session.token()), &id, &patch));
    ctx.desk.logout(session.token());
    let ticket = result?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "status": "success",
            "ticket": ticket,
        }))?;
    } else {
        output.success(&format!("Ticket {} updated", ticket.id.short()));
        if patch.status.is_some() {
            output.info(&format!("Status is now {}", ticket.status));
        }
        output.info(&format_ticket_line(&ticket));
    }

    Ok(())
}
