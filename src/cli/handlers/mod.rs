//! Command handlers for the CLI
//!
//! Each handler receives parsed arguments plus a [`HandlerContext`] and
//! reports through the shared [`OutputFormatter`](crate::cli::OutputFormatter).

mod analyze;
mod password;
mod show;
mod submit;
mod update;

pub use analyze::{handle_analyze_command, handle_report_command};
pub use password::handle_hash_password_command;
pub use show::{handle_list_command, handle_show_command};
pub use submit::handle_submit_command;
pub use update::{UpdateArgs, handle_update_command};

use crate::config::HelpdeskConfig;
use crate::core::{SystemClock, TicketId};
use crate::desk::HelpDesk;
use crate::error::{HelpdeskError, Result};
use crate::storage::FileStorage;
use std::path::Path;
use std::sync::Arc;

/// Shortest ID prefix accepted in place of a full ticket ID
const MIN_PREFIX_LEN: usize = 4;

/// Context for handler operations
///
/// Loads configuration, opens the ticket file, and wires the help desk.
pub struct HandlerContext {
    pub config: HelpdeskConfig,
    pub desk: HelpDesk<FileStorage>,
}

impl HandlerContext {
    /// Build the context from the global CLI options
    pub fn new(config_path: Option<&Path>, data_file: Option<&Path>) -> Result<Self> {
        let mut config = HelpdeskConfig::load(config_path)?;
        if let Some(path) = data_file {
            config.storage.data_file = path.to_path_buf();
        }

        let storage = FileStorage::open(&config.storage.data_file)?;
        let verifier = config.verifier()?;
        let desk = HelpDesk::new(
            storage,
            verifier,
            Arc::new(SystemClock),
            config.session_policy(),
        );

        Ok(Self { config, desk })
    }

    /// Resolve a full ticket ID or a unique prefix of one
    pub fn resolve_ticket_id(&self, reference: &str) -> Result<TicketId> {
        let reference = reference.trim();
        if let Ok(id) = reference.parse::<TicketId>() {
            return Ok(id);
        }

        let prefix = reference.to_lowercase();
        if prefix.len() < MIN_PREFIX_LEN {
            return Err(HelpdeskError::invalid_field(
                "ticket",
                format!("use the full ID or at least {MIN_PREFIX_LEN} characters of it"),
            ));
        }

        let mut matches: Vec<TicketId> = self
            .desk
            .tickets()?
            .into_iter()
            .map(|ticket| ticket.id)
            .filter(|id| id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => Err(HelpdeskError::TicketNotFound {
                id: reference.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            n => Err(HelpdeskError::invalid_field(
                "ticket",
                format!("'{reference}' matches {n} tickets"),
            )),
        }
    }
}
