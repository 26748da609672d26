//! Ticket lifecycle service
//!
//! [`TicketStore`] is the only writer of ticket records. Submissions need no
//! authentication. Updates are crate-internal and reached only through
//! [`HelpDesk::update`](crate::desk::HelpDesk::update), which checks the
//! session token against the gate first.

use crate::auth::Session;
use crate::core::validation::{validate_new_ticket, validate_patch};
use crate::core::{Clock, NewTicket, Note, Ticket, TicketBuilder, TicketId, TicketPatch};
use crate::error::{HelpdeskError, Result};
use crate::storage::TicketRepository;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, PoisonError};

/// Creates, reads, and updates tickets on top of a repository
pub struct TicketStore<R> {
    repository: R,
    clock: Arc<dyn Clock>,
    // Serializes read-modify-write cycles so concurrent updates never interleave
    write_lock: Mutex<()>,
}

impl<R: TicketRepository> TicketStore<R> {
    pub fn new(repository: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Underlying repository
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Submit a new ticket
    ///
    /// The ticket starts as `new` with `medium` priority and identical
    /// creation and update timestamps.
    pub fn create(&self, fields: &NewTicket) -> Result<Ticket> {
        let fields = validate_new_ticket(fields)?;
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut id = TicketId::new();
        while self.repository.exists(&id)? {
            id = TicketId::new();
        }

        let ticket = TicketBuilder::new()
            .id(id)
            .name(fields.name)
            .phone(fields.phone)
            .email(fields.email)
            .device_name(fields.device_name)
            .description(fields.description)
            .created_at(self.clock.now())
            .build();

        self.repository.save(&ticket)?;
        tracing::info!("Ticket created - {} ({})", ticket.id.short(), ticket.device_name);
        Ok(ticket)
    }

    /// Fetch one ticket
    pub fn get(&self, id: &TicketId) -> Result<Ticket> {
        self.repository.load(id)
    }

    /// Point-in-time copy of every ticket in creation order
    pub fn list(&self) -> Result<Vec<Ticket>> {
        self.repository.load_all()
    }

    /// Tickets matching a predicate, in creation order
    pub fn find<F>(&self, predicate: F) -> Result<Vec<Ticket>>
    where
        F: Fn(&Ticket) -> bool,
    {
        self.repository.find(predicate)
    }

    /// Apply a staff patch atomically on behalf of a gate-checked session
    pub(crate) fn update(
        &self,
        session: &Session,
        id: &TicketId,
        patch: &TicketPatch,
    ) -> Result<Ticket> {
        validate_patch(patch)?;
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.repository.load(id)?;
        let updated = apply_patch(current.clone(), patch, &session.username, self.clock.now())?;
        self.repository.save(&updated)?;

        if current.status != updated.status {
            tracing::info!(
                "Ticket {} status changed from {} to {} by {}",
                id.short(),
                current.status,
                updated.status,
                session.username
            );
        } else {
            tracing::info!("Ticket {} updated by {}", id.short(), session.username);
        }
        Ok(updated)
    }
}

/// Apply a patch to a ticket, checking the status transition table
///
/// Restating the current status of an open ticket is a no-op. Closed tickets
/// reject any status in the patch but still accept priority, assignment, and
/// notes.
pub fn apply_patch(
    mut ticket: Ticket,
    patch: &TicketPatch,
    default_author: &str,
    now: DateTime<Utc>,
) -> Result<Ticket> {
    if let Some(to) = patch.status {
        let from = ticket.status;
        let legal = !from.is_terminal() && (from == to || from.can_transition_to(to));
        if !legal {
            return Err(HelpdeskError::InvalidTransition { from, to });
        }
        ticket.status = to;
    }

    if let Some(priority) = patch.priority {
        ticket.priority = priority;
    }

    if let Some(assignee) = &patch.assigned_to {
        let assignee = assignee.trim();
        ticket.assigned_to = (!assignee.is_empty()).then(|| assignee.to_string());
    }

    if let Some(draft) = &patch.note {
        let author = draft
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(default_author);
        ticket.notes.push(Note {
            text: draft.text.trim().to_string(),
            author: author.to_string(),
            timestamp: now,
        });
    }

    ticket.updated_at = now;
    Ok(ticket)
}
