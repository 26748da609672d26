//! Help desk facade
//!
//! [`HelpDesk`] wires a [`TicketStore`] to a [`SessionGate`] and exposes the
//! operations a front end needs. Customer-facing calls (submitting and
//! reading tickets) are open; staff updates go through the gate first.

use crate::analytics::{self, Analysis};
use crate::auth::{CredentialVerifier, Session, SessionGate, SessionPolicy, SessionToken};
use crate::core::{Clock, NewTicket, Status, Ticket, TicketId, TicketPatch};
use crate::error::Result;
use crate::report;
use crate::storage::TicketRepository;
use crate::store::TicketStore;
use std::sync::Arc;

/// Ticket store and session gate sharing one clock
pub struct HelpDesk<R> {
    store: TicketStore<R>,
    gate: SessionGate,
    clock: Arc<dyn Clock>,
}

impl<R: TicketRepository> HelpDesk<R> {
    pub fn new(
        repository: R,
        verifier: impl CredentialVerifier + 'static,
        clock: Arc<dyn Clock>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            store: TicketStore::new(repository, clock.clone()),
            gate: SessionGate::new(verifier, clock.clone(), policy),
            clock,
        }
    }

    pub const fn store(&self) -> &TicketStore<R> {
        &self.store
    }

    pub const fn gate(&self) -> &SessionGate {
        &self.gate
    }

    /// Submit a customer ticket; no login required
    pub fn submit(&self, fields: &NewTicket) -> Result<Ticket> {
        self.store.create(fields)
    }

    pub fn ticket(&self, id: &TicketId) -> Result<Ticket> {
        self.store.get(id)
    }

    pub fn tickets(&self) -> Result<Vec<Ticket>> {
        self.store.list()
    }

    /// Tickets currently in `status`, in creation order
    pub fn tickets_with_status(&self, status: Status) -> Result<Vec<Ticket>> {
        self.store.find(|ticket| ticket.status == status)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        self.gate.login(username, password)
    }

    pub fn logout(&self, token: &SessionToken) {
        self.gate.logout(token);
    }

    /// Session behind a token, if it is still live
    pub fn authenticate(&self, token: &SessionToken) -> Result<Session> {
        self.gate.authenticate(token)
    }

    /// Staff update of a ticket
    ///
    /// The session is checked before the ticket is looked up, so a missing or
    /// expired token fails with `Unauthenticated` whether or not the ticket
    /// exists.
    pub fn update(
        &self,
        token: Option<&SessionToken>,
        id: &TicketId,
        patch: &TicketPatch,
    ) -> Result<Ticket> {
        let session = self.gate.require_auth(token)?;
        self.store.update(&session, id, patch)
    }

    /// Analyse a snapshot of every ticket
    pub fn analyze(&self) -> Result<Analysis> {
        let snapshot = self.store.list()?;
        Ok(analytics::analyze(&snapshot))
    }

    /// Render the analysis report, stamped with the current time
    pub fn report(&self) -> Result<Vec<String>> {
        let analysis = self.analyze()?;
        Ok(report::render(&analysis, self.clock.now()))
    }
}
