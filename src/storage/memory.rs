use super::TicketRepository;
use crate::core::{Ticket, TicketId};
use crate::error::{HelpdeskError, Result};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
struct Inner {
    tickets: HashMap<TicketId, Ticket>,
    order: Vec<TicketId>,
}

/// In-process ticket storage
///
/// Keeps insertion order so listings come back in creation order.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tickets
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TicketRepository for MemoryStorage {
    fn save(&self, ticket: &Ticket) -> Result<()> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner
            .tickets
            .insert(ticket.id.clone(), ticket.clone())
            .is_none()
        {
            inner.order.push(ticket.id.clone());
        }
        Ok(())
    }

    fn load(&self, id: &TicketId) -> Result<Ticket> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .tickets
            .get(id)
            .cloned()
            .ok_or_else(|| HelpdeskError::TicketNotFound { id: id.to_string() })
    }

    fn load_all(&self) -> Result<Vec<Ticket>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.tickets.get(id).cloned())
            .collect())
    }
}
