use crate::core::{Ticket, TicketId};
use crate::error::Result;

/// Repository trait for ticket storage operations
///
/// This trait defines the keyed store the ticket service sits on, allowing
/// for different storage implementations. Implementations must make `save`
/// atomic per record and return point-in-time copies from the read methods.
pub trait TicketRepository: Send + Sync {
    /// Inserts or replaces a ticket
    fn save(&self, ticket: &Ticket) -> Result<()>;

    /// Loads a ticket by ID
    fn load(&self, id: &TicketId) -> Result<Ticket>;

    /// Loads all tickets in creation order
    fn load_all(&self) -> Result<Vec<Ticket>>;

    /// Checks if a ticket exists by ID
    fn exists(&self, id: &TicketId) -> Result<bool> {
        match self.load(id) {
            Ok(_) => Ok(true),
            Err(crate::error::HelpdeskError::TicketNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Finds tickets matching a predicate
    fn find<F>(&self, predicate: F) -> Result<Vec<Ticket>>
    where
        F: Fn(&Ticket) -> bool,
        Self: Sized,
    {
        let tickets = self.load_all()?;
        Ok(tickets.into_iter().filter(predicate).collect())
    }
}
