//! Core domain types: tickets, their lifecycle, and the time source

mod builders;
mod clock;
mod status;
mod ticket;
pub mod validation;

pub use builders::TicketBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use status::{Priority, Status};
pub use ticket::{NewTicket, Note, NoteDraft, Ticket, TicketId, TicketPatch};
