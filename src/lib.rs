//! helpdesk - support ticket tracking for a repair desk
//!
//! This crate provides:
//! - Customer ticket submission with field validation
//! - A fixed status lifecycle (`new`, `in-progress`, `resolved`, `closed`)
//! - Session-gated staff updates with argon2 credential checks
//! - Read-only analytics and a plain-text report over a ticket snapshot
//! - JSON file and in-memory ticket repositories

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::map_unwrap_or)]

//! # Concurrent Safety
//!
//! [`store::TicketStore`] serializes every read-modify-write behind one lock,
//! so concurrent updates of the same ticket apply in some order and never
//! interleave. Reads return owned snapshots. [`auth::SessionGate`] guards its
//! session table the same way.
//!
//! # Example
//!
//! ```rust,ignore
//! use helpdesk::auth::SessionPolicy;
//! use helpdesk::core::{NewTicket, Status, SystemClock, TicketPatch};
//! use helpdesk::desk::HelpDesk;
//! use helpdesk::storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! let desk = HelpDesk::new(MemoryStorage::new(), verifier, Arc::new(SystemClock), SessionPolicy::default());
//! let ticket = desk.submit(&fields)?;
//!
//! let session = desk.login("admin", "admin123")?;
//! desk.update(Some(session.token()), &ticket.id, &TicketPatch::new().status(Status::InProgress))?;
//! ```

pub mod analytics;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod desk;
pub mod error;
pub mod report;
pub mod storage;
pub mod store;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{HelpdeskError, Result};
