//! Test utilities for helpdesk
//!
//! This module provides common test fixtures and utilities to reduce
//! duplication in test code across the codebase.

#![cfg(test)]

use crate::auth::{CredentialVerifier, SessionGate, SessionPolicy};
use crate::core::{ManualClock, NewTicket, Status, Ticket, TicketBuilder};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Plain-text credential check; hashing is exercised in its own tests
pub struct StaticCredentials {
    pub username: &'static str,
    pub password: &'static str,
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Parse a fixed RFC 3339 timestamp
pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("hardcoded timestamp should always parse")
        .with_timezone(&Utc)
}

/// Clock pinned to 2025-01-01 00:00:00 UTC
pub fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(at("2025-01-01T00:00:00Z")))
}

/// Gate accepting `admin` / `admin123` with the default policy
pub fn test_gate() -> (SessionGate, Arc<ManualClock>) {
    let clock = test_clock();
    let gate = SessionGate::new(
        StaticCredentials {
            username: "admin",
            password: "admin123",
        },
        clock.clone(),
        SessionPolicy::default(),
    );
    (gate, clock)
}

/// A valid customer submission
pub fn sample_submission(name: &str, device: &str) -> NewTicket {
    NewTicket {
        name: name.to_string(),
        phone: "555-444-3333".to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        device_name: device.to_string(),
        description: format!("{device} does not turn on"),
    }
}

/// Create a stored-shape ticket without going through the service
pub fn create_test_ticket(name: &str, device: &str) -> Ticket {
    let fields = sample_submission(name, device);
    TicketBuilder::new()
        .name(fields.name)
        .phone(fields.phone)
        .email(fields.email)
        .device_name(fields.device_name)
        .description(fields.description)
        .build()
}

/// Test data builder for analytics scenarios
pub struct TestDataBuilder {
    tickets: Vec<Ticket>,
}

impl TestDataBuilder {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
        }
    }

    /// Add a ticket with specific properties
    pub fn with_ticket(mut self, status: Status, device: &str, created_at: &str) -> Self {
        let mut ticket = create_test_ticket(&format!("Customer {}", self.tickets.len()), device);
        ticket.status = status;
        ticket.created_at = at(created_at);
        ticket.updated_at = ticket.created_at;
        self.tickets.push(ticket);
        self
    }

    /// Add a ticket with explicit contact details
    pub fn with_contact(mut self, email: &str, phone: &str) -> Self {
        let mut ticket = create_test_ticket(&format!("Customer {}", self.tickets.len()), "Desktop");
        ticket.email = email.to_string();
        ticket.phone = phone.to_string();
        self.tickets.push(ticket);
        self
    }

    /// Build and return the tickets
    pub fn build(self) -> Vec<Ticket> {
        self.tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder() {
        let tickets = TestDataBuilder::new()
            .with_ticket(Status::New, "iPhone 12", "2025-01-06T09:30:00Z")
            .with_contact("bob@example.com", "(555) 123-4567")
            .build();

        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].device_name, "iPhone 12");
        assert_eq!(tickets[1].phone, "(555) 123-4567");
    }
}
