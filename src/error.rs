//! Error types for helpdesk
//!
//! Every fallible operation returns [`Result`]. Callers that sit in front of a
//! transport (HTTP, CLI) use [`HelpdeskError::kind`] to map a failure onto
//! their own status signal without matching every variant.

use crate::core::Status;
use std::fmt;
use thiserror::Error;

/// Result type alias for helpdesk operations
pub type Result<T> = std::result::Result<T, HelpdeskError>;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field (wire name, e.g. `deviceName`)
    pub field: String,
    /// Human readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outward-facing error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InvalidTransition,
    Unauthenticated,
    InvalidCredentials,
    Internal,
}

/// Main error type for helpdesk
#[derive(Error, Debug)]
pub enum HelpdeskError {
    #[error("Validation failed: {}", format_fields(.fields))]
    Validation { fields: Vec<FieldError> },

    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: Status, to: Status },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Custom(String),
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl HelpdeskError {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a validation error for a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            fields: vec![FieldError::new(field, message)],
        }
    }

    /// Classify the error for transport mapping
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::TicketNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::InvalidCredentials => ErrorKind::InvalidCredentials,
            Self::Io(_)
            | Self::Serialization(_)
            | Self::Config(_)
            | Self::PasswordHash(_)
            | Self::Prompt(_)
            | Self::Custom(_) => ErrorKind::Internal,
        }
    }

    /// Offending fields of a validation error, empty for every other kind
    pub fn fields(&self) -> &[FieldError] {
        match self {
            Self::Validation { fields } => fields,
            _ => &[],
        }
    }

    /// Check if the caller can fix this error by changing its input
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation
                | ErrorKind::NotFound
                | ErrorKind::InvalidTransition
                | ErrorKind::Unauthenticated
                | ErrorKind::InvalidCredentials
        )
    }

    /// Get a user-friendly hint for the error
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { fields } => {
                let lines = fields
                    .iter()
                    .map(|f| format!("  - {f}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("Please correct the following fields:\n{lines}")
            },
            Self::TicketNotFound { id } => {
                format!("Ticket '{id}' does not exist. Run 'helpdesk list' to see all tickets.")
            },
            Self::InvalidTransition { from, to } => {
                let allowed = from
                    .allowed_transitions()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>();
                if allowed.is_empty() {
                    format!("A {from} ticket cannot move to {to}; {from} is final.")
                } else {
                    format!(
                        "A {from} ticket cannot move to {to}. Allowed next statuses: {}",
                        allowed.join(", ")
                    )
                }
            },
            Self::Unauthenticated => "Please log in to perform this operation.".to_string(),
            Self::InvalidCredentials => "Invalid username or password.".to_string(),
            _ => self.to_string(),
        }
    }
}
