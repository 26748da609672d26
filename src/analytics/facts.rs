//! What the analytics pipeline needs to know about a ticket

use crate::core::Ticket;
use crate::error::{HelpdeskError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;

/// Read-only view of the ticket fields analytics aggregate over
///
/// Implemented by stored [`Ticket`]s and by loosely typed [`RawTicket`]
/// records read from exports, which may carry unknown statuses or
/// unparsable timestamps.
pub trait TicketFacts {
    fn status_label(&self) -> &str;
    fn device_name(&self) -> &str;
    fn email(&self) -> &str;
    fn phone(&self) -> &str;
    /// Creation time in the offset it was recorded with, `None` when it
    /// cannot be parsed
    fn created_at(&self) -> Option<DateTime<FixedOffset>>;
}

impl TicketFacts for Ticket {
    fn status_label(&self) -> &str {
        self.status.as_str()
    }

    fn device_name(&self) -> &str {
        &self.device_name
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn phone(&self) -> &str {
        &self.phone
    }

    fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        Some(self.created_at.fixed_offset())
    }
}

/// Ticket record as found in an exported JSON file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTicket {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExport {
    List(Vec<RawTicket>),
    Envelope { data: Vec<RawTicket> },
}

impl RawTicket {
    /// Parse a bare JSON array or an API style `{ "data": [...] }` envelope
    pub fn parse_export(json: &str) -> Result<Vec<Self>> {
        let export: RawExport = serde_json::from_str(json).map_err(|e| {
            HelpdeskError::custom(format!("Failed to parse ticket export: {e}"))
        })?;
        Ok(match export {
            RawExport::List(tickets) | RawExport::Envelope { data: tickets } => tickets,
        })
    }
}

/// RFC 3339 keeping its offset, then a zone-less ISO form read as UTC
fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

impl TicketFacts for RawTicket {
    fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }

    fn device_name(&self) -> &str {
        self.device_name.as_deref().unwrap_or_default()
    }

    fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or_default()
    }

    fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}
