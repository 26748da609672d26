//! Read-only ticket analytics
//!
//! [`analyze`] is a pure function of a snapshot. It never touches the store,
//! so callers take the snapshot under the store's read lock and run the
//! analysis afterwards without holding anything.
//!
//! Every "most common" selection goes through [`FrequencyTable`], which
//! breaks ties by first appearance.

mod contact;
mod devices;
mod facts;
mod frequency;
mod temporal;

pub use contact::{ContactAnalysis, PhonePattern, classify_phone, email_domain};
pub use devices::{DeviceAnalysis, DeviceType, classify_device, detect_brand};
pub use facts::{RawTicket, TicketFacts};
pub use frequency::{Counted, FrequencyTable, most_frequent};
pub use temporal::{TimeAnalysis, TimePatterns};

use serde::Serialize;

/// Outcome of analysing a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Analysis {
    /// The snapshot was empty
    NoTickets,
    Report(Box<AnalyticsReport>),
}

impl Analysis {
    pub const NO_TICKETS_MESSAGE: &'static str = "No tickets available for analysis";

    pub fn report(&self) -> Option<&AnalyticsReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::NoTickets => None,
        }
    }
}

/// Aggregate statistics over a non-empty snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub total_tickets: usize,
    pub status_distribution: StatusDistribution,
    pub device_analysis: DeviceAnalysis,
    pub time_analysis: TimeAnalysis,
    pub contact_analysis: ContactAnalysis,
    pub summary: Summary,
}

/// One status with its share of the snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: String,
    pub count: usize,
    /// Percent of all tickets, rounded to one decimal
    pub percentage: f64,
}

/// Observed statuses in first-seen order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusDistribution {
    pub total: usize,
    pub shares: Vec<StatusShare>,
}

impl StatusDistribution {
    /// `None` when there is nothing to take a percentage of
    pub fn from_tickets<T: TicketFacts>(tickets: &[T]) -> Option<Self> {
        if tickets.is_empty() {
            return None;
        }
        let total = tickets.len();
        let table: FrequencyTable<&str> = tickets.iter().map(TicketFacts::status_label).collect();
        let shares = table
            .iter()
            .map(|entry| StatusShare {
                status: entry.value.to_string(),
                count: entry.count,
                percentage: round_one_decimal(entry.count as f64 * 100.0 / total as f64),
            })
            .collect();
        Some(Self { total, shares })
    }

    /// Most frequent status, the earliest seen on a tie
    pub fn most_common(&self) -> Option<&StatusShare> {
        most_frequent(&self.shares, |share| share.count)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Headline insights
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub most_common_status: Option<String>,
    pub most_common_device_type: Option<DeviceType>,
    /// Hour of day in the tickets' recorded offset
    pub peak_hour: Option<u32>,
}

impl Summary {
    /// Peak hour as `HH:00`
    pub fn peak_hour_label(&self) -> Option<String> {
        self.peak_hour.map(|hour| format!("{hour:02}:00"))
    }
}

/// Analyse a snapshot
pub fn analyze<T: TicketFacts>(tickets: &[T]) -> Analysis {
    let Some(status_distribution) = StatusDistribution::from_tickets(tickets) else {
        return Analysis::NoTickets;
    };

    let device_analysis = DeviceAnalysis::from_tickets(tickets);
    let time_analysis = TimeAnalysis::from_tickets(tickets);
    let contact_analysis = ContactAnalysis::from_tickets(tickets);

    let summary = Summary {
        most_common_status: status_distribution
            .most_common()
            .map(|share| share.status.clone()),
        most_common_device_type: device_analysis.most_common_type(),
        peak_hour: time_analysis.peak_hour(),
    };

    tracing::debug!("Analysed {} tickets", tickets.len());

    Analysis::Report(Box::new(AnalyticsReport {
        total_tickets: tickets.len(),
        status_distribution,
        device_analysis,
        time_analysis,
        contact_analysis,
        summary,
    }))
}
