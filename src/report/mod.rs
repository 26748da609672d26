//! Plain-text rendering of an [`Analysis`]
//!
//! Rendering is pure: the generation time is passed in, so the same analysis
//! and timestamp always produce the same lines.

use crate::analytics::{Analysis, AnalyticsReport};
use chrono::{DateTime, Utc};

const RULE_WIDTH: usize = 50;

/// Render an analysis into ordered report lines
pub fn render(analysis: &Analysis, generated_at: DateTime<Utc>) -> Vec<String> {
    match analysis {
        Analysis::NoTickets => vec![format!(
            "Report generation failed: {}",
            Analysis::NO_TICKETS_MESSAGE
        )],
        Analysis::Report(report) => render_report(report, generated_at),
    }
}

/// Render an analysis as a single newline-joined string
pub fn render_text(analysis: &Analysis, generated_at: DateTime<Utc>) -> String {
    render(analysis, generated_at).join("\n")
}

fn render_report(report: &AnalyticsReport, generated_at: DateTime<Utc>) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "TICKET SYSTEM ANALYSIS REPORT".to_string(),
        rule,
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        String::new(),
        "OVERVIEW".to_string(),
        format!("Total Tickets: {}", report.total_tickets),
        String::new(),
        "STATUS DISTRIBUTION".to_string(),
    ];

    lines.extend(report.status_distribution.shares.iter().map(|share| {
        format!(
            "  {}: {} ({:.1}%)",
            title_case(&share.status),
            share.count,
            share.percentage
        )
    }));

    lines.push(String::new());
    lines.push("DEVICE ANALYSIS".to_string());
    lines.extend(
        report
            .device_analysis
            .device_types
            .iter()
            .map(|entry| format!("  {}: {}", entry.value, entry.count)),
    );

    let summary = &report.summary;
    lines.extend([
        String::new(),
        "KEY INSIGHTS".to_string(),
        format!(
            "Most common status: {}",
            summary.most_common_status.as_deref().unwrap_or("N/A")
        ),
        format!(
            "Most common device: {}",
            summary
                .most_common_device_type
                .map_or_else(|| "N/A".to_string(), |t| t.to_string())
        ),
        format!(
            "Peak activity hour: {}",
            summary.peak_hour_label().unwrap_or_else(|| "N/A".to_string())
        ),
    ]);

    lines
}

/// Upper-case the first letter of every hyphen or space separated word
fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut at_word_start = true;
    for c in label.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}
