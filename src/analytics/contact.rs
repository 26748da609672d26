use super::facts::TicketFacts;
use super::frequency::{Counted, FrequencyTable};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("valid regex"));

/// Phone number shape by digit count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhonePattern {
    #[serde(rename = "US-10-digit")]
    Us10Digit,
    #[serde(rename = "US-11-digit")]
    Us11Digit,
    Other,
}

impl PhonePattern {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Us10Digit => "US-10-digit",
            Self::Us11Digit => "US-11-digit",
            Self::Other => "Other",
        }
    }
}

/// Classify by the number of digits left after stripping punctuation
pub fn classify_phone(phone: &str) -> PhonePattern {
    match NON_DIGIT.replace_all(phone, "").len() {
        10 => PhonePattern::Us10Digit,
        11 => PhonePattern::Us11Digit,
        _ => PhonePattern::Other,
    }
}

/// Lower-cased text after the first `@`
pub fn email_domain(email: &str) -> Option<String> {
    email
        .split_once('@')
        .map(|(_, domain)| domain.trim().to_lowercase())
        .filter(|domain| !domain.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactAnalysis {
    pub total_emails: usize,
    /// Ten most common domains, ties by first appearance
    pub email_domains: Vec<Counted<String>>,
    pub total_phones: usize,
    pub phone_patterns: Vec<Counted<PhonePattern>>,
}

impl ContactAnalysis {
    pub fn from_tickets<T: TicketFacts>(tickets: &[T]) -> Self {
        let emails: Vec<_> = tickets
            .iter()
            .map(TicketFacts::email)
            .filter(|e| !e.trim().is_empty())
            .collect();
        let phones: Vec<_> = tickets
            .iter()
            .map(TicketFacts::phone)
            .filter(|p| !p.trim().is_empty())
            .collect();

        let domains: FrequencyTable<String> =
            emails.iter().filter_map(|e| email_domain(e)).collect();
        let patterns: FrequencyTable<PhonePattern> =
            phones.iter().map(|p| classify_phone(p)).collect();

        Self {
            total_emails: emails.len(),
            email_domains: domains.most_common(10),
            total_phones: phones.len(),
            phone_patterns: patterns.counts(),
        }
    }
}
