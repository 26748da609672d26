use super::facts::TicketFacts;
use super::frequency::{Counted, FrequencyTable};
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::Serialize;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// When tickets come in
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TimeAnalysis {
    /// No ticket carried a parsable creation time
    NoValidTimestamps,
    Patterns(TimePatterns),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimePatterns {
    /// Tickets with a usable timestamp
    pub total_analyzed: usize,
    /// Top five hours of day, busiest first, lower hour first on ties
    ///
    /// Hours are read in each timestamp's own offset, so an export stamped
    /// `10:15+09:00` counts toward hour 10.
    pub busiest_hours: Vec<Counted<u32>>,
    /// Observed weekdays, Monday first
    pub busiest_days: Vec<Counted<String>>,
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

impl TimeAnalysis {
    /// Tickets whose timestamp does not parse are skipped
    pub fn from_tickets<T: TicketFacts>(tickets: &[T]) -> Self {
        let timestamps: Vec<_> = tickets.iter().filter_map(|t| t.created_at()).collect();

        let (Some(earliest), Some(latest)) = (
            timestamps.iter().min().map(|dt| dt.with_timezone(&Utc)),
            timestamps.iter().max().map(|dt| dt.with_timezone(&Utc)),
        ) else {
            return Self::NoValidTimestamps;
        };

        let hours: FrequencyTable<u32> = timestamps.iter().map(|dt| dt.hour()).collect();
        let mut busiest_hours = hours.counts();
        busiest_hours.sort_by(|a, b| b.count.cmp(&a.count).then(a.value.cmp(&b.value)));
        busiest_hours.truncate(5);

        let days: FrequencyTable<Weekday> = timestamps.iter().map(|dt| dt.weekday()).collect();
        let busiest_days = WEEK
            .iter()
            .filter(|day| days.get(day) > 0)
            .map(|day| Counted {
                value: day_name(*day).to_string(),
                count: days.get(day),
            })
            .collect();

        Self::Patterns(TimePatterns {
            total_analyzed: timestamps.len(),
            busiest_hours,
            busiest_days,
            earliest,
            latest,
        })
    }

    /// The single busiest hour, if any timestamps were usable
    pub fn peak_hour(&self) -> Option<u32> {
        match self {
            Self::Patterns(patterns) => patterns.busiest_hours.first().map(|e| e.value),
            Self::NoValidTimestamps => None,
        }
    }
}
