//! Device classification
//!
//! Rules are checked top to bottom and the first keyword hit decides the
//! type, so phone keywords win over laptop brand keywords for the same name.

use super::facts::TicketFacts;
use super::frequency::{Counted, FrequencyTable, most_frequent};
use serde::Serialize;
use std::fmt;

/// Coarse device family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceType {
    #[serde(rename = "iPhone")]
    IPhone,
    Android,
    Laptop,
    Desktop,
    #[serde(rename = "unclassified")]
    Unclassified,
}

impl DeviceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IPhone => "iPhone",
            Self::Android => "Android",
            Self::Laptop => "Laptop",
            Self::Desktop => "Desktop",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TYPE_RULES: [(DeviceType, &[&str]); 4] = [
    (DeviceType::IPhone, &["iphone", "ios"]),
    (DeviceType::Android, &["android", "samsung", "galaxy"]),
    (DeviceType::Laptop, &["laptop", "dell", "hp", "lenovo", "macbook"]),
    (DeviceType::Desktop, &["desktop", "pc"]),
];

const LAPTOP_BRANDS: [(&str, &str); 4] = [
    ("dell", "Dell"),
    ("hp", "HP"),
    ("lenovo", "Lenovo"),
    ("macbook", "Apple"),
];

/// Classify a device name; matching is case-insensitive
pub fn classify_device(device_name: &str) -> DeviceType {
    let name = device_name.to_lowercase();
    TYPE_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map_or(DeviceType::Unclassified, |(device_type, _)| *device_type)
}

/// Best-effort manufacturer for a device name
pub fn detect_brand(device_name: &str) -> Option<&'static str> {
    let name = device_name.to_lowercase();
    match classify_device(&name) {
        DeviceType::IPhone => Some("Apple"),
        DeviceType::Android => name.contains("samsung").then_some("Samsung"),
        DeviceType::Laptop => LAPTOP_BRANDS
            .iter()
            .find(|(keyword, _)| name.contains(keyword))
            .map(|(_, brand)| *brand),
        DeviceType::Desktop | DeviceType::Unclassified => None,
    }
}

/// Device breakdown of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceAnalysis {
    /// Tickets that named a device at all
    pub total_devices: usize,
    /// Per type, first-seen order
    pub device_types: Vec<Counted<DeviceType>>,
    pub brands: Vec<Counted<String>>,
    /// Five most frequent lower-cased device names
    pub most_common_devices: Vec<Counted<String>>,
}

impl DeviceAnalysis {
    pub fn from_tickets<T: TicketFacts>(tickets: &[T]) -> Self {
        let mut types = FrequencyTable::new();
        let mut brands = FrequencyTable::new();
        let mut names = FrequencyTable::new();

        for name in tickets
            .iter()
            .map(|t| t.device_name().trim().to_lowercase())
            .filter(|name| !name.is_empty())
        {
            types.record(classify_device(&name));
            if let Some(brand) = detect_brand(&name) {
                brands.record(brand.to_string());
            }
            names.record(name);
        }

        Self {
            total_devices: names.total(),
            device_types: types.counts(),
            brands: brands.counts(),
            most_common_devices: names.most_common(5),
        }
    }

    /// Most frequent classified type, ignoring unclassified devices
    pub fn most_common_type(&self) -> Option<DeviceType> {
        let classified = self
            .device_types
            .iter()
            .filter(|e| e.value != DeviceType::Unclassified);
        most_frequent(classified, |e| e.count).map(|e| e.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_ticket;

    #[test]
    fn test_classification_rules() {
        assert_eq!(classify_device("iPhone 12"), DeviceType::IPhone);
        assert_eq!(classify_device("iPad iOS 17"), DeviceType::IPhone);
        assert_eq!(classify_device("Samsung Galaxy S21"), DeviceType::Android);
        assert_eq!(classify_device("Pixel 7 (Android 14)"), DeviceType::Android);
        assert_eq!(classify_device("MacBook Pro 2023"), DeviceType::Laptop);
        assert_eq!(classify_device("HP Pavilion"), DeviceType::Laptop);
        assert_eq!(classify_device("Gaming Desktop"), DeviceType::Desktop);
        assert_eq!(classify_device("Custom PC"), DeviceType::Desktop);
        assert_eq!(classify_device("Nintendo Switch"), DeviceType::Unclassified);
    }

    #[test]
    fn test_rule_order_decides_overlaps() {
        // Matches both the Android and the Laptop keyword lists
        assert_eq!(classify_device("Samsung laptop"), DeviceType::Android);
        // Matches both the iPhone and the Desktop keyword lists
        assert_eq!(classify_device("iPhone synced to PC"), DeviceType::IPhone);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for name in ["Dell Inspiron", "galaxy tab", "Lenovo desktop pc", "???"] {
            let first = classify_device(name);
            for _ in 0..10 {
                assert_eq!(classify_device(name), first);
            }
        }
    }

    #[test]
    fn test_brands() {
        assert_eq!(detect_brand("iPhone 14"), Some("Apple"));
        assert_eq!(detect_brand("Samsung Galaxy"), Some("Samsung"));
        assert_eq!(detect_brand("Galaxy Tab"), None);
        assert_eq!(detect_brand("Dell XPS laptop"), Some("Dell"));
        assert_eq!(detect_brand("MacBook Air"), Some("Apple"));
        assert_eq!(detect_brand("Desktop"), None);
    }

    #[test]
    fn test_device_analysis() {
        let tickets: Vec<_> = [
            "iPhone 12",
            "Dell XPS",
            "iphone 12",
            "Toaster",
            "",
            "Dell XPS",
            "Galaxy S21",
            "Samsung Galaxy S21",
        ]
        .iter()
        .map(|d| create_test_ticket("Alice", d))
        .collect();

        let analysis = DeviceAnalysis::from_tickets(&tickets);
        assert_eq!(analysis.total_devices, 7);

        let types: Vec<_> = analysis
            .device_types
            .iter()
            .map(|e| (e.value, e.count))
            .collect();
        assert_eq!(
            types,
            vec![
                (DeviceType::IPhone, 2),
                (DeviceType::Laptop, 2),
                (DeviceType::Unclassified, 1),
                (DeviceType::Android, 2),
            ]
        );
        assert_eq!(analysis.most_common_type(), Some(DeviceType::IPhone));

        let top: Vec<_> = analysis
            .most_common_devices
            .iter()
            .map(|e| (e.value.as_str(), e.count))
            .collect();
        assert_eq!(
            top,
            vec![
                ("iphone 12", 2),
                ("dell xps", 2),
                ("toaster", 1),
                ("galaxy s21", 1),
                ("samsung galaxy s21", 1),
            ]
        );
    }

    #[test]
    fn test_unclassified_never_wins_summary() {
        let tickets: Vec<_> = ["Toaster", "Kettle", "Dell XPS"]
            .iter()
            .map(|d| create_test_ticket("Alice", d))
            .collect();
        let analysis = DeviceAnalysis::from_tickets(&tickets);
        assert_eq!(analysis.most_common_type(), Some(DeviceType::Laptop));

        let only_unknown = vec![create_test_ticket("Alice", "Toaster")];
        assert_eq!(
            DeviceAnalysis::from_tickets(&only_unknown).most_common_type(),
            None
        );
    }
}
