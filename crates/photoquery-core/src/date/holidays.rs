use super::{DateSuggestion, LabeledSuggestion};

/// A fixed-date holiday offered as a search suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holiday {
    pub label: &'static str,
    /// Zero-based month
    pub month: u32,
    pub day: u32,
}

impl Holiday {
    pub fn suggestion(&self) -> LabeledSuggestion {
        LabeledSuggestion::new(
            self.label,
            DateSuggestion::ExactDate { day: self.day, month: self.month },
        )
    }
}

pub const HOLIDAYS: &[Holiday] = &[
    Holiday { label: "Christmas", month: 11, day: 25 },
    Holiday { label: "Christmas Eve", month: 11, day: 24 },
    Holiday { label: "New Year", month: 0, day: 1 },
    Holiday { label: "New Year Eve", month: 11, day: 31 },
];

/// Holidays whose label contains `phrase`, ignoring case, in table order.
pub fn match_holidays(phrase: &str) -> Vec<LabeledSuggestion> {
    let needle = phrase.to_lowercase();
    HOLIDAYS
        .iter()
        .filter(|h| h.label.to_lowercase().contains(&needle))
        .map(Holiday::suggestion)
        .collect()
}
