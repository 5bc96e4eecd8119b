pub mod holidays;
pub mod phrase;
pub mod suggest;

use std::fmt;

use chrono::{Datelike, Local, Month, NaiveDate};
use serde::Serialize;

/// A structured date candidate offered while the user types a search query.
///
/// Months are zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateSuggestion {
    ExactDate { day: u32, month: u32 },
    MonthOnly { month: u32 },
    YearOnly { year: i32 },
}

impl DateSuggestion {
    /// Exact date and month-only suggestions for the same parsed date.
    pub fn from_date(date: NaiveDate) -> [Self; 2] {
        [
            DateSuggestion::ExactDate { day: date.day(), month: date.month0() },
            DateSuggestion::MonthOnly { month: date.month0() },
        ]
    }

    /// Human readable label, e.g. "December 25", "December" or "1999".
    pub fn label(&self) -> String {
        match *self {
            DateSuggestion::ExactDate { day, month } => format!("{} {}", month_name(month), day),
            DateSuggestion::MonthOnly { month } => month_name(month).to_string(),
            DateSuggestion::YearOnly { year } => year.to_string(),
        }
    }
}

impl fmt::Display for DateSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DateSuggestion::ExactDate { day, month } => write!(f, "date={} month={}", day, month),
            DateSuggestion::MonthOnly { month } => write!(f, "month={}", month),
            DateSuggestion::YearOnly { year } => write!(f, "year={}", year),
        }
    }
}

/// A suggestion as shown in the search dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledSuggestion {
    pub label: String,
    pub value: DateSuggestion,
}

impl LabeledSuggestion {
    pub fn new(label: impl Into<String>, value: DateSuggestion) -> Self {
        Self { label: label.into(), value }
    }
}

impl From<DateSuggestion> for LabeledSuggestion {
    fn from(value: DateSuggestion) -> Self {
        Self { label: value.label(), value }
    }
}

fn month_name(month0: u32) -> &'static str {
    month0
        .checked_add(1)
        .and_then(|m| u8::try_from(m).ok())
        .and_then(|m| Month::try_from(m).ok())
        .map_or("?", |m| m.name())
}

/// Source of "now" for relative phrases and the year suggestion ceiling.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
