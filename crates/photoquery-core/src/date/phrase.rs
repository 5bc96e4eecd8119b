//! Natural-language date phrase parsing.
//!
//! Understands the phrases people type into a photo search box: "today",
//! "Dec 25th", "25 december 2019", "2019-12-25", "12/25/19", "march 2020",
//! "last friday", "3 days ago", "December 25th, 2019 at 5pm".
//! A bare month name is deliberately not a date; callers anchor it with a
//! day to get a month.
//!
//! Forms not covered here fall through to `fuzzydate`, which reads the
//! local clock rather than the injected one.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use regex::{Captures, Regex};
use tracing::trace;
use unicode_normalization::UnicodeNormalization;

use super::Clock;
use crate::error::PhraseError;

pub const MAX_PHRASE_LEN: usize = 64;

struct PhrasePattern {
    name: &'static str,
    regex: &'static LazyLock<Regex>,
}

static RE_ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<y>\d{4})[-/.](?P<m>\d{1,2})[-/.](?P<d>\d{1,2})$").unwrap());
static RE_US: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<m>\d{1,2})/(?P<d>\d{1,2})(?:/(?P<y>\d{4}|\d{2}))?$").unwrap());
static RE_MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<month>[a-z]+) (?P<d>\d{1,2})(?: (?P<y>\d{4}))?$").unwrap());
static RE_DAY_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<d>\d{1,2}) (?P<month>[a-z]+)(?: (?P<y>\d{4}))?$").unwrap());
static RE_MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<month>[a-z]+) (?P<y>\d{4})$").unwrap());

static PATTERNS: &[PhrasePattern] = &[
    PhrasePattern { name: "iso", regex: &RE_ISO },
    PhrasePattern { name: "us", regex: &RE_US },
    PhrasePattern { name: "month-day", regex: &RE_MONTH_DAY },
    PhrasePattern { name: "day-month", regex: &RE_DAY_MONTH },
    PhrasePattern { name: "month-year", regex: &RE_MONTH_YEAR },
];

static RE_AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<n>\d{1,4}|an?) (?P<unit>day|week|month|year)s? ago$").unwrap()
});
static RE_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^in (?P<n>\d{1,4}|an?) (?P<unit>day|week|month|year)s?$").unwrap()
});
static RE_SHIFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<dir>last|next|this) (?P<unit>day|week|month|year)$").unwrap());
static RE_WEEKDAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(?P<dir>last|next|this) )?(?P<wd>[a-z]+)$").unwrap());

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<n>\d{1,2})(?:st|nd|rd|th)\b").unwrap());
static ABBREV_DOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?P<c>[a-z])\.").unwrap());
/// Trailing time of day: "at 5", "5pm", "at 17:30", "noon".
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?: at \d{1,2}| (?:at )?(?:\d{1,2}(?::\d{2}){0,2} ?(?:am|pm)|\d{1,2}:\d{2}(?::\d{2})?|noon|midnight))$",
    )
    .unwrap()
});

const MONTH_NAMES: &[&str] = &[
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// Words that carry no date information ("the 25th of december").
const FILLER_WORDS: &[&str] = &["of", "the", "on"];

#[derive(Debug, Clone, Copy)]
enum Unit {
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "day" => Some(Unit::Day),
            "week" => Some(Unit::Week),
            "month" => Some(Unit::Month),
            "year" => Some(Unit::Year),
            _ => None,
        }
    }

    /// `date` moved by `n` units, backwards when `back` is set.
    fn shift(self, date: NaiveDate, n: u32, back: bool) -> Option<NaiveDate> {
        match self {
            Unit::Day | Unit::Week => {
                let days = Days::new(u64::from(n) * if matches!(self, Unit::Week) { 7 } else { 1 });
                if back { date.checked_sub_days(days) } else { date.checked_add_days(days) }
            }
            Unit::Month | Unit::Year => {
                let months = Months::new(n.checked_mul(if matches!(self, Unit::Year) { 12 } else { 1 })?);
                if back { date.checked_sub_months(months) } else { date.checked_add_months(months) }
            }
        }
    }
}

/// Parse `phrase` into a calendar date relative to `clock`.
pub fn parse_phrase(phrase: &str, clock: &dyn Clock) -> Result<NaiveDate, PhraseError> {
    if phrase.trim().chars().count() > MAX_PHRASE_LEN {
        return Err(PhraseError::TooLong(MAX_PHRASE_LEN));
    }
    let normalized = normalize(phrase);
    if normalized.is_empty() {
        return Err(PhraseError::Empty);
    }

    if let Some(date) = parse_relative(&normalized, clock.today()) {
        trace!(phrase = %normalized, %date, "relative date");
        return Ok(date);
    }

    for pat in PATTERNS {
        if let Some(caps) = pat.regex.captures(&normalized) {
            trace!(pattern = pat.name, phrase = %normalized, "date pattern matched");
            return resolve(&caps, clock);
        }
    }

    if let Some(date) = parse_fuzzy(&normalized) {
        trace!(phrase = %normalized, %date, "parsed with fuzzydate");
        return Ok(date);
    }

    Err(PhraseError::Unrecognized(normalized))
}

/// NFC, lowercase, no punctuation noise, no ordinal suffixes, filler words
/// or trailing time of day.
fn normalize(phrase: &str) -> String {
    let lowered: String = phrase.nfc().collect::<String>().to_lowercase().replace(',', " ");
    let undotted = ABBREV_DOT_RE.replace_all(&lowered, "$c ");
    let plain = ORDINAL_RE.replace_all(&undotted, "$n");
    let words = plain
        .split_whitespace()
        .filter(|w| !FILLER_WORDS.contains(w))
        .collect::<Vec<_>>()
        .join(" ");
    TIME_RE.replace(&words, "").into_owned()
}

/// Phrases relative to `today`: "yesterday", "friday", "last monday",
/// "next week", "3 days ago", "in 2 weeks".
fn parse_relative(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    match phrase {
        "today" => return Some(today),
        "yesterday" => return today.pred_opt(),
        "tomorrow" => return today.succ_opt(),
        _ => {}
    }

    if let Some(caps) = RE_AGO.captures(phrase).or_else(|| RE_IN.captures(phrase)) {
        let n = match &caps["n"] {
            "a" | "an" => 1,
            n => n.parse().ok()?,
        };
        let back = phrase.ends_with(" ago");
        return Unit::from_name(&caps["unit"])?.shift(today, n, back);
    }

    if let Some(caps) = RE_SHIFT.captures(phrase) {
        let unit = Unit::from_name(&caps["unit"])?;
        return match &caps["dir"] {
            "last" => unit.shift(today, 1, true),
            "next" => unit.shift(today, 1, false),
            _ => Some(today),
        };
    }

    let caps = RE_WEEKDAY.captures(phrase)?;
    let weekday: Weekday = caps["wd"].parse().ok()?;
    Some(weekday_near(today, weekday, caps.name("dir").map(|d| d.as_str())))
}

/// Resolve a weekday against `today`. "last" is strictly before today, "next"
/// strictly after, "this" within the current Monday-based week, and a bare
/// weekday is the closest occurrence.
fn weekday_near(today: NaiveDate, target: Weekday, dir: Option<&str>) -> NaiveDate {
    let current = i64::from(today.weekday().num_days_from_monday());
    let wanted = i64::from(target.num_days_from_monday());
    let offset = match dir {
        Some("last") => -match (current - wanted).rem_euclid(7) {
            0 => 7,
            d => d,
        },
        Some("next") => match (wanted - current).rem_euclid(7) {
            0 => 7,
            d => d,
        },
        Some(_) => wanted - current,
        None => match wanted - current {
            d if d > 3 => d - 7,
            d if d < -3 => d + 7,
            d => d,
        },
    };
    let days = Days::new(offset.unsigned_abs());
    let shifted = if offset < 0 { today.checked_sub_days(days) } else { today.checked_add_days(days) };
    shifted.unwrap_or(today)
}

/// Last resort for phrasings the tables above miss. A bare month name is
/// left alone so that it stays a month rather than becoming a date.
fn parse_fuzzy(phrase: &str) -> Option<NaiveDate> {
    if !phrase.bytes().any(|b| b.is_ascii_alphabetic()) || month_from_name(phrase).is_some() {
        return None;
    }
    match fuzzydate::parse(phrase) {
        Ok(datetime) => Some(datetime.date()),
        Err(_) => None,
    }
}

/// One-based month number for a full or abbreviated English month name.
fn month_from_name(name: &str) -> Option<u32> {
    if name == "sept" {
        return Some(9);
    }
    MONTH_NAMES
        .iter()
        .position(|full| *full == name || (name.len() == 3 && full.starts_with(name)))
        .map(|i| i as u32 + 1)
}

fn capture<T: FromStr>(caps: &Captures, name: &str) -> Option<T> {
    caps.name(name)?.as_str().parse().ok()
}

fn resolve(caps: &Captures, clock: &dyn Clock) -> Result<NaiveDate, PhraseError> {
    let unrecognized = || PhraseError::Unrecognized(caps[0].to_string());

    let month = match caps.name("month") {
        Some(name) => month_from_name(name.as_str()).ok_or_else(unrecognized)?,
        None => capture(caps, "m").ok_or_else(unrecognized)?,
    };
    let day = match caps.name("d") {
        Some(_) => capture(caps, "d").ok_or_else(unrecognized)?,
        None => 1,
    };
    let current_year = clock.current_year();
    let year = match caps.name("y") {
        Some(y) if y.as_str().len() == 2 => {
            let yy: i32 = capture(caps, "y").ok_or_else(unrecognized)?;
            let century = current_year - current_year.rem_euclid(100);
            Some(if century + yy <= current_year { century + yy } else { century - 100 + yy })
        }
        Some(_) => Some(capture(caps, "y").ok_or_else(unrecognized)?),
        None => None,
    };

    match year {
        Some(year) => NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(PhraseError::InvalidDate { year, month, day }),
        // Implied year: walk back until the day exists (Feb 29).
        None => (0..8)
            .find_map(|back| NaiveDate::from_ymd_opt(current_year - back, month, day))
            .ok_or(PhraseError::InvalidDate { year: current_year, month, day }),
    }
}
