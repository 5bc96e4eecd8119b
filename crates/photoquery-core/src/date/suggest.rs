use tracing::debug;

use super::holidays::match_holidays;
use super::phrase::parse_phrase;
use super::{Clock, DateSuggestion, LabeledSuggestion};
use crate::QueryOptions;

/// Earliest year offered as a suggestion.
pub const MIN_YEAR: i32 = 1970;

/// Date suggestions for free text.
///
/// A phrase that resolves to a full date yields both an exact date and its
/// month. A phrase that only resolves once a day is appended ("December",
/// "dec") yields just the month. Anything else yields nothing.
pub fn parse_free_text_date(phrase: &str, clock: &dyn Clock) -> Vec<DateSuggestion> {
    match parse_phrase(phrase, clock) {
        Ok(date) => {
            debug!(phrase, %date, "parsed free text date");
            return DateSuggestion::from_date(date).to_vec();
        }
        Err(e) => debug!(phrase, error = %e, "free text is not a full date"),
    }

    match parse_phrase(&format!("{} 1", phrase), clock) {
        Ok(date) => {
            debug!(phrase, %date, "parsed free text as month");
            vec![DateSuggestion::from_date(date)[1]]
        }
        Err(e) => {
            debug!(phrase, error = %e, "free text is not a month");
            Vec::new()
        }
    }
}

/// Year suggestion for a four character phrase within [`MIN_YEAR`, current year].
pub fn match_year(phrase: &str, clock: &dyn Clock) -> Vec<DateSuggestion> {
    if phrase.chars().count() != 4 {
        return Vec::new();
    }
    let Ok(year) = phrase.parse::<i32>() else {
        debug!(phrase, "not a year");
        return Vec::new();
    };
    if (MIN_YEAR..=clock.current_year()).contains(&year) {
        vec![DateSuggestion::YearOnly { year }]
    } else {
        Vec::new()
    }
}

/// All date suggestions for what the user has typed, in display order:
/// parsed dates, then holidays, then years.
pub fn suggest(phrase: &str, options: &QueryOptions, clock: &dyn Clock) -> Vec<LabeledSuggestion> {
    let mut out = Vec::new();
    if phrase.trim().is_empty() {
        return out;
    }

    if options.dates {
        out.extend(parse_free_text_date(phrase, clock).into_iter().map(LabeledSuggestion::from));
    }
    if options.holidays {
        out.extend(match_holidays(phrase));
    }
    if options.years {
        out.extend(
            match_year(phrase, clock)
                .into_iter()
                .map(|value| LabeledSuggestion::new(phrase, value)),
        );
    }

    debug!(phrase, count = out.len(), "date suggestions");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap())
    }

    #[test]
    fn test_full_date_gives_exact_and_month() {
        assert_eq!(
            parse_free_text_date("December 25, 2019", &clock()),
            [
                DateSuggestion::ExactDate { day: 25, month: 11 },
                DateSuggestion::MonthOnly { month: 11 },
            ]
        );
        assert_eq!(
            parse_free_text_date("jan 3 2001", &clock()),
            [
                DateSuggestion::ExactDate { day: 3, month: 0 },
                DateSuggestion::MonthOnly { month: 0 },
            ]
        );
    }

    #[test]
    fn test_relative_and_timed_phrases() {
        let c = clock();
        assert_eq!(
            parse_free_text_date("friday", &c),
            [
                DateSuggestion::ExactDate { day: 16, month: 5 },
                DateSuggestion::MonthOnly { month: 5 },
            ]
        );
        assert_eq!(
            parse_free_text_date("3 days ago", &c),
            [
                DateSuggestion::ExactDate { day: 12, month: 5 },
                DateSuggestion::MonthOnly { month: 5 },
            ]
        );
        assert_eq!(
            parse_free_text_date("December 25th, 2019 at 5pm", &c),
            [
                DateSuggestion::ExactDate { day: 25, month: 11 },
                DateSuggestion::MonthOnly { month: 11 },
            ]
        );
    }

    #[test]
    fn test_padded_phrase() {
        let padded = format!("{}december 25{}", " ".repeat(30), " ".repeat(30));
        assert_eq!(parse_free_text_date(&padded, &clock()).len(), 2);
    }

    #[test]
    fn test_month_only() {
        assert_eq!(parse_free_text_date("December", &clock()), [DateSuggestion::MonthOnly { month: 11 }]);
        assert_eq!(parse_free_text_date("feb", &clock()), [DateSuggestion::MonthOnly { month: 1 }]);
    }

    #[test]
    fn test_nonsense_gives_nothing() {
        let c = clock();
        assert!(parse_free_text_date("zzzzz", &c).is_empty());
        assert!(parse_free_text_date("", &c).is_empty());
        assert!(parse_free_text_date("🎄🎄🎄", &c).is_empty());
        assert!(parse_free_text_date(&"december ".repeat(100), &c).is_empty());
    }

    #[test]
    fn test_year() {
        let c = clock();
        assert_eq!(match_year("1999", &c), [DateSuggestion::YearOnly { year: 1999 }]);
        assert_eq!(match_year("1970", &c), [DateSuggestion::YearOnly { year: 1970 }]);
        assert_eq!(match_year("2023", &c), [DateSuggestion::YearOnly { year: 2023 }]);
        assert!(match_year("2024", &c).is_empty());
        assert!(match_year("1969", &c).is_empty());
        assert!(match_year("202x", &c).is_empty());
        assert!(match_year("20", &c).is_empty());
        assert!(match_year("01999", &c).is_empty());
    }

    #[test]
    fn test_year_ceiling_follows_clock() {
        let later = FixedClock(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        assert_eq!(match_year("2027", &later), [DateSuggestion::YearOnly { year: 2027 }]);
        assert!(match_year("2027", &clock()).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let c = clock();
        for phrase in ["dec 25", "December", "2001", "christmas", "zzz"] {
            assert_eq!(parse_free_text_date(phrase, &c), parse_free_text_date(phrase, &c));
            assert_eq!(match_year(phrase, &c), match_year(phrase, &c));
        }
    }

    #[test]
    fn test_suggest_merges_matchers() {
        let c = clock();
        let opts = QueryOptions::default();

        let labels: Vec<_> = suggest("christmas", &opts, &c).into_iter().map(|s| s.label).collect();
        assert_eq!(labels, ["Christmas", "Christmas Eve"]);

        let year = suggest("2020", &opts, &c);
        assert_eq!(year, [LabeledSuggestion::new("2020", DateSuggestion::YearOnly { year: 2020 })]);

        let dec = suggest("dec 25", &opts, &c);
        assert_eq!(dec.len(), 2);
        assert_eq!(dec[0].label, "December 25");
        assert_eq!(dec[1].label, "December");

        assert!(suggest("", &opts, &c).is_empty());
        assert!(suggest("  ", &opts, &c).is_empty());
    }

    #[test]
    fn test_suggest_respects_options() {
        let c = clock();
        let opts = QueryOptions { holidays: false, ..QueryOptions::default() };
        assert!(suggest("christmas", &opts, &c).is_empty());

        let opts = QueryOptions { dates: false, ..QueryOptions::default() };
        assert!(suggest("dec 25", &opts, &c).is_empty());
    }
}
