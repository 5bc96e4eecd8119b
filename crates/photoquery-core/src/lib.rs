pub mod date;
pub mod error;
pub mod media;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use date::holidays::{match_holidays, Holiday, HOLIDAYS};
pub use date::suggest::{match_year, parse_free_text_date, suggest, MIN_YEAR};
pub use date::{Clock, DateSuggestion, FixedClock, LabeledSuggestion, SystemClock};
pub use error::{PhraseError, QueryError};
pub use media::{classify, has_partial_support, is_heic_family, needs_conversion, MediaKind};

fn enabled() -> bool {
    true
}

/// Which date matchers run for a search phrase, and an optional pinned "today".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default = "enabled")]
    pub dates: bool,
    #[serde(default = "enabled")]
    pub holidays: bool,
    #[serde(default = "enabled")]
    pub years: bool,
    /// Pin the clock (YYYY-MM-DD); the local date is used when absent
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { dates: true, holidays: true, years: true, today: None }
    }
}

impl QueryOptions {
    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, QueryError> {
        let bytes = fs::read(path).map_err(|source| QueryError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_slice(&bytes).map_err(|source| QueryError::Config { path: path.to_path_buf(), source })
    }

    /// Pin "today" from a `YYYY-MM-DD` string.
    pub fn with_today(mut self, today: &str) -> Result<Self, QueryError> {
        let date = NaiveDate::parse_from_str(today, "%Y-%m-%d")
            .map_err(|_| QueryError::InvalidDate(today.to_string()))?;
        self.today = Some(date);
        Ok(self)
    }

    /// The clock these options call for.
    pub fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"holidays": false}}"#).unwrap();

        let opts = QueryOptions::load(file.path()).unwrap();
        assert!(opts.dates);
        assert!(!opts.holidays);
        assert!(opts.years);
        assert_eq!(opts.today, None);
    }

    #[test]
    fn test_load_pinned_today() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"today": "2001-02-03"}}"#).unwrap();

        let opts = QueryOptions::load(file.path()).unwrap();
        assert_eq!(opts.clock().current_year(), 2001);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(QueryOptions::load(&missing), Err(QueryError::Io { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{not json").unwrap();
        assert!(matches!(QueryOptions::load(&bad), Err(QueryError::Config { .. })));
    }

    #[test]
    fn test_with_today() {
        let opts = QueryOptions::default().with_today("2020-12-31").unwrap();
        assert_eq!(opts.today, NaiveDate::from_ymd_opt(2020, 12, 31));
        assert!(matches!(
            QueryOptions::default().with_today("31/12/2020"),
            Err(QueryError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_pinned_clock_drives_suggest() {
        let opts = QueryOptions::default().with_today("2000-06-01").unwrap();
        let clock = opts.clock();
        assert!(suggest("2001", &opts, clock.as_ref()).is_empty());
        assert_eq!(suggest("2000", &opts, clock.as_ref()).len(), 1);
    }
}
