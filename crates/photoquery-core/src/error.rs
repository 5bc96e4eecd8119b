use std::path::PathBuf;

/// Reasons a free-text phrase did not resolve to a calendar date.
///
/// These never leave the date matchers; they are turned into "no suggestion".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhraseError {
    #[error("empty phrase")]
    Empty,
    #[error("phrase longer than {0} characters")]
    TooLong(usize),
    #[error("unrecognized date phrase: {0:?}")]
    Unrecognized(String),
    #[error("no such date: year {year}, month {month}, day {day}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// Errors surfaced to callers of the library (configuration, not search input).
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}
