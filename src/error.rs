use thiserror::Error;

/// Errors raised by the aggregation core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("invalid year range: start {start} is after end {end}")]
    InvalidRange { start: i32, end: i32 },

    #[error("team not found in ranking table: {0}")]
    TeamNotFound(String),

    #[error("team {0} has no matches in the selected results")]
    DivisionByZero(String),

    #[error("invalid gap-fill mode: {0}")]
    InvalidMode(String),
}

pub type StatsResult<T> = Result<T, StatsError>;
