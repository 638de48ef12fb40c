/// Alias for `Result<T, CalendarError>`.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Errors raised around the calendar engine. The date arithmetic itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// A season name did not match any season literal or label.
    #[error("unknown season: \"{0}\" (expected spring, summer, autumn or winter)")]
    UnknownSeason(String),

    /// A date field was outside its calendar range.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Reading or writing the persisted date failed.
    #[error("date store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted date could not be serialized.
    #[error("date store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
