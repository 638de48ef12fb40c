/// Errors raised while importing, editing or storing encounters.
#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    /// The import text is not JSON at all.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The import document is not a JSON object.
    #[error("encounter JSON must be an object")]
    NotAnObject,

    /// The import document has no `creatures` array.
    #[error("invalid encounter: \"creatures\" must be an array")]
    CreaturesNotArray,

    /// No creature with the given id exists in the encounter.
    #[error("creature not found: {0}")]
    CreatureNotFound(i64),

    /// No saved encounter with the given id exists.
    #[error("saved encounter not found: {0}")]
    EncounterNotFound(String),

    /// The store file exists but is not a JSON list, so it is left untouched.
    #[error("encounter store {0} is not a JSON list; refusing to overwrite it")]
    CorruptStore(String),

    /// Reading or writing the encounter store failed.
    #[error("encounter store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing an encounter failed.
    #[error("encounter JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for encounter operations.
pub type EncounterResult<T> = Result<T, EncounterError>;
