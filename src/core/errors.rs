/// All domain errors for worklog.
///
/// "Entry not found" is deliberately absent: update and delete report a
/// missing id as a regular result, see `LogService`.
#[derive(Debug, thiserror::Error)]
pub enum WorklogError {
    #[error(
        "Invalid date: '{value}'\n\n  \
         Dates must use the YYYY-MM-DD form, e.g. 2025-11-01."
    )]
    InvalidDate { value: String },

    #[error("Invalid limit: {value}. The limit must be at least 1.")]
    InvalidLimit { value: i64 },

    #[error(
        "Invalid line range: start={start:?}, end={end}\n\n  \
         A line end requires a line start, and must not be smaller than it."
    )]
    InvalidLineRange { start: Option<i64>, end: i64 },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Log content must not be empty")]
    EmptyContent,

    #[error("Category must not be empty")]
    EmptyCategory,

    #[error(
        "Invalid tag: '{tag}'\n\n  \
         Tags must be non-blank and must not contain commas."
    )]
    InvalidTag { tag: String },

    #[error(
        "Nothing to update for log #{id}\n\n  \
         Pass at least one of --content, --category, --tags or a context option."
    )]
    EmptyUpdate { id: i64 },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "Storage error: {0}\n\n  \
         Check that the database file is readable and writable.\n  \
         Run 'worklog config show' to see which database is in use."
    )]
    Storage(#[from] rusqlite::Error),

    #[error("Stored log #{id} is unreadable: {detail}")]
    CorruptRow { id: i64, detail: String },

    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WorklogError>;
