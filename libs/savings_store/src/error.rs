use thiserror::Error;

/// Rejected caller input. Surfaced to the caller, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid start_date format")]
    InvalidStartDate,

    #[error("invalid end_date format")]
    InvalidEndDate,

    #[error("start_date must be before or equal to end_date")]
    StartAfterEnd,

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// A source row that parsed as CSV but does not describe a valid record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("invalid {field} '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("{field} must be a finite number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Startup data load failure. The store keeps its previous contents.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {source_name}: {error}")]
    Source {
        source_name: &'static str,
        #[source]
        error: csv_client::CsvDataReaderError,
    },

    #[error("data load task failed: {0}")]
    Task(String),
}
