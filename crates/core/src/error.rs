use chrono::NaiveDate;

/// Errors raised by the analysis pipeline.
///
/// Every variant carries enough structured context to render a user-facing
/// message (expected vs actual counts). Numeric edge conditions such as zero
/// variance or zero average loss are not errors; they resolve to defined
/// outputs inside the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// Not enough observations for the requested computation.
    #[error("Not enough observations: need at least {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A requested window is longer than the series, so no defined output
    /// point would exist.
    #[error("Window of {window} needs more observations than the {len} available")]
    InvalidWindow { window: usize, len: usize },

    /// A decomposition period too short to define a seasonal cycle.
    #[error("Decomposition period must be at least 2, got {period}")]
    InvalidPeriod { period: usize },
}

/// Errors that can occur while loading or constructing price data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Data not found: {0}")]
    NotFound(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid bar on {date}: {reason}")]
    InvalidBar { date: NaiveDate, reason: String },
    #[error("Bars out of order at {date}: dates must be strictly increasing")]
    OutOfOrder { date: NaiveDate },
}
