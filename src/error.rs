use thiserror::Error;

/// Problems with the administrator supplied block configuration.
///
/// None of these abort a dashboard render: callers turn them into a fallback value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid month-day value {0:?}, expected MM-DD")]
    InvalidMonthDay(String),

    #[error("unknown term mode {0}")]
    UnknownTermMode(i64),

    #[error("term {later} starts on day {later_day}, not after term {earlier} (day {earlier_day})")]
    TermsOutOfOrder {
        earlier: usize,
        earlier_day: u32,
        later: usize,
        later_day: u32,
    },

    #[error("failed to load configuration from {path}: {reason}")]
    Load { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
