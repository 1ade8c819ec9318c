use thiserror::Error;

use crate::api::{ApiError, ResponseError};

/// Startup configuration problems. All of these are fatal: the process
/// reports them and exits before the poll loop starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variables are not set: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("poll period must be greater than zero")]
    ZeroPeriod,
}

/// Everything that can make one poll cycle fail.
///
/// All variants are recoverable: the supervisor reports the first failure
/// of a streak and retries on the next tick. The messages pass through
/// unchanged so notification text carries the underlying cause.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] ApiError),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_vars_lists_every_name() {
        let err = ConfigError::MissingVars(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        let text = err.to_string();
        assert!(text.contains("PRACTICUM_TOKEN"));
        assert!(text.contains("TELEGRAM_CHAT_ID"));
    }

    #[test]
    fn cycle_error_is_transparent_over_the_cause() {
        let err = CycleError::from(ResponseError::MissingField("homeworks"));
        assert_eq!(
            err.to_string(),
            ResponseError::MissingField("homeworks").to_string()
        );
    }
}
