//! Bot configuration: required secrets from the environment, optional
//! tunables from `domashka.toml`.
//!
//! The three credentials are environment-only, never written to disk.
//! The file may override the endpoint URL and poll period; anything not
//! present falls back to the defaults. Loading fails before the poll loop
//! starts if any required value is absent.

use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::api::client::DEFAULT_ENDPOINT;
use crate::error::ConfigError;

/// Fixed wait between poll cycles. Deliberately a flat period, not an
/// exponential backoff: the error-notification damping in the supervisor
/// keeps a long outage quiet without stretching the recovery latency.
pub const DEFAULT_POLL_PERIOD_SECS: u64 = 600;

const CONFIG_FILE: &str = "domashka.toml";

const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Fully resolved runtime configuration, constructed once at startup and
/// passed by reference from `main`. No module-level globals.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// OAuth token for the status API.
    pub practicum_token: String,
    /// Telegram bot token.
    pub telegram_token: String,
    /// Destination chat identifier.
    pub chat_id: String,
    /// Status API endpoint URL.
    pub endpoint: String,
    /// Seconds between poll cycles.
    pub poll_period_secs: u64,
}

/// Optional tunables read from `domashka.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    endpoint: Option<String>,
    poll_period_secs: Option<u64>,
}

impl BotConfig {
    /// Load configuration from `domashka.toml` (if present) and the
    /// environment. Environment values win for the credentials; the file
    /// only carries tunables.
    pub fn load() -> Result<Self, ConfigError> {
        let file = read_file(Path::new(CONFIG_FILE))?;
        Self::from_sources(
            file,
            env::var(PRACTICUM_TOKEN_VAR).ok(),
            env::var(TELEGRAM_TOKEN_VAR).ok(),
            env::var(TELEGRAM_CHAT_ID_VAR).ok(),
        )
    }

    fn from_sources(
        file: FileConfig,
        practicum_token: Option<String>,
        telegram_token: Option<String>,
        chat_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let practicum_token = required(practicum_token, PRACTICUM_TOKEN_VAR, &mut missing);
        let telegram_token = required(telegram_token, TELEGRAM_TOKEN_VAR, &mut missing);
        let chat_id = required(chat_id, TELEGRAM_CHAT_ID_VAR, &mut missing);
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let poll_period_secs = file.poll_period_secs.unwrap_or(DEFAULT_POLL_PERIOD_SECS);
        if poll_period_secs == 0 {
            return Err(ConfigError::ZeroPeriod);
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
            endpoint: file.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            poll_period_secs,
        })
    }
}

/// An unset or empty variable counts as missing.
fn required(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        Ok(FileConfig::default())
    }
}
