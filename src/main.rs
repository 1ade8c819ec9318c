mod api;
mod cli;
mod config;
mod error;
mod poll;
mod supervisor;
mod telegram;
mod verdict;

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::api::StatusClient;
use crate::cli::{Cli, Command};
use crate::config::BotConfig;
use crate::error::ConfigError;
use crate::supervisor::Supervisor;
use crate::telegram::TelegramClient;

fn init_tracing(verbose: bool) {
    let default = if verbose { "domashka=debug" } else { "domashka=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match BotConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration check failed, stopping");
            return Err(e.into());
        }
    };
    if let Some(period) = cli.period {
        if period == 0 {
            return Err(ConfigError::ZeroPeriod.into());
        }
        config.poll_period_secs = period;
    }

    match cli.command {
        Command::Check => {
            println!(
                "configuration OK: endpoint {}, poll period {}s",
                config.endpoint, config.poll_period_secs
            );
            Ok(())
        }
        Command::Run => {
            let period = Duration::from_secs(config.poll_period_secs);
            let fetcher = StatusClient::with_base_url(config.practicum_token, config.endpoint);
            let notifier = TelegramClient::new(config.telegram_token, config.chat_id);
            let mut supervisor =
                Supervisor::new(fetcher, notifier, Utc::now().timestamp(), period);
            supervisor.run().await;
            Ok(())
        }
    }
}
