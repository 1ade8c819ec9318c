//! Command-line interface, built on clap derive.

use clap::{Parser, Subcommand};

/// Telegram bot that watches homework review statuses and reports changes.
#[derive(Debug, Parser)]
#[command(name = "domashka", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the poll period, in seconds.
    #[arg(long, global = true)]
    pub period: Option<u64>,

    /// Enable debug-level output.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the polling loop.
    Run,

    /// Validate the configuration and exit.
    Check,
}
