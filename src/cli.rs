//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

/// Daily coin check-in for a logged-in shop session.
///
/// Coinbot uses the cookie header of a logged-in browser session to read
/// the coin balance and claim the daily check-in reward.
#[derive(Parser, Debug)]
#[command(name = "coinbot")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// File containing the raw Cookie header ("-" reads stdin)
    #[arg(long, value_name = "PATH", global = true)]
    pub cookie_file: Option<String>,

    /// Storefront origin to call
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(long, value_name = "SECS", global = true, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// HTTP request timeout in seconds (1-3600)
    #[arg(long, value_name = "SECS", global = true, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Coin operations.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the current coin balance
    Balance,
    /// Claim today's check-in reward
    Checkin,
    /// Print the seven-day check-in history
    History,
    /// Print the logged-in username
    Whoami,
}
