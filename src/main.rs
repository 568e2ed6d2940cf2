//! CLI entry point for coinbot.

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use coinbot_core::{ClientTimeouts, CoinClient, DEFAULT_BASE_URL, ReqwestTransport};
use tracing::{debug, info};

mod app_config;
mod cli;
mod commands;
mod session_source;

use app_config::FileConfig;
use cli::Cli;
use session_source::{COOKIE_ENV_VAR, load_session_cookie};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();
    let file_config = app_config::load_default_file_config()?.unwrap_or_default();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > default (info)
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => file_config
                .verbosity
                .map_or("info", app_config::VerbositySetting::filter_level),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(command = ?cli.command, "CLI arguments parsed");

    let client = build_client(&cli, &file_config)?;
    info!(base_url = client.base_url(), "coinbot starting");

    let output = commands::run_command(cli.command, &client).await?;
    println!("{output}");
    Ok(())
}

fn build_client(cli: &Cli, file_config: &FileConfig) -> Result<CoinClient> {
    let (cookie, source) = load_session_cookie(
        cli.cookie_file.as_deref(),
        env::var(COOKIE_ENV_VAR).ok(),
        file_config.cookie_file.as_deref(),
    )?;
    debug!(?source, "using session cookie");

    let defaults = ClientTimeouts::default();
    let timeouts = ClientTimeouts {
        connect_secs: cli
            .connect_timeout
            .or(file_config.connect_timeout_secs)
            .unwrap_or(defaults.connect_secs),
        read_secs: cli
            .read_timeout
            .or(file_config.read_timeout_secs)
            .unwrap_or(defaults.read_secs),
    };
    let transport = ReqwestTransport::with_timeouts(timeouts)?;

    let base_url = cli
        .base_url
        .as_deref()
        .or(file_config.base_url.as_deref())
        .unwrap_or(DEFAULT_BASE_URL);

    CoinClient::with_transport(cookie, base_url, Arc::new(transport))
        .with_context(|| format!("Cannot use base URL '{base_url}'"))
}
