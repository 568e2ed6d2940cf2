//! Subcommand handlers.

use anyhow::{Context, Result};
use coinbot_core::{CheckinHistory, CheckinOutcome, CoinClient};
use tracing::info;

use crate::cli::Command;

/// Runs `command` against `client` and returns the line to print.
pub async fn run_command(command: Command, client: &CoinClient) -> Result<String> {
    match command {
        Command::Balance => {
            let coins = client
                .get_balance()
                .await
                .context("Failed to fetch coin balance")?;
            Ok(format!("{coins} coins"))
        }
        Command::Checkin => {
            let outcome = client.checkin().await.context("Check-in failed")?;
            info!(coins = ?outcome.coins(), "check-in finished");
            Ok(format_checkin(outcome))
        }
        Command::History => {
            let history = client
                .get_checkin_history()
                .await
                .context("Failed to fetch check-in history")?;
            Ok(format_history(&history))
        }
        Command::Whoami => client
            .get_login_user()
            .await
            .context("Failed to resolve logged-in user"),
    }
}

fn format_checkin(outcome: CheckinOutcome) -> String {
    match outcome {
        CheckinOutcome::Rewarded(coins) => format!("Checked in: +{coins} coins"),
        CheckinOutcome::NoReward => "Checked in: no reward available".to_string(),
    }
}

/// One line per day; today is marked with `*` and `[x]` once claimed.
fn format_history(history: &CheckinHistory) -> String {
    history
        .amounts
        .iter()
        .enumerate()
        .map(|(index, amount)| {
            let is_today = i64::try_from(index).is_ok_and(|index| index == history.today_index);
            let marker = match (is_today, history.checked_in_today) {
                (true, true) => "* [x]",
                (true, false) => "* [ ]",
                (false, _) => "     ",
            };
            format!("{marker} day {}: {amount}", index + 1)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
