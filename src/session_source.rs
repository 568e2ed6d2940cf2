//! Locates the raw session cookie for a CLI run.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Result, anyhow, bail};
use tracing::debug;

/// Environment variable holding the raw Cookie header.
pub const COOKIE_ENV_VAR: &str = "COINBOT_COOKIE";

/// Where the session cookie was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieSource {
    Stdin,
    CliFile,
    Environment,
    ConfigFile,
}

/// Resolves the session cookie.
///
/// Priority: `--cookie-file` (or `-` for stdin), then `COINBOT_COOKIE`, then
/// the config file's `cookie_file`.
///
/// # Errors
///
/// Returns an error when no source is available, a file cannot be read, or
/// the resolved cookie is blank.
pub fn load_session_cookie(
    cli_cookie_file: Option<&str>,
    env_cookie: Option<String>,
    config_cookie_file: Option<&Path>,
) -> Result<(String, CookieSource)> {
    let (raw, source) = if let Some(cli_cookie_file) = cli_cookie_file {
        if cli_cookie_file == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, CookieSource::Stdin)
        } else {
            (read_cookie_file(Path::new(cli_cookie_file))?, CookieSource::CliFile)
        }
    } else if let Some(env_cookie) = env_cookie.filter(|value| !value.trim().is_empty()) {
        (env_cookie, CookieSource::Environment)
    } else if let Some(config_cookie_file) = config_cookie_file {
        (read_cookie_file(config_cookie_file)?, CookieSource::ConfigFile)
    } else {
        bail!(
            "No session cookie provided. Pass --cookie-file <PATH>, set {COOKIE_ENV_VAR}, or set `cookie_file` in the config file"
        );
    };

    let cookie = normalize_cookie(&raw);
    if cookie.is_empty() {
        bail!("Session cookie from {source:?} is empty");
    }
    debug!(?source, len = cookie.len(), "loaded session cookie");
    Ok((cookie, source))
}

fn read_cookie_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|error| anyhow!("Cannot read cookie file '{}': {error}", path.display()))
}

/// Trims surrounding whitespace and an optional `Cookie:` header prefix.
fn normalize_cookie(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_prefix = trimmed
        .get(..7)
        .filter(|prefix| prefix.eq_ignore_ascii_case("cookie:"))
        .map_or(trimmed, |_| &trimmed[7..]);
    without_prefix.trim().to_string()
}
