//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// TOML-style file configuration for coinbot defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Storefront origin to call instead of the default.
    pub base_url: Option<String>,
    /// File holding the raw session cookie header.
    pub cookie_file: Option<PathBuf>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP whole-request timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        if let Some(base_url) = &self.base_url
            && base_url.trim().is_empty()
        {
            bail!("Invalid config value for `base_url`: must not be empty");
        }
        Ok(())
    }
}

pub(crate) fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Log filter directive for this verbosity.
    #[must_use]
    pub fn filter_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/coinbot/config.toml`
/// 2. `$HOME/.config/coinbot/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("coinbot")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("coinbot")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<Option<FileConfig>> {
    let Some(path) = resolve_default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load_file_config(&path).map(Some)
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_number}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "base_url" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `base_url` value on line {line_number}"))?;
                cfg.base_url = Some(parsed);
            }
            "cookie_file" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `cookie_file` value on line {line_number}")
                })?;
                cfg.cookie_file = Some(PathBuf::from(parsed));
            }
            "connect_timeout_secs" => {
                let parsed = parse_seconds(value).with_context(|| {
                    format!("Invalid `connect_timeout_secs` value on line {line_number}")
                })?;
                cfg.connect_timeout_secs = Some(parsed);
            }
            "read_timeout_secs" => {
                let parsed = parse_seconds(value).with_context(|| {
                    format!("Invalid `read_timeout_secs` value on line {line_number}")
                })?;
                cfg.read_timeout_secs = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_number}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_number}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

/// Whole seconds; the 1..=3600 range is checked by [`FileConfig::validate`].
fn parse_seconds(raw_value: &str) -> Result<u64> {
    raw_value
        .parse::<u64>()
        .with_context(|| format!("Expected whole seconds (got '{raw_value}')"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        other => bail!("Expected one of default, verbose, quiet, debug (got '{other}')"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_all_keys() {
        let raw = r#"
# coinbot defaults
base_url = "https://shopee.tw"
cookie_file = "/home/me/.shopee-cookie" # exported from the browser
connect_timeout_secs = 5
read_timeout_secs = 20
verbosity = "verbose"
"#;
        let cfg = parse_config_str(raw).unwrap();
        assert_eq!(cfg.base_url.as_deref(), Some("https://shopee.tw"));
        assert_eq!(
            cfg.cookie_file,
            Some(PathBuf::from("/home/me/.shopee-cookie"))
        );
        assert_eq!(cfg.connect_timeout_secs, Some(5));
        assert_eq!(cfg.read_timeout_secs, Some(20));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Verbose));
    }

    #[test]
    fn test_parse_config_empty_is_default() {
        assert_eq!(parse_config_str("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_parse_config_hash_inside_string_is_kept() {
        let cfg = parse_config_str(r#"cookie_file = "/tmp/#cookie""#).unwrap();
        assert_eq!(cfg.cookie_file, Some(PathBuf::from("/tmp/#cookie")));
    }

    #[test]
    fn test_parse_config_unknown_key_reports_line() {
        let err = parse_config_str("verbosity = \"quiet\"\nconcurrency = 4\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("concurrency"), "should name key: {msg}");
        assert!(msg.contains("line 2"), "should name line: {msg}");
    }

    #[test]
    fn test_parse_config_missing_equals_is_error() {
        let err = parse_config_str("base_url \"https://x\"").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_config_unquoted_string_is_error() {
        assert!(parse_config_str("base_url = https://shopee.tw").is_err());
    }

    #[test]
    fn test_parse_config_timeout_out_of_range() {
        let err = parse_config_str("read_timeout_secs = 0").unwrap_err();
        assert!(format!("{err:#}").contains("1..=3600"));
        assert!(parse_config_str("connect_timeout_secs = 3601").is_err());
        assert!(parse_config_str("connect_timeout_secs = -1").is_err());
    }

    #[test]
    fn test_parse_config_timeout_must_be_whole_seconds() {
        for value in ["-5", "2.5", "\"10\"", ""] {
            let raw = format!("read_timeout_secs = {value}\n");
            let err = parse_config_str(&raw).unwrap_err();
            assert!(
                format!("{err:#}").contains("read_timeout_secs"),
                "value {value}: {err:#}"
            );
        }
    }

    #[test]
    fn test_parse_config_bad_verbosity() {
        assert!(parse_config_str("verbosity = \"loud\"").is_err());
    }

    #[test]
    fn test_load_file_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "connect_timeout_secs = 12\n").unwrap();

        let cfg = load_file_config(&path).unwrap();
        assert_eq!(cfg.connect_timeout_secs, Some(12));
    }

    #[test]
    fn test_load_file_config_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_verbosity_filter_levels() {
        assert_eq!(VerbositySetting::Default.filter_level(), "info");
        assert_eq!(VerbositySetting::Verbose.filter_level(), "debug");
        assert_eq!(VerbositySetting::Quiet.filter_level(), "error");
        assert_eq!(VerbositySetting::Debug.filter_level(), "trace");
    }
}
