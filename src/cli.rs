//! Command-line interface parsing for ghcard
//!
//! Handles parsing of CLI arguments using clap and turns them into a validated
//! `StartupConfig`.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use url::Url;

use crate::data::github::GITHUB_API_URL;

/// Longest login GitHub accepts
const MAX_USERNAME_LEN: usize = 39;

/// Longest session a cached profile may last: one year
pub const MAX_SESSION_MINUTES: u64 = 60 * 24 * 365;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// Username contains characters GitHub does not allow
    #[error("Invalid username: '{0}'. Usernames are 1-39 letters, digits or hyphens")]
    InvalidUsername(String),

    /// The output format name is not recognized
    #[error("Invalid format: '{0}'. Valid formats: html, fragment, json")]
    InvalidFormat(String),

    /// The API base URL does not parse
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    /// Session length is zero or longer than a year
    #[error("Session length must be between 1 and {} minutes", MAX_SESSION_MINUTES)]
    InvalidSessionLength,
}

/// ghcard - Render a GitHub developer profile as HTML
#[derive(Parser, Debug)]
#[command(name = "ghcard")]
#[command(about = "Fetch a GitHub profile and render it as an HTML card")]
#[command(version)]
pub struct Cli {
    /// GitHub username to look up
    ///
    /// Without a username only the empty search page is rendered.
    pub username: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GHCARD_API_URL", default_value = GITHUB_API_URL)]
    pub api_url: String,

    /// Personal access token, raises the API rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Skip the session cache entirely
    #[arg(long)]
    pub no_cache: bool,

    /// Delete all cached profiles before running
    #[arg(long)]
    pub clear_cache: bool,

    /// How long a looked-up profile is served from cache, in minutes
    #[arg(
        long,
        value_name = "MINUTES",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..=MAX_SESSION_MINUTES)
    )]
    pub session_minutes: u64,

    /// Output format: html, fragment, json
    #[arg(long, value_name = "FORMAT", default_value = "html")]
    pub format: String,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// How the lookup result is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Complete HTML document with the search form
    #[default]
    Html,
    /// Just the profile (or error) markup
    Fragment,
    /// The profile record as JSON
    Json,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub username: Option<String>,
    pub api_url: String,
    pub token: Option<String>,
    pub use_cache: bool,
    pub clear_cache: bool,
    pub session_minutes: u64,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            username: None,
            api_url: GITHUB_API_URL.to_string(),
            token: None,
            use_cache: true,
            clear_cache: false,
            session_minutes: 60,
            format: OutputFormat::Html,
            output: None,
            verbose: false,
        }
    }
}

/// Parses a format name into an `OutputFormat`
pub fn parse_format(s: &str) -> Result<OutputFormat, CliError> {
    match s.trim().to_lowercase().as_str() {
        "html" | "page" => Ok(OutputFormat::Html),
        "fragment" | "card" => Ok(OutputFormat::Fragment),
        "json" => Ok(OutputFormat::Json),
        _ => Err(CliError::InvalidFormat(s.to_string())),
    }
}

/// Trims the username and checks it against GitHub's login rules
///
/// Returns `Ok(None)` for a blank username.
pub fn parse_username(s: &str) -> Result<Option<String>, CliError> {
    let username = s.trim();
    if username.is_empty() {
        return Ok(None);
    }

    let valid = username.len() <= MAX_USERNAME_LEN
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        return Err(CliError::InvalidUsername(username.to_string()));
    }
    Ok(Some(username.to_string()))
}

fn parse_api_url(s: &str) -> Result<String, CliError> {
    let trimmed = s.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| CliError::InvalidApiUrl {
        url: s.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with normalized settings
    /// * `Err(CliError)` if any argument is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let username = match cli.username {
            Some(ref name) => parse_username(name)?,
            None => None,
        };

        if !(1..=MAX_SESSION_MINUTES).contains(&cli.session_minutes) {
            return Err(CliError::InvalidSessionLength);
        }

        Ok(StartupConfig {
            username,
            api_url: parse_api_url(&cli.api_url)?,
            token: cli.token.clone().filter(|t| !t.trim().is_empty()),
            use_cache: !cli.no_cache,
            clear_cache: cli.clear_cache,
            session_minutes: cli.session_minutes,
            format: parse_format(&cli.format)?,
            output: cli.output.clone(),
            verbose: cli.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["ghcard", "--api-url", "https://api.github.com"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_parse_format_names() {
        assert_eq!(parse_format("html").unwrap(), OutputFormat::Html);
        assert_eq!(parse_format("HTML").unwrap(), OutputFormat::Html);
        assert_eq!(parse_format("fragment").unwrap(), OutputFormat::Fragment);
        assert_eq!(parse_format("card").unwrap(), OutputFormat::Fragment);
        assert_eq!(parse_format("json").unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_parse_format_invalid() {
        let err = parse_format("xml").unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_parse_username() {
        assert_eq!(parse_username("octocat").unwrap().as_deref(), Some("octocat"));
        assert_eq!(parse_username("  dash-ed-1 ").unwrap().as_deref(), Some("dash-ed-1"));
        assert_eq!(parse_username("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_username_rejects_bad_characters() {
        assert!(parse_username("../etc/passwd").is_err());
        assert!(parse_username("with space").is_err());
        assert!(parse_username(&"a".repeat(40)).is_err());
        assert!(parse_username(&"a".repeat(39)).is_ok());
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = parse(&[]);
        assert!(cli.username.is_none());
        assert_eq!(cli.session_minutes, 60);
        assert_eq!(cli.format, "html");
        assert!(!cli.no_cache);
    }

    #[test]
    fn test_startup_config_from_cli_no_username() {
        let config = StartupConfig::from_cli(&parse(&[])).unwrap();
        assert!(config.username.is_none());
        assert!(config.use_cache);
        assert_eq!(config.format, OutputFormat::Html);
    }

    #[test]
    fn test_startup_config_from_cli_full() {
        let cli = parse(&[
            "octocat",
            "--no-cache",
            "--session-minutes",
            "5",
            "--format",
            "json",
            "-o",
            "out.json",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(config.username.as_deref(), Some("octocat"));
        assert!(!config.use_cache);
        assert_eq!(config.session_minutes, 5);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_startup_config_strips_trailing_slash() {
        let cli = Cli::parse_from(["ghcard", "--api-url", "http://localhost:8080/"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
    }

    #[test]
    fn test_startup_config_rejects_invalid_values() {
        assert!(matches!(
            StartupConfig::from_cli(&parse(&["bad/name"])),
            Err(CliError::InvalidUsername(_))
        ));
        assert!(matches!(
            StartupConfig::from_cli(&Cli::parse_from(["ghcard", "--api-url", "nope"])),
            Err(CliError::InvalidApiUrl { .. })
        ));
    }

    #[test]
    fn test_session_minutes_out_of_range_is_rejected_by_parser() {
        let base = ["ghcard", "octocat", "--api-url", "https://api.github.com"];
        for minutes in ["0", "1000000000000", "18446744073709551615"] {
            let mut args = base.to_vec();
            args.extend(["--session-minutes", minutes]);
            assert!(
                Cli::try_parse_from(args).is_err(),
                "{} minutes should be rejected",
                minutes
            );
        }

        let mut args = base.to_vec();
        let max = MAX_SESSION_MINUTES.to_string();
        args.extend(["--session-minutes", max.as_str()]);
        let config = StartupConfig::from_cli(&Cli::parse_from(args)).unwrap();
        assert_eq!(config.session_minutes, MAX_SESSION_MINUTES);
    }

    #[test]
    fn test_from_cli_bounds_session_minutes() {
        let mut cli = parse(&["octocat"]);

        cli.session_minutes = 0;
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidSessionLength)
        ));

        cli.session_minutes = 1_000_000_000_000;
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidSessionLength)
        ));
    }
}
