//! Runtime configuration.
//!
//! Values come from command line flags first, then environment variables
//! (a `.env` file in the working directory is loaded beforehand), then the
//! defaults below.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TOKEN_FILE: &str = ".testuz_token";
pub const DEFAULT_LOG_FILE: &str = "testuz.log";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Environment variable used by the web build of the same front end.
const LEGACY_API_URL_VAR: &str = "VITE_API_URL";

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Terminal client for the TestUZ quiz platform", long_about = None)]
pub struct Cli {
    /// Base URL of the TestUZ REST API
    #[arg(long, env = "TESTUZ_API_URL")]
    pub api_url: Option<String>,

    /// File the admin token is persisted to between runs
    #[arg(long, env = "TESTUZ_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// File that receives the application log
    #[arg(long, env = "TESTUZ_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, env = "TESTUZ_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub token_file: PathBuf,
    pub log_file: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    /// Load `.env`, parse the process arguments and resolve the result.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let cli = Cli::parse();
        Self::from_cli(cli, env::var(LEGACY_API_URL_VAR).ok())
    }

    /// Resolve a parsed command line. `legacy_api_url` is consulted only
    /// when neither `--api-url` nor `TESTUZ_API_URL` is set.
    pub fn from_cli(cli: Cli, legacy_api_url: Option<String>) -> Result<Self> {
        let api_url = cli
            .api_url
            .or(legacy_api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_api_url(&api_url)?;

        let timeout_secs = cli.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            token_file: cli
                .token_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE)),
            log_file: cli
                .log_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn normalize_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::Config(format!(
            "Invalid API URL {:?}: expected an http:// or https:// address",
            raw
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_cli() -> Cli {
        Cli {
            api_url: None,
            token_file: None,
            log_file: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_cli(empty_cli(), None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.token_file, PathBuf::from(DEFAULT_TOKEN_FILE));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn explicit_url_wins_over_legacy_variable() {
        let cli = Cli {
            api_url: Some("https://quiz.example.com/api/".to_string()),
            ..empty_cli()
        };
        let config = Config::from_cli(cli, Some("http://other/api".to_string())).unwrap();
        assert_eq!(config.api_url, "https://quiz.example.com/api");
    }

    #[test]
    fn legacy_variable_is_used_as_fallback() {
        let config =
            Config::from_cli(empty_cli(), Some("http://10.0.0.5:8000/api".into())).unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:8000/api");
    }

    #[test]
    fn rejects_non_http_urls_and_zero_timeout() {
        let cli = Cli {
            api_url: Some("localhost:8000".to_string()),
            ..empty_cli()
        };
        assert!(matches!(Config::from_cli(cli, None), Err(Error::Config(_))));

        let cli = Cli {
            timeout_secs: Some(0),
            ..empty_cli()
        };
        assert!(matches!(Config::from_cli(cli, None), Err(Error::Config(_))));
    }

    #[test]
    fn cli_flags_parse() {
        let cli = Cli::try_parse_from([
            "testuz",
            "--api-url",
            "http://127.0.0.1:9000/api",
            "--timeout-secs",
            "3",
        ])
        .unwrap();
        let config = Config::from_cli(cli, None).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }
}
