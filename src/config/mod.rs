//! Configuration module for the deck advisor service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default decks-by-winrate query endpoint.
pub const DEFAULT_DECKS_URL: &str = "https://hsreplay.net/analytics/query/list_decks_by_win_rate_v2/?GameType=RANKED_STANDARD&LeagueRankRange=BRONZE_THROUGH_GOLD&Region=ALL&TimeRange=LAST_30_DAYS";

/// Default archetype list endpoint.
pub const DEFAULT_ARCHETYPES_URL: &str = "https://hsreplay.net/api/v1/archetypes/?format=json";

/// Invalid configuration value.
#[derive(Debug, Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite catalog database file
    pub db_path: PathBuf,
    /// Path to the card database JSON file
    pub cards_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// Decks-by-winrate snapshot URL
    pub decks_url: String,
    /// Archetype list URL
    pub archetypes_url: String,
    /// Timeout for a single snapshot fetch
    pub http_timeout: Duration,
    /// How long an import notification should stay visible (0 = sink default)
    pub notify_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("ADVISOR_DB_PATH")
            .unwrap_or_else(|_| "./data/advisor.sqlite".to_string())
            .into();

        let cards_path = env::var("ADVISOR_CARDS_PATH")
            .unwrap_or_else(|_| "./data/cards.json".to_string())
            .into();

        let bind_addr = parse_var("ADVISOR_BIND_ADDR", "127.0.0.1:8080")?;

        let log_level = env::var("ADVISOR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("ADVISOR_LOG_FORMAT").as_deref() {
            Err(_) | Ok("pretty") => LogFormat::Pretty,
            Ok("json") => LogFormat::Json,
            Ok(other) => {
                return Err(ConfigError {
                    var: "ADVISOR_LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected `pretty` or `json`".to_string(),
                })
            }
        };

        let decks_url =
            env::var("ADVISOR_DECKS_URL").unwrap_or_else(|_| DEFAULT_DECKS_URL.to_string());
        let archetypes_url = env::var("ADVISOR_ARCHETYPES_URL")
            .unwrap_or_else(|_| DEFAULT_ARCHETYPES_URL.to_string());

        let http_timeout = Duration::from_secs(parse_var("ADVISOR_HTTP_TIMEOUT_SECS", "30")?);
        let notify_timeout = Duration::from_millis(parse_var("ADVISOR_NOTIFY_TIMEOUT_MS", "0")?);

        Ok(Self {
            db_path,
            cards_path,
            bind_addr,
            log_level,
            log_format,
            decks_url,
            archetypes_url,
            http_timeout,
            notify_timeout,
        })
    }
}

fn parse_var<T>(var: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = env::var(var).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e: T::Err| ConfigError {
        var,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 9] = [
        "ADVISOR_DB_PATH",
        "ADVISOR_CARDS_PATH",
        "ADVISOR_BIND_ADDR",
        "ADVISOR_LOG_LEVEL",
        "ADVISOR_LOG_FORMAT",
        "ADVISOR_DECKS_URL",
        "ADVISOR_ARCHETYPES_URL",
        "ADVISOR_HTTP_TIMEOUT_SECS",
        "ADVISOR_NOTIFY_TIMEOUT_MS",
    ];

    // Both cases live in one test; env vars are process-global.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.db_path, PathBuf::from("./data/advisor.sqlite"));
        assert_eq!(config.cards_path, PathBuf::from("./data/cards.json"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.decks_url, DEFAULT_DECKS_URL);
        assert_eq!(config.archetypes_url, DEFAULT_ARCHETYPES_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.notify_timeout, Duration::ZERO);

        env::set_var("ADVISOR_HTTP_TIMEOUT_SECS", "soon");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.var, "ADVISOR_HTTP_TIMEOUT_SECS");
        assert_eq!(err.value, "soon");
        env::remove_var("ADVISOR_HTTP_TIMEOUT_SECS");

        env::set_var("ADVISOR_LOG_FORMAT", "xml");
        assert!(Config::from_env().is_err());
        env::remove_var("ADVISOR_LOG_FORMAT");
    }
}
