//! Application configuration from the environment.
//!
//! Values are read from process environment variables, with a `.env` file
//! in the working directory loaded first if present.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::DisplayZone;
use crate::history::DEFAULT_HISTORY_FILE;
use crate::tomtom::{DEFAULT_BASE_URL, DEFAULT_MAX_ALTERNATIVES, TomTomConfig};

pub const API_KEY_VAR: &str = "TOMTOM_API_KEY";
pub const BASE_URL_VAR: &str = "TOMTOM_BASE_URL";
pub const BIND_VAR: &str = "WHEN2GO_BIND";
pub const HISTORY_FILE_VAR: &str = "WHEN2GO_HISTORY_FILE";
pub const TIMEZONE_VAR: &str = "WHEN2GO_TIMEZONE";
pub const MAX_ALTERNATIVES_VAR: &str = "WHEN2GO_MAX_ALTERNATIVES";
pub const HTTP_TIMEOUT_VAR: &str = "WHEN2GO_HTTP_TIMEOUT_SECS";

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the binaries need to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub bind: SocketAddr,
    pub history_file: PathBuf,
    pub zone: DisplayZone,
    pub max_alternatives: u8,
    pub http_timeout_secs: u64,
}

impl AppConfig {
    /// Load `.env` (if any), then read the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let base_url = get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let bind = parse_var(BIND_VAR, get(BIND_VAR), DEFAULT_BIND.parse::<SocketAddr>().ok())?;
        let history_file = get(HISTORY_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE));
        let zone = match get(TIMEZONE_VAR) {
            Some(name) => DisplayZone::parse(&name).map_err(|e| ConfigError::Invalid {
                var: TIMEZONE_VAR,
                value: name,
                reason: e.to_string(),
            })?,
            None => DisplayZone::default(),
        };
        let max_alternatives = parse_var(
            MAX_ALTERNATIVES_VAR,
            get(MAX_ALTERNATIVES_VAR),
            Some(DEFAULT_MAX_ALTERNATIVES),
        )?;
        let http_timeout_secs = parse_var(
            HTTP_TIMEOUT_VAR,
            get(HTTP_TIMEOUT_VAR),
            Some(DEFAULT_TIMEOUT_SECS),
        )?;

        Ok(Self {
            api_key,
            base_url,
            bind,
            history_file,
            zone,
            max_alternatives,
            http_timeout_secs,
        })
    }

    /// TomTom client settings.
    pub fn tomtom(&self) -> TomTomConfig {
        TomTomConfig::new(&self.api_key)
            .with_base_url(&self.base_url)
            .with_max_alternatives(self.max_alternatives)
            .with_timeout(self.http_timeout_secs)
    }
}

fn parse_var<T>(var: &'static str, raw: Option<String>, default: Option<T>) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
        None => default.ok_or(ConfigError::Missing(var)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[(API_KEY_VAR, "secret")]).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "https://api.tomtom.com");
        assert_eq!(config.bind, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.history_file, PathBuf::from("historical_journeys.csv"));
        assert_eq!(config.zone, DisplayZone::default());
        assert_eq!(config.max_alternatives, 3);
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn api_key_required() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing(API_KEY_VAR));
        assert_eq!(load(&[(API_KEY_VAR, "   ")]).unwrap_err(), ConfigError::Missing(API_KEY_VAR));
    }

    #[test]
    fn overrides() {
        let config = load(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "http://127.0.0.1:9999"),
            (BIND_VAR, "0.0.0.0:8080"),
            (HISTORY_FILE_VAR, "/tmp/h.csv"),
            (TIMEZONE_VAR, "Europe/London"),
            (MAX_ALTERNATIVES_VAR, "1"),
            (HTTP_TIMEOUT_VAR, "5"),
        ])
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.history_file, PathBuf::from("/tmp/h.csv"));
        assert_eq!(config.zone, DisplayZone::new(chrono_tz::Europe::London));
        assert_eq!(config.max_alternatives, 1);

        let tomtom = config.tomtom();
        assert_eq!(tomtom.max_alternatives, 1);
        assert_eq!(tomtom.timeout_secs, 5);
        assert_eq!(tomtom.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn malformed_values_rejected() {
        let err = load(&[(API_KEY_VAR, "k"), (MAX_ALTERNATIVES_VAR, "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: MAX_ALTERNATIVES_VAR, .. }));

        let err = load(&[(API_KEY_VAR, "k"), (TIMEZONE_VAR, "Mars/Olympus")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: TIMEZONE_VAR, .. }));

        let err = load(&[(API_KEY_VAR, "k"), (BIND_VAR, "localhost")]).unwrap_err();
        assert!(err.to_string().starts_with("WHEN2GO_BIND has invalid value 'localhost'"));
    }
}
