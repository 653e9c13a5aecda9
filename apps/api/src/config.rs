//! Kasir API configuration module.
//!
//! Configuration is loaded from an optional `.env` file, then environment
//! variables, with fallback to defaults.

use chrono::FixedOffset;
use std::env;
use std::path::PathBuf;

/// Kasir API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port (`PORT`, default 8080)
    pub port: u16,

    /// SQLite database file (`DB_PATH`, default `./kasir.db`)
    pub db_path: PathBuf,

    /// Pool size (`DB_MAX_CONNECTIONS`, default 5)
    pub db_max_connections: u32,

    /// Zone whose calendar days the reports use (`REPORT_UTC_OFFSET`, default `+00:00`)
    pub report_utc_offset: FixedOffset,
}

impl ApiConfig {
    /// Load configuration from `.env` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            db_path: lookup("DB_PATH")
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| "./kasir.db".to_string())
                .into(),

            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .ok()
                .filter(|n: &u32| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            report_utc_offset: parse_utc_offset(
                &lookup("REPORT_UTC_OFFSET").unwrap_or_else(|| "+00:00".to_string()),
            )
            .ok_or_else(|| ConfigError::InvalidValue("REPORT_UTC_OFFSET".to_string()))?,
        };

        Ok(config)
    }
}

/// Parses `+HH:MM` / `-HH:MM` (and `Z`).
fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_path, PathBuf::from("./kasir.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.report_utc_offset.local_minus_utc(), 0);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("DB_PATH", "/var/lib/kasir/kasir.db"),
            ("DB_MAX_CONNECTIONS", "10"),
            ("REPORT_UTC_OFFSET", "+07:00"),
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/kasir/kasir.db"));
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.report_utc_offset.local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("PORT", "eighty"),
            ("PORT", "70000"),
            ("DB_MAX_CONNECTIONS", "0"),
            ("REPORT_UTC_OFFSET", "WIB"),
            ("REPORT_UTC_OFFSET", "+7"),
        ] {
            match config_from(&[(key, value)]) {
                Err(ConfigError::InvalidValue(name)) => assert_eq!(name, key),
                other => panic!("{}={} should be rejected, got {:?}", key, value, other),
            }
        }
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("-05:30").unwrap().local_minus_utc(), -(5 * 3600 + 1800));
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("+24:00").is_none());
        assert!(parse_utc_offset("").is_none());
    }
}
