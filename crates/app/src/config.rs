//! Runtime configuration, read from the environment.

use std::num::ParseIntError;
use std::time::Duration;

use storefront_catalog::DEFAULT_CATALOG_URL;
use storefront_observability::{LogFormat, UnknownLogFormat};

pub const CATALOG_URL_VAR: &str = "STOREFRONT_CATALOG_URL";
pub const FETCH_DELAY_VAR: &str = "STOREFRONT_FETCH_DELAY_MS";
pub const LOG_FORMAT_VAR: &str = "STOREFRONT_LOG_FORMAT";

const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("STOREFRONT_FETCH_DELAY_MS must be a number of milliseconds, got {value:?}")]
    InvalidFetchDelay {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("STOREFRONT_LOG_FORMAT: {0}")]
    LogFormat(#[from] UnknownLogFormat),
    #[error("STOREFRONT_CATALOG_URL must not be empty")]
    EmptyCatalogUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog_url: String,
    /// Pause between mounting the catalog view and starting the fetch.
    pub fetch_delay: Duration,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            fetch_delay: DEFAULT_FETCH_DELAY,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source; unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(CATALOG_URL_VAR) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::EmptyCatalogUrl);
            }
            config.catalog_url = url.to_string();
        }

        if let Some(raw) = lookup(FETCH_DELAY_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidFetchDelay {
                    value: raw.clone(),
                    source,
                })?;
            config.fetch_delay = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.catalog_url, "https://fakestoreapi.com/products");
        assert_eq!(config.fetch_delay, Duration::from_secs(1));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (CATALOG_URL_VAR, "http://localhost:9000/products"),
            (FETCH_DELAY_VAR, "0"),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.catalog_url, "http://localhost:9000/products");
        assert_eq!(config.fetch_delay, Duration::ZERO);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = AppConfig::from_lookup(lookup(&[(FETCH_DELAY_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFetchDelay { ref value, .. } if value == "soon"));

        let err = AppConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::LogFormat(_)));

        let err = AppConfig::from_lookup(lookup(&[(CATALOG_URL_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCatalogUrl));
    }
}
