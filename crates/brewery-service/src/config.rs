//! # Service Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, once, at startup. It is read-only afterwards.
//!
//! ## Environment Variables
//! ```text
//! ┌─────────────────────────────────┬────────────────┬──────────────────────┐
//! │  Variable                       │  Default       │  Meaning             │
//! ├─────────────────────────────────┼────────────────┼──────────────────────┤
//! │  BREWERY_DATABASE_PATH          │  brewery.db    │  SQLite file         │
//! │  BREWERY_DB_MAX_CONNECTIONS     │  5             │  pool ceiling        │
//! │  BREWERY_DEFAULT_PAGE_SIZE      │  25            │  size when absent    │
//! │  BREWERY_MAX_PAGE_SIZE          │  100           │  size ceiling        │
//! │  BREWERY_NAME_MATCH             │  exact         │  exact|prefix|       │
//! │                                 │                │  contains            │
//! └─────────────────────────────────┴────────────────┴──────────────────────┘
//! ```

use std::env;
use std::path::PathBuf;

use brewery_core::page::PageBounds;
use brewery_core::{NameMatch, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use brewery_db::DbConfig;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of pooled store connections.
    pub max_connections: u32,

    /// Page size used when a request has none, or an out-of-range one.
    pub default_page_size: i64,

    /// Largest page size a request may ask for.
    pub max_page_size: i64,

    /// How the listing name filter matches.
    pub name_match: NameMatch,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            database_path: PathBuf::from("brewery.db"),
            max_connections: 5,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            name_match: NameMatch::Exact,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        ServiceConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    ///
    /// `from_env` passes `std::env::var`; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServiceConfig::default();

        let config = ServiceConfig {
            database_path: lookup("BREWERY_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            max_connections: parse_or(&lookup, "BREWERY_DB_MAX_CONNECTIONS", defaults.max_connections)?,

            default_page_size: parse_or(&lookup, "BREWERY_DEFAULT_PAGE_SIZE", defaults.default_page_size)?,

            max_page_size: parse_or(&lookup, "BREWERY_MAX_PAGE_SIZE", defaults.max_page_size)?,

            name_match: parse_or(&lookup, "BREWERY_NAME_MATCH", defaults.name_match)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("BREWERY_DB_MAX_CONNECTIONS".to_string()));
        }
        self.page_bounds()?;
        Ok(())
    }

    /// Store configuration derived from this config.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.max_connections)
    }

    /// Page bounds for request clamping.
    ///
    /// Fields are public, so this re-checks them rather than trusting an
    /// earlier `validate`.
    pub fn page_bounds(&self) -> Result<PageBounds, ConfigError> {
        if self.max_page_size < 1 {
            return Err(ConfigError::InvalidValue("BREWERY_MAX_PAGE_SIZE".to_string()));
        }
        if self.default_page_size < 1 {
            return Err(ConfigError::InvalidValue("BREWERY_DEFAULT_PAGE_SIZE".to_string()));
        }
        PageBounds::new(self.default_page_size, self.max_page_size).map_err(|_| {
            ConfigError::InconsistentPageSizes {
                default_size: self.default_page_size,
                max_size: self.max_page_size,
            }
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Default page size {default_size} exceeds maximum page size {max_size}")]
    InconsistentPageSizes { default_size: i64, max_size: i64 },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.page_bounds().unwrap(), PageBounds::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BREWERY_DATABASE_PATH", "/var/lib/brewery/catalog.db"),
            ("BREWERY_DB_MAX_CONNECTIONS", "8"),
            ("BREWERY_DEFAULT_PAGE_SIZE", "10"),
            ("BREWERY_MAX_PAGE_SIZE", "50"),
            ("BREWERY_NAME_MATCH", "Contains"),
        ])
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/var/lib/brewery/catalog.db"));
        assert_eq!(config.db_config().max_connections, 8);
        let bounds = config.page_bounds().unwrap();
        assert_eq!(bounds.default_size(), 10);
        assert_eq!(bounds.max_size(), 50);
        assert_eq!(config.name_match, NameMatch::Contains);
    }

    #[test]
    fn test_invalid_values_name_the_key() {
        match load(&[("BREWERY_MAX_PAGE_SIZE", "lots")]) {
            Err(ConfigError::InvalidValue(key)) => assert_eq!(key, "BREWERY_MAX_PAGE_SIZE"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(load(&[("BREWERY_NAME_MATCH", "fuzzy")]).is_err());
        assert!(load(&[("BREWERY_DEFAULT_PAGE_SIZE", "0")]).is_err());
        assert!(load(&[("BREWERY_DB_MAX_CONNECTIONS", "0")]).is_err());
    }

    #[test]
    fn test_default_above_max_is_rejected() {
        assert!(matches!(
            load(&[("BREWERY_DEFAULT_PAGE_SIZE", "200")]),
            Err(ConfigError::InconsistentPageSizes { .. })
        ));
    }

    #[test]
    fn test_page_bounds_recheck_edited_fields() {
        let mut config = ServiceConfig::default();
        config.default_page_size = 0;
        assert!(matches!(
            config.page_bounds(),
            Err(ConfigError::InvalidValue(key)) if key == "BREWERY_DEFAULT_PAGE_SIZE"
        ));

        config.default_page_size = 50;
        config.max_page_size = 10;
        assert!(matches!(
            config.page_bounds(),
            Err(ConfigError::InconsistentPageSizes { default_size: 50, max_size: 10 })
        ));
    }
}
