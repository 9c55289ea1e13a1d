//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blogicum_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the admin console on the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(10),
            connect_timeout: Duration::from_secs(
                parse_var(&lookup, "DB_CONNECT_TIMEOUT_SECS").unwrap_or(10),
            ),
        });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var(&lookup, "PORT").unwrap_or(8080),
            database,
        }
    }
}

/// Variables that are set but fail to parse fall back to the default.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_database() {
        let config = config(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
    }

    #[test]
    fn database_settings_are_parsed() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/blogicum"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("PORT", "not-a-port"),
        ]);

        let db = config.database.expect("database configured");
        assert_eq!(db.url, "postgres://localhost/blogicum");
        assert_eq!(db.max_connections, 20);
        assert_eq!(db.min_connections, 10);
        assert_eq!(db.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.port, 8080);
    }
}
