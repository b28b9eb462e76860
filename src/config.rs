use actix_web::http::StatusCode;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("NOT_FOUND_STATUS must be 304 or 404, got {0:?}")]
    UnsupportedNotFoundStatus(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Status used when delete/update match no document.
    pub not_found_status: StatusCode,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub collection: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub connect_timeout: Duration,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port = parse_number("PORT", var("PORT", "8080"))?;
        let connect_timeout_secs = parse_number(
            "DATABASE_CONNECT_TIMEOUT_SECS",
            var("DATABASE_CONNECT_TIMEOUT_SECS", "10"),
        )?;

        let not_found_status = match var("NOT_FOUND_STATUS", "304").trim() {
            "304" => StatusCode::NOT_MODIFIED,
            "404" => StatusCode::NOT_FOUND,
            other => return Err(ConfigError::UnsupportedNotFoundStatus(other.to_string())),
        };

        Ok(Config {
            server: ServerConfig {
                host: var("HOST", "0.0.0.0"),
                port,
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL", "ws://localhost:8000"),
                namespace: var("DATABASE_NAMESPACE", "userdb"),
                database: var("DATABASE_NAME", "userdb"),
                collection: var("COLLECTION_NAME", "loginusers"),
                username: lookup("DATABASE_USER"),
                password: lookup("DATABASE_PASS"),
                connect_timeout: Duration::from_secs(connect_timeout_secs),
            },
            not_found_status,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_match_fixed_constants() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.database.url, "ws://localhost:8000");
        assert_eq!(config.database.namespace, "userdb");
        assert_eq!(config.database.database, "userdb");
        assert_eq!(config.database.collection, "loginusers");
        assert_eq!(config.database.username, None);
        assert_eq!(config.database.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.not_found_status, StatusCode::NOT_MODIFIED);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9000"),
            ("DATABASE_URL", "mem://"),
            ("COLLECTION_NAME", "people"),
            ("DATABASE_USER", "root"),
            ("DATABASE_PASS", "secret"),
            ("NOT_FOUND_STATUS", "404"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.url, "mem://");
        assert_eq!(config.database.collection, "people");
        assert_eq!(config.database.username.as_deref(), Some("root"));
        assert_eq!(config.database.password.as_deref(), Some("secret"));
        assert_eq!(config.not_found_status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_unsupported_not_found_status() {
        let err = load(&[("NOT_FOUND_STATUS", "410")]).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedNotFoundStatus("410".to_string()));
    }
}
