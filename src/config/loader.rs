//! Load config from a JSON file or from the environment (`.env` honoured).

use crate::config::types::Config;
use crate::error::ConfigError;
use std::path::Path;

impl Config {
    /// Read a JSON config file. Missing sections and fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.database.validate()?;
        Ok(config)
    }

    /// Build config from `CINEMA_*` variables (and `DATABASE_URL`), falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Use the file when one is given and readable, otherwise the environment.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if p.is_file() => Self::load(p),
            Some(p) => {
                tracing::warn!(path = %p.display(), "config file not readable, using environment");
                Self::from_env()
            }
            None => Self::from_env(),
        }
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if let Some(v) = get("CINEMA_HOST") {
            config.server.host = v;
        }
        if let Some(v) = get("CINEMA_PORT") {
            config.server.port = parse_var("CINEMA_PORT", &v)?;
        }
        if let Some(v) = get("CINEMA_BODY_LIMIT") {
            config.server.body_limit = parse_var("CINEMA_BODY_LIMIT", &v)?;
        }
        config.database.url = get("DATABASE_URL").filter(|s| !s.is_empty());
        if let Some(v) = get("CINEMA_DB_HOST") {
            config.database.host = v;
        }
        if let Some(v) = get("CINEMA_DB_PORT") {
            config.database.port = parse_var("CINEMA_DB_PORT", &v)?;
        }
        if let Some(v) = get("CINEMA_DB_NAME") {
            config.database.name = v;
        }
        if let Some(v) = get("CINEMA_DB_USER") {
            config.database.user = v;
        }
        if let Some(v) = get("CINEMA_DB_PASS") {
            config.database.pass = v;
        }
        config.database.schema = get("CINEMA_DB_SCHEMA").filter(|s| !s.is_empty());
        if let Some(v) = get("CINEMA_DB_MAX_CONNECTIONS") {
            config.database.max_connections = parse_var("CINEMA_DB_MAX_CONNECTIONS", &v)?;
        }
        config.database.validate()?;
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("{}={:?}: {}", key, value, e)))
}
