//! Config types: HTTP listener and PostgreSQL connection settings.

use crate::error::ConfigError;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            body_limit: 64 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("server address {}:{}: {}", self.host, self.port, e)))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection URL. Takes precedence over the discrete fields below.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub pass: String,
    /// Schema holding the tables; set as `search_path` on every connection.
    pub schema: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".into(),
            port: 5432,
            name: "cinema".into(),
            user: "postgres".into(),
            pass: "postgres".into(),
            schema: None,
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let opts = match &self.url {
            Some(url) => PgConnectOptions::from_str(url)
                .map_err(|e| ConfigError::Invalid(format!("database url: {}", e)))?,
            None => PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .database(&self.name)
                .username(&self.user)
                .password(&self.pass),
        };
        Ok(match &self.schema {
            Some(schema) => opts.options([("search_path", schema.as_str())]),
            None => opts,
        })
    }

    /// Name of the target database, as the server will see it.
    pub fn database_name(&self) -> Result<String, ConfigError> {
        let opts = self.connect_options()?;
        Ok(opts.get_database().unwrap_or(self.name.as_str()).to_string())
    }

    /// Check values that would otherwise only fail at connect or DDL time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid("database.max_connections must be at least 1".into()));
        }
        if let Some(schema) = &self.schema {
            if !is_identifier(schema) {
                return Err(ConfigError::Invalid(format!(
                    "database.schema '{}' is not a valid identifier",
                    schema
                )));
            }
        }
        if self.url.is_none() && self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("database.name is required".into()));
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
