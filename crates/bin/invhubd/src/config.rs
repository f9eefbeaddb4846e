//! Daemon configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults,
//! the optional `invhub.toml` in the working directory, then `INVHUB_*`
//! environment variables (`RUST_LOG` beats `INVHUB_LOG`). A variable that
//! is set but cannot be parsed is an error rather than silently ignored.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

const CONFIG_FILE: &str = "invhub.toml";

/// Top-level configuration, one table per section of `invhub.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub changes: ChangesConfig,
}

/// `[server]` — where the HTTP API listens.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// `[database]` — `sqlx` connection URL of the `SQLite` database.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

/// `[logging]` — `tracing` filter directive in `RUST_LOG` syntax.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

/// `[changes]` — in-process change bus.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChangesConfig {
    /// How many changes a slow watcher may fall behind before it re-reads.
    pub capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:invhub.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "invhubd=info,invhub_app=info,invhub_adapter_http_axum=info,tower_http=debug"
                .to_string(),
        }
    }
}

impl Default for ChangesConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

impl Config {
    /// Defaults, overlaid with `invhub.toml` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable or malformed, an
    /// environment override does not parse, or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Overlay the variables that `lookup` knows about.
    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("INVHUB_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("INVHUB_PORT") {
            self.server.port = parse_var("INVHUB_PORT", &port)?;
        }
        if let Some(bind) = lookup("INVHUB_BIND") {
            let (host, port) = bind.rsplit_once(':').ok_or_else(|| {
                ConfigError::Validation(format!("INVHUB_BIND={bind:?} is not host:port"))
            })?;
            self.server.port = parse_var("INVHUB_BIND", port)?;
            self.server.host = host.to_string();
        }
        if let Some(url) = lookup("INVHUB_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(capacity) = lookup("INVHUB_CHANGE_CAPACITY") {
            self.changes.capacity = parse_var("INVHUB_CHANGE_CAPACITY", &capacity)?;
        }
        if let Some(filter) = lookup("RUST_LOG").or_else(|| lookup("INVHUB_LOG")) {
            self.logging.filter = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.changes.capacity == 0 {
            return Err(ConfigError::Validation(
                "change bus capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` to bind the listener to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|err| ConfigError::Validation(format!("{key}={value:?}: {err}")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
