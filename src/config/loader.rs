//! Configuration loading from disk and environment.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "CAMBIO_CONFIG";
/// Environment override for the listener bind address.
pub const BIND_VAR: &str = "CAMBIO_BIND";
/// Environment override for the upstream base URL.
pub const UPSTREAM_URL_VAR: &str = "CAMBIO_UPSTREAM_URL";
/// Environment override for the database file path.
pub const DB_PATH_VAR: &str = "CAMBIO_DB_PATH";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

impl AppConfig {
    /// Configuration for this process: the file named by `CAMBIO_CONFIG`
    /// when set, defaults otherwise, then per-field environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => load_config(Path::new(&path))?,
            Err(_) => AppConfig::default(),
        };

        if let Ok(bind) = std::env::var(BIND_VAR) {
            config.listener.bind_address = bind;
        }
        if let Ok(url) = std::env::var(UPSTREAM_URL_VAR) {
            config.upstream.base_url = url;
        }
        if let Ok(path) = std::env::var(DB_PATH_VAR) {
            config.storage.path = path;
        }

        validate(&config)?;
        Ok(config)
    }
}

/// Semantic checks serde cannot express.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config
        .listener
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_err()
    {
        return Err(ConfigError::Invalid(format!(
            "bind_address {:?} is not a socket address",
            config.listener.bind_address
        )));
    }
    if config.upstream.timeout_ms == 0 {
        return Err(ConfigError::Invalid(
            "upstream.timeout_ms must be non-zero".to_string(),
        ));
    }
    if config.storage.write_timeout_ms == 0 {
        return Err(ConfigError::Invalid(
            "storage.write_timeout_ms must be non-zero".to_string(),
        ));
    }
    if !config.upstream.pair.contains('-') {
        return Err(ConfigError::Invalid(format!(
            "upstream.pair {:?} must be dash-separated, e.g. \"USD-BRL\"",
            config.upstream.pair
        )));
    }
    Ok(())
}
