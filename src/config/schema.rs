//! Configuration schema definitions.
//!
//! All types derive Serde traits and default field-by-field, so a minimal
//! (or absent) config file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the quote service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, outer request timeout).
    pub listener: ListenerConfig,

    /// Upstream exchange-rate API settings.
    pub upstream: UpstreamConfig,

    /// SQLite storage settings.
    pub storage: StorageConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Whole-request timeout backstop, in seconds. An order of magnitude
    /// above the per-step deadlines; not part of the quote protocol.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 2,
        }
    }
}

/// Upstream exchange-rate API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the quote API.
    pub base_url: String,

    /// Traded pair, dash-separated (e.g., "USD-BRL").
    pub pair: String,

    /// Deadline for one upstream fetch, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://economia.awesomeapi.com.br".to_string(),
            pair: "USD-BRL".to_string(),
            timeout_ms: 200,
        }
    }
}

impl UpstreamConfig {
    /// Full URL of the latest-quote endpoint.
    pub fn quote_url(&self) -> String {
        format!(
            "{}/json/last/{}",
            self.base_url.trim_end_matches('/'),
            self.pair
        )
    }

    /// Key the upstream uses for the pair in its payload ("USDBRL").
    pub fn pair_key(&self) -> String {
        self.pair.replace('-', "")
    }
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path; the parent directory is created at startup.
    pub path: String,

    /// Deadline for one quote insert, in milliseconds.
    pub write_timeout_ms: u64,

    /// Maximum pooled connections.
    pub max_connections: u32,

    /// Idle connections are closed after this many seconds.
    pub idle_timeout_secs: u64,

    /// Connections are recycled after this many seconds.
    pub max_lifetime_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "./db/database.db".to_string(),
            write_timeout_ms: 10,
            max_connections: 25,
            idle_timeout_secs: 60,
            max_lifetime_secs: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_url_joins_base_and_pair() {
        let config = UpstreamConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.quote_url(), "http://localhost:9000/json/last/USD-BRL");
    }

    #[test]
    fn pair_key_drops_the_dash() {
        assert_eq!(UpstreamConfig::default().pair_key(), "USDBRL");
    }
}
