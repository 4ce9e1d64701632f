//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file (optional, named by CAMBIO_CONFIG)
//!     → loader.rs (parse & deserialize, serde-level defaults)
//!     → env overrides (CAMBIO_BIND, CAMBIO_UPSTREAM_URL, CAMBIO_DB_PATH)
//!     → semantic validation
//!     → AppConfig (immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - Every field has a default so an empty config is runnable
//! - Env overrides win over the file; config never changes after startup

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, ListenerConfig, StorageConfig, UpstreamConfig};
