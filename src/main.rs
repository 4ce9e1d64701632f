//! cambio, a bounded exchange-rate quote relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                 QUOTE SERVICE                  │
//!                      │                                                │
//!     GET /cotacao ────┼─▶ http/quote ──▶ upstream client (bounded) ───┼──▶ exchange API
//!                      │        │                                       │
//!                      │        ▼                                       │
//!                      │   quote/normalize (shape-tolerant)             │
//!                      │        │                                       │
//!                      │        ▼                                       │
//!                      │   store/writer (own deadline, background) ────┼──▶ SQLite
//!                      │        │                                       │
//!     {"bid": ...} ◀───┼────────┴── response carries the bid either way │
//!                      │                                                │
//!     GET /get-data ───┼─▶ http/quote ──▶ store (full history)          │
//!                      └───────────────────────────────────────────────┘
//! ```
//!
//! The upstream fetch and the store write race independent deadlines; only
//! the upstream leg can fail a request.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cambio::config::AppConfig;
use cambio::http::HttpServer;
use cambio::store::QuoteStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cambio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("cambio v{} starting", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_url = %config.upstream.quote_url(),
        database = %config.storage.path,
        upstream_timeout_ms = config.upstream.timeout_ms,
        write_timeout_ms = config.storage.write_timeout_ms,
        "Configuration loaded"
    );

    let store = QuoteStore::connect(&config.storage).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(&config, store)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
