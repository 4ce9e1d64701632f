//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the quote handlers
//! - Wire up middleware (tracing, whole-request timeout backstop)
//! - Bind the server to a listener and serve until shutdown

use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::quote;
use crate::store::QuoteStore;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub store: QuoteStore,
    /// Deadline for the upstream fetch.
    pub upstream_timeout: Duration,
    /// Deadline for the store write, independent of the fetch budget.
    pub store_timeout: Duration,
    /// Key the upstream payload uses for the traded pair.
    pub pair_key: String,
}

/// HTTP server for the quote service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    pub fn new(config: &AppConfig, store: QuoteStore) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;

        let state = AppState {
            upstream,
            store,
            upstream_timeout: Duration::from_millis(config.upstream.timeout_ms),
            store_timeout: Duration::from_millis(config.storage.write_timeout_ms),
            pair_key: config.upstream.pair_key(),
        };

        Ok(Self {
            router: Self::build_router(config, state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route(
                "/cotacao",
                get(quote::fetch_quote).fallback(quote::method_not_allowed),
            )
            .route(
                "/get-data",
                get(quote::list_quotes).fallback(quote::method_not_allowed),
            )
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
