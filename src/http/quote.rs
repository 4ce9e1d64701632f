//! Quote endpoints.
//!
//! `fetch_quote` is the orchestration at the heart of the service: one
//! bounded upstream fetch, an infallible normalization, a bounded
//! background write, and a best-effort bid in the response no matter how
//! the write went. Only the upstream leg can fail the request.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::quote::normalize;
use crate::store;

/// Response body for `GET /cotacao`: the bid and nothing else.
#[derive(Debug, Serialize)]
pub struct BidResponse {
    pub bid: String,
}

/// GET /cotacao: fetch, normalize, persist best-effort, answer with the bid.
pub async fn fetch_quote(State(state): State<AppState>) -> impl IntoResponse {
    let raw = match state.upstream.fetch_latest(state.upstream_timeout).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(error = %e, url = %state.upstream.url(), "Upstream fetch failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch currency data",
            )
                .into_response();
        }
    };

    let record = normalize(&raw, &state.pair_key);

    // The write races its own deadline; the caller gets the bid either way.
    if let Err(e) = store::persist(&state.store, record.clone(), state.store_timeout).await {
        tracing::warn!(error = %e, "Quote insert skipped");
    }

    Json(BidResponse { bid: record.bid }).into_response()
}

/// GET /get-data: the full stored history, oldest first.
pub async fn list_quotes(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.all_quotes().await {
        Ok(quotes) => Json(quotes).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read stored quotes");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read stored quotes",
            )
                .into_response()
        }
    }
}

/// Fallback for any non-GET method on the quote routes.
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
