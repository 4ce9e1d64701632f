//! Canonical quote record.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Fallback currency code when the upstream payload omits one.
pub(crate) const DEFAULT_CODE: &str = "USD";
/// Fallback counter-currency code.
pub(crate) const DEFAULT_CODEIN: &str = "BRL";
/// Fallback display label.
pub(crate) const DEFAULT_NAME: &str = "Dollar/Real";
/// Fallback for every decimal-as-text field.
pub(crate) const ZERO: &str = "0";

/// One normalized exchange-rate quote.
///
/// Field names mirror the upstream API payload. Numeric fields stay text
/// because the upstream serves them as JSON strings; `bid` is guaranteed
/// non-empty once a record leaves the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub code: String,
    pub codein: String,
    pub name: String,
    pub high: String,
    pub low: String,
    #[serde(rename = "varBid")]
    pub var_bid: String,
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    pub bid: String,
    pub ask: String,
    pub timestamp: String,
    pub create_date: String,
}

impl QuoteRecord {
    /// Record with every field at its default and a zero bid.
    pub fn fallback() -> Self {
        Self::with_bare_bid(ZERO)
    }

    /// Record carrying only a bid; every other field defaulted.
    pub fn with_bare_bid(bid: &str) -> Self {
        QuoteRecord {
            code: DEFAULT_CODE.to_string(),
            codein: DEFAULT_CODEIN.to_string(),
            name: DEFAULT_NAME.to_string(),
            high: ZERO.to_string(),
            low: ZERO.to_string(),
            var_bid: ZERO.to_string(),
            pct_change: ZERO.to_string(),
            bid: bid.to_string(),
            ask: ZERO.to_string(),
            timestamp: now_unix(),
            create_date: now_rfc3339(),
        }
    }
}

/// Current unix time in seconds, rendered the way the upstream renders it.
pub(crate) fn now_unix() -> String {
    Utc::now().timestamp().to_string()
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}
