//! Schema-tolerant decoding of upstream quote payloads.
//!
//! The upstream API has been observed changing its response shape without
//! notice: the traded-pair key sometimes maps to a nested object, sometimes
//! to a bare bid string, and sometimes the envelope is missing entirely.
//! Normalization therefore never fails; an unrecognizable payload becomes a
//! fully-defaulted record with a zero bid, keeping the serving path
//! available under schema drift.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::quote::types::{
    self, QuoteRecord, DEFAULT_CODE, DEFAULT_CODEIN, DEFAULT_NAME, ZERO,
};

/// Whole-payload quote shape, tried when the pair key is absent or has an
/// unexpected type. A string `bid` is required; everything else defaults.
#[derive(Deserialize)]
struct FlatQuote {
    bid: String,
    code: Option<String>,
    codein: Option<String>,
    name: Option<String>,
    high: Option<String>,
    low: Option<String>,
    #[serde(rename = "varBid")]
    var_bid: Option<String>,
    #[serde(rename = "pctChange")]
    pct_change: Option<String>,
    ask: Option<String>,
    timestamp: Option<String>,
    create_date: Option<String>,
}

/// Produce a canonical record from raw upstream bytes.
///
/// First match wins: bare string under the pair key, nested object with a
/// string `bid`, the whole payload as a record, then the all-defaults
/// fallback. The returned record always carries a non-empty `bid`.
pub fn normalize(raw: &[u8], pair_key: &str) -> QuoteRecord {
    let Ok(payload) = serde_json::from_slice::<Value>(raw) else {
        return QuoteRecord::fallback();
    };

    let mut record = match payload.get(pair_key) {
        Some(Value::String(bid)) => QuoteRecord::with_bare_bid(bid),
        Some(Value::Object(fields)) => from_pair_object(fields),
        _ => from_whole_payload(&payload),
    };

    if record.bid.is_empty() {
        record.bid = ZERO.to_string();
    }
    record
}

/// Build a record from the nested object under the pair key. Without a
/// string `bid` the whole object is discarded in favor of the fallback.
fn from_pair_object(fields: &Map<String, Value>) -> QuoteRecord {
    let Some(bid) = fields.get("bid").and_then(Value::as_str) else {
        return QuoteRecord::fallback();
    };

    QuoteRecord {
        code: field_or(fields, "code", DEFAULT_CODE),
        codein: field_or(fields, "codein", DEFAULT_CODEIN),
        name: field_or(fields, "name", DEFAULT_NAME),
        high: field_or(fields, "high", ZERO),
        low: field_or(fields, "low", ZERO),
        var_bid: field_or(fields, "varBid", ZERO),
        pct_change: field_or(fields, "pctChange", ZERO),
        bid: bid.to_string(),
        ask: field_or(fields, "ask", ZERO),
        timestamp: fields
            .get("timestamp")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(types::now_unix),
        create_date: fields
            .get("create_date")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(types::now_rfc3339),
    }
}

fn from_whole_payload(payload: &Value) -> QuoteRecord {
    match FlatQuote::deserialize(payload) {
        Ok(flat) => QuoteRecord {
            code: flat.code.unwrap_or_else(|| DEFAULT_CODE.to_string()),
            codein: flat.codein.unwrap_or_else(|| DEFAULT_CODEIN.to_string()),
            name: flat.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            high: flat.high.unwrap_or_else(|| ZERO.to_string()),
            low: flat.low.unwrap_or_else(|| ZERO.to_string()),
            var_bid: flat.var_bid.unwrap_or_else(|| ZERO.to_string()),
            pct_change: flat.pct_change.unwrap_or_else(|| ZERO.to_string()),
            bid: flat.bid,
            ask: flat.ask.unwrap_or_else(|| ZERO.to_string()),
            timestamp: flat.timestamp.unwrap_or_else(types::now_unix),
            create_date: flat.create_date.unwrap_or_else(types::now_rfc3339),
        },
        Err(_) => QuoteRecord::fallback(),
    }
}

/// String field from the object, or the default when missing or non-string.
fn field_or(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}
