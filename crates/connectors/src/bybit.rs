//! Bybit spot `orderbook.*` topic adapter.
//!
//! Book frames carry `b`/`a` string pairs under `data` and a `type` field of
//! `snapshot` or `delta`. Operation responses (`op: "subscribe"`, pings)
//! carry no book payload.

use serde::Deserialize;
use tracing::debug;

use crate::norm::levels_from_str_pairs;
use crate::{BookUpdate, ParsedUpdate};

#[derive(Debug, Deserialize)]
struct BybitMessage {
    #[serde(default)]
    op: Option<String>,
    #[serde(default)]
    topic: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    ts: Option<i64>,
    #[serde(default)]
    data: Option<BybitBookData>,
}

#[derive(Debug, Deserialize)]
struct BybitBookData {
    s: String,
    #[serde(default)]
    b: Vec<(String, String)>,
    #[serde(default)]
    a: Vec<(String, String)>,
}

/// `BTC-USD` maps to `BTCUSDT`; generally the `-USD` suffix becomes `USDT`
/// and any remaining dash is dropped.
pub(crate) fn symbol_format(symbol: &str) -> String {
    if let Some(base) = symbol.strip_suffix("-USD") {
        format!("{base}USDT")
    } else {
        symbol.replace('-', "")
    }
}

pub(crate) fn parse(raw: &str) -> ParsedUpdate {
    let message: BybitMessage = match serde_json::from_str(raw) {
        Ok(message) => message,
        Err(error) => {
            debug!(venue = "Bybit", %error, "dropping malformed frame");
            return ParsedUpdate::Ignore;
        }
    };

    // Operation responses (subscribe acks, pongs) never carry a book.
    if message.op.is_some() {
        return ParsedUpdate::Ignore;
    }
    let topic_is_book = message
        .topic
        .as_deref()
        .is_some_and(|topic| topic.contains("orderbook"));
    if !topic_is_book {
        return ParsedUpdate::Ignore;
    }
    let Some(data) = message.data else {
        return ParsedUpdate::Ignore;
    };

    let update = BookUpdate {
        symbol: data.s,
        bids: levels_from_str_pairs(&data.b),
        asks: levels_from_str_pairs(&data.a),
        timestamp_ms: message.ts.unwrap_or(0),
    };

    match message.kind.as_deref() {
        Some("snapshot") => ParsedUpdate::Replace(update),
        _ => ParsedUpdate::Merge(update),
    }
}
