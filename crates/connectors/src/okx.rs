//! OKX `books` channel adapter.
//!
//! Book frames carry `[price, qty, liquidated, orders]` string tuples under
//! `data[0]` and an `action` field of `snapshot` or `update`. Event frames
//! (`subscribe`/`unsubscribe`/`error`) carry an `event` field and no data.

use serde::Deserialize;
use tracing::debug;

use crate::norm::levels_from_str_tuples;
use crate::{BookUpdate, ParsedUpdate};

#[derive(Debug, Deserialize)]
struct OkxMessage {
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    arg: Option<OkxArg>,
    #[serde(default)]
    data: Vec<OkxBookData>,
}

#[derive(Debug, Deserialize)]
struct OkxArg {
    #[serde(rename = "instId")]
    inst_id: String,
}

#[derive(Debug, Deserialize)]
struct OkxBookData {
    #[serde(default)]
    bids: Vec<Vec<String>>,
    #[serde(default)]
    asks: Vec<Vec<String>>,
    #[serde(default)]
    ts: String,
}

/// OKX instrument ids already use the canonical dashed form.
pub(crate) fn symbol_format(symbol: &str) -> String {
    symbol.to_string()
}

pub(crate) fn parse(raw: &str) -> ParsedUpdate {
    let message: OkxMessage = match serde_json::from_str(raw) {
        Ok(message) => message,
        Err(error) => {
            debug!(venue = "OKX", %error, "dropping malformed frame");
            return ParsedUpdate::Ignore;
        }
    };

    // Subscription acks and channel errors carry `event`.
    if message.event.is_some() {
        return ParsedUpdate::Ignore;
    }

    let Some(arg) = message.arg else {
        return ParsedUpdate::Ignore;
    };
    let Some(book) = message.data.first() else {
        return ParsedUpdate::Ignore;
    };

    let update = BookUpdate {
        symbol: arg.inst_id,
        bids: levels_from_str_tuples(&book.bids),
        asks: levels_from_str_tuples(&book.asks),
        timestamp_ms: book.ts.parse().unwrap_or(0),
    };

    match message.action.as_deref() {
        Some("snapshot") => ParsedUpdate::Replace(update),
        // `update` frames, and older payloads without an action, are deltas.
        _ => ParsedUpdate::Merge(update),
    }
}
