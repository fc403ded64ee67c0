//! Deribit JSON-RPC `book.*` channel adapter.
//!
//! The book payload sits under `params.data`. Level entries come in two
//! shapes: `[price, qty]` pairs, or `["new"|"change"|"delete", price, qty]`
//! triples where price and quantity occupy positions 1 and 2 and deletes
//! carry quantity 0. Numeric fields arrive as JSON numbers, not strings.
//! RPC responses (`id`/`result`) and heartbeat requests carry no book.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::norm::decimal_from_value;
use crate::{BookUpdate, ParsedUpdate};
use orderbook::PriceLevel;
use rust_decimal::Decimal;

#[derive(Debug, Deserialize)]
struct DeribitMessage {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Option<DeribitParams>,
}

#[derive(Debug, Deserialize)]
struct DeribitParams {
    #[serde(default)]
    data: Option<DeribitBookData>,
}

#[derive(Debug, Deserialize)]
struct DeribitBookData {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    instrument_name: String,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    bids: Vec<Vec<Value>>,
    #[serde(default)]
    asks: Vec<Vec<Value>>,
}

/// `BTC-USD` maps to the perpetual instrument `BTC-PERPETUAL`.
pub(crate) fn symbol_format(symbol: &str) -> String {
    match symbol.strip_suffix("-USD") {
        Some(base) => format!("{base}-PERPETUAL"),
        None => symbol.to_string(),
    }
}

pub(crate) fn parse(raw: &str) -> ParsedUpdate {
    let message: DeribitMessage = match serde_json::from_str(raw) {
        Ok(message) => message,
        Err(error) => {
            debug!(venue = "Deribit", %error, "dropping malformed frame");
            return ParsedUpdate::Ignore;
        }
    };

    // RPC responses to subscribe/unsubscribe calls carry an id; heartbeats
    // carry their own method.
    if message.id.is_some() || message.method.as_deref() == Some("heartbeat") {
        return ParsedUpdate::Ignore;
    }
    let Some(data) = message.params.and_then(|params| params.data) else {
        return ParsedUpdate::Ignore;
    };

    let update = BookUpdate {
        symbol: data.instrument_name,
        bids: normalize_levels(&data.bids),
        asks: normalize_levels(&data.asks),
        timestamp_ms: data.timestamp,
    };

    match data.kind.as_deref() {
        Some("snapshot") => ParsedUpdate::Replace(update),
        // `change` frames are deltas; the delete action arrives as qty 0.
        _ => ParsedUpdate::Merge(update),
    }
}

/// Normalizes Deribit's mixed 2-tuple / 3-tuple level encoding.
fn normalize_levels(entries: &[Vec<Value>]) -> Vec<PriceLevel> {
    entries
        .iter()
        .filter_map(|entry| {
            let (price, quantity) = match entry.len() {
                2 => (
                    decimal_from_value(&entry[0])?,
                    decimal_from_value(&entry[1])?,
                ),
                3 => (
                    decimal_from_value(&entry[1])?,
                    decimal_from_value(&entry[2])?,
                ),
                _ => return None,
            };
            if price > Decimal::ZERO && quantity >= Decimal::ZERO {
                Some(PriceLevel::new(price, quantity))
            } else {
                None
            }
        })
        .collect()
}
