//! Venue feed adapters.
//!
//! One module per venue normalizes that venue's raw WebSocket frames into a
//! [`ParsedUpdate`]: either a full side replacement, an incremental merge, or
//! `Ignore` for subscription acks, heartbeats, and malformed payloads.
//! Malformed input never surfaces as an error — it is logged at debug level
//! and dropped, so the caller's ingest loop stays failure-free.
//!
//! The venue set is closed ([`Venue`]); adding a venue adds a module here
//! and a match arm in [`parse`] / [`symbol_format`] without touching the
//! merge engine or the simulation engine.

mod bybit;
mod deribit;
mod norm;
mod okx;

use model::Venue;
use orderbook::{OrderBookSnapshot, PriceLevel};

/// Normalized payload of one book-bearing frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BookUpdate {
    /// Venue-native symbol as carried by the frame.
    pub symbol: String,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
    /// Venue-reported timestamp; display metadata only.
    pub timestamp_ms: i64,
}

/// Classification of a raw venue frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedUpdate {
    /// Full replacement of both sides.
    Replace(BookUpdate),
    /// Incremental delta against the existing book.
    Merge(BookUpdate),
    /// Ack, heartbeat, control frame, or malformed payload. Dropped silently.
    Ignore,
}

/// Maps a canonical symbol (e.g. `BTC-USD`) to the venue-native form.
///
/// Pure and deterministic; the inverse direction is not needed because every
/// book-bearing frame carries its own venue-native symbol.
pub fn symbol_format(venue: Venue, symbol: &str) -> String {
    match venue {
        Venue::Okx => okx::symbol_format(symbol),
        Venue::Bybit => bybit::symbol_format(symbol),
        Venue::Deribit => deribit::symbol_format(symbol),
    }
}

/// Parses one raw frame from the given venue.
pub fn parse(venue: Venue, raw: &str) -> ParsedUpdate {
    match venue {
        Venue::Okx => okx::parse(raw),
        Venue::Bybit => bybit::parse(raw),
        Venue::Deribit => deribit::parse(raw),
    }
}

/// Applies a parsed update against the current book, yielding the next
/// immutable book value.
///
/// `Replace` goes through the snapshot path; `Merge` goes through the delta
/// path, or degrades to a snapshot when no prior book exists (the first
/// frame after a (re)subscribe may be a delta on some venues). `Ignore`
/// yields `None` and the caller keeps its current book.
pub fn apply_update(
    venue: Venue,
    parsed: ParsedUpdate,
    existing: Option<&OrderBookSnapshot>,
) -> Option<OrderBookSnapshot> {
    match parsed {
        ParsedUpdate::Replace(update) => Some(match existing {
            Some(book) if book.symbol == update.symbol => {
                book.replace_sides(&update.bids, &update.asks, update.timestamp_ms)
            }
            _ => OrderBookSnapshot::from_unsorted(
                venue,
                update.symbol,
                update.bids,
                update.asks,
                update.timestamp_ms,
            ),
        }),
        ParsedUpdate::Merge(update) => Some(match existing {
            Some(book) if book.symbol == update.symbol => {
                book.merge_sides(&update.bids, &update.asks, update.timestamp_ms)
            }
            _ => OrderBookSnapshot::from_unsorted(
                venue,
                update.symbol,
                update.bids,
                update.asks,
                update.timestamp_ms,
            ),
        }),
        ParsedUpdate::Ignore => None,
    }
}
