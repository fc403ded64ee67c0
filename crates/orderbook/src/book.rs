//! Immutable per-venue order book snapshot.

use model::Venue;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::level::PriceLevel;
use crate::merge::{apply_delta, apply_snapshot, BookSide};

/// The canonical bounded-depth book for one venue/symbol pair.
///
/// Invariants (established by the merge engine, relied on by readers):
/// bids strictly descending by price, asks strictly ascending, no duplicate
/// price within a side, at most [`crate::DEPTH_LIMIT`] levels per side, all
/// retained quantities positive.
///
/// `timestamp_ms` is descriptive metadata from the venue feed. It is not
/// comparable across venues and not guaranteed monotonic, so it must never
/// be used to order or gate merges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub venue: Venue,
    pub symbol: String,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
    pub timestamp_ms: i64,
}

impl OrderBookSnapshot {
    /// Builds a snapshot from unsorted, possibly duplicated level lists.
    ///
    /// Both sides go through the snapshot merge path, so the resulting value
    /// satisfies the book invariants regardless of the venue's native order.
    pub fn from_unsorted(
        venue: Venue,
        symbol: impl Into<String>,
        bids: Vec<PriceLevel>,
        asks: Vec<PriceLevel>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            venue,
            symbol: symbol.into(),
            bids: apply_snapshot(BookSide::Bids, &bids),
            asks: apply_snapshot(BookSide::Asks, &asks),
            timestamp_ms,
        }
    }

    /// Returns a new snapshot with both sides replaced wholesale.
    pub fn replace_sides(
        &self,
        bids: &[PriceLevel],
        asks: &[PriceLevel],
        timestamp_ms: i64,
    ) -> Self {
        Self {
            venue: self.venue,
            symbol: self.symbol.clone(),
            bids: apply_snapshot(BookSide::Bids, bids),
            asks: apply_snapshot(BookSide::Asks, asks),
            timestamp_ms,
        }
    }

    /// Returns a new snapshot with the delta batches merged into each side.
    pub fn merge_sides(
        &self,
        bid_updates: &[PriceLevel],
        ask_updates: &[PriceLevel],
        timestamp_ms: i64,
    ) -> Self {
        Self {
            venue: self.venue,
            symbol: self.symbol.clone(),
            bids: apply_delta(BookSide::Bids, &self.bids, bid_updates),
            asks: apply_delta(BookSide::Asks, &self.asks, ask_updates),
            timestamp_ms,
        }
    }

    /// Best (highest) bid level, if any.
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Best (lowest) ask level, if any.
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// Mid price (average of best bid and best ask).
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Some((bid.price + ask.price) / Decimal::TWO)
    }

    /// Spread (best ask - best bid).
    pub fn spread(&self) -> Option<Decimal> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Some(ask.price - bid.price)
    }

    /// Total visible quantity across all bid levels.
    pub fn total_bid_quantity(&self) -> Decimal {
        self.bids.iter().map(|l| l.quantity).sum()
    }

    /// Total visible quantity across all ask levels.
    pub fn total_ask_quantity(&self) -> Decimal {
        self.asks.iter().map(|l| l.quantity).sum()
    }

    /// True when neither side has any levels.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
