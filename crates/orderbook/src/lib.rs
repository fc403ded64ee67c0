//! Canonical bounded-depth order books and the side merge engine.
//!
//! Each book side is kept as a price-sorted `Vec<PriceLevel>` capped at
//! [`DEPTH_LIMIT`] levels. Merging never mutates in place: both snapshot
//! replacement and delta application return fresh level vectors, so any
//! holder of a previously obtained [`OrderBookSnapshot`] keeps a stable,
//! never partially-updated view.
//!
//! # Example
//!
//! ```rust
//! use model::Venue;
//! use orderbook::{apply_delta, BookSide, OrderBookSnapshot, PriceLevel};
//! use rust_decimal_macros::dec;
//!
//! let book = OrderBookSnapshot::from_unsorted(
//!     Venue::Okx,
//!     "BTC-USD",
//!     vec![PriceLevel::new(dec!(100), dec!(1))],
//!     vec![PriceLevel::new(dec!(101), dec!(2))],
//!     0,
//! );
//!
//! let asks = apply_delta(
//!     BookSide::Asks,
//!     &book.asks,
//!     &[PriceLevel::new(dec!(101), dec!(0))],
//! );
//! assert!(asks.is_empty());
//! ```

mod book;
mod level;
mod merge;

pub use book::OrderBookSnapshot;
pub use level::PriceLevel;
pub use merge::{apply_delta, apply_snapshot, BookSide, DEPTH_LIMIT};
