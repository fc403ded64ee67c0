//! Side merge engine: snapshot replacement and delta application.
//!
//! Price is the unique key within a side. Both operations route through a
//! `BTreeMap<Decimal, Decimal>` working set, so duplicate prices in a batch
//! resolve to the later occurrence in input order, and the side comes back
//! sorted with no duplicates. Inputs are never mutated.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::level::PriceLevel;

/// Maximum number of levels retained per side, identical for every venue.
pub const DEPTH_LIMIT: usize = 15;

/// Which side of the book a level sequence belongs to.
///
/// Selects the sort comparator: bids are kept strictly descending by price,
/// asks strictly ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSide {
    Bids,
    Asks,
}

/// Fully replaces one side of a book with the given levels.
///
/// Duplicate prices keep the later occurrence in input order, levels with
/// non-positive quantity are dropped, and the result is sorted by the side
/// comparator and truncated to [`DEPTH_LIMIT`]. Total over well-formed input
/// and idempotent.
pub fn apply_snapshot(side: BookSide, levels: &[PriceLevel]) -> Vec<PriceLevel> {
    let mut map = BTreeMap::new();
    for level in levels {
        if level.quantity > Decimal::ZERO {
            map.insert(level.price, level.quantity);
        } else {
            // A duplicate later in the batch can still zero out an earlier one.
            map.remove(&level.price);
        }
    }
    collect_side(side, map)
}

/// Applies an incremental delta batch against an existing side.
///
/// For each update in input order: quantity zero removes that price (no-op
/// if absent), anything else upserts. The last occurrence of a price within
/// the batch wins. The result is re-sorted and truncated to [`DEPTH_LIMIT`].
/// Re-applying an identical batch yields the same side.
pub fn apply_delta(
    side: BookSide,
    existing: &[PriceLevel],
    updates: &[PriceLevel],
) -> Vec<PriceLevel> {
    let mut map: BTreeMap<Decimal, Decimal> = existing
        .iter()
        .map(|level| (level.price, level.quantity))
        .collect();

    for update in updates {
        if update.quantity.is_zero() {
            map.remove(&update.price);
        } else {
            map.insert(update.price, update.quantity);
        }
    }
    collect_side(side, map)
}

/// Drains the working map in side order, capping at the depth limit.
fn collect_side(side: BookSide, map: BTreeMap<Decimal, Decimal>) -> Vec<PriceLevel> {
    match side {
        BookSide::Bids => map
            .into_iter()
            .rev()
            .take(DEPTH_LIMIT)
            .map(|(price, quantity)| PriceLevel::new(price, quantity))
            .collect(),
        BookSide::Asks => map
            .into_iter()
            .take(DEPTH_LIMIT)
            .map(|(price, quantity)| PriceLevel::new(price, quantity))
            .collect(),
    }
}
