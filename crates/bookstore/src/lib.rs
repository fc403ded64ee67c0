//! Registry of the latest book per (venue, symbol).
//!
//! The store holds `Arc`s to immutable [`OrderBookSnapshot`] values, so a
//! reader that obtained a snapshot keeps a consistent view no matter how
//! many publishes happen afterwards. Writers need mutual exclusion only
//! among themselves per key; `publish` takes the write lock for the map
//! insert and nothing else.

use std::collections::HashMap;
use std::sync::Arc;

use model::Venue;
use orderbook::OrderBookSnapshot;
use parking_lot::RwLock;

/// Thread-safe (venue, symbol) -> latest book registry.
#[derive(Debug, Default)]
pub struct BookStore {
    books: RwLock<HashMap<(Venue, String), Arc<OrderBookSnapshot>>>,
}

impl BookStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the latest book for its (venue, symbol), replacing any prior
    /// value. Called by the adapter integration layer after a merge or
    /// replace completes.
    pub fn publish(&self, snapshot: OrderBookSnapshot) {
        let key = (snapshot.venue, snapshot.symbol.clone());
        self.books.write().insert(key, Arc::new(snapshot));
    }

    /// Returns the latest book for a (venue, symbol), if one has been
    /// published.
    pub fn snapshot(&self, venue: Venue, symbol: &str) -> Option<Arc<OrderBookSnapshot>> {
        self.books
            .read()
            .get(&(venue, symbol.to_string()))
            .cloned()
    }

    /// Tears down the book for one (venue, symbol), e.g. on symbol change.
    pub fn remove(&self, venue: Venue, symbol: &str) -> Option<Arc<OrderBookSnapshot>> {
        self.books.write().remove(&(venue, symbol.to_string()))
    }

    /// Tears down every book for a venue, e.g. on venue disconnect.
    pub fn clear_venue(&self, venue: Venue) {
        self.books.write().retain(|(v, _), _| *v != venue);
    }

    /// Number of books currently held.
    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    /// True when no books are held.
    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }
}
