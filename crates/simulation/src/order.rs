//! Hypothetical order and projected-outcome types.

use model::{FillTiming, OrderSide, OrderType, Venue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order to simulate against a book snapshot. Never sent anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypotheticalOrder {
    pub venue: Venue,
    pub symbol: String,
    pub order_type: OrderType,
    pub side: OrderSide,
    /// Required for limit orders, ignored for market orders.
    pub price: Option<Decimal>,
    pub quantity: Decimal,
    pub timing: FillTiming,
}

/// Projected execution metrics for a simulated order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderImpactMetrics {
    /// Filled quantity as a percentage of the requested quantity.
    pub estimated_fill_percentage: Decimal,
    /// Fraction of visible liquidity on the consumed side the order would
    /// remove, as a percentage of all levels (not only consumed ones).
    pub market_impact: Decimal,
    /// Market orders: |average fill price - best opposing price|. Limit
    /// orders: |average fill price - limit price| over the crossed portion.
    /// Zero when nothing fills; read alongside the fill percentage.
    pub slippage_estimation: Decimal,
    /// Sum of fill quantity * level price over consumed levels.
    pub total_value: Decimal,
    /// Volume-weighted fill price; zero for an unfilled market order, the
    /// limit price for an uncrossed limit order.
    pub average_fill_price: Decimal,
    /// Approximate, explicitly non-SLA time to fill in milliseconds.
    pub time_to_fill_ms: Option<u64>,
}

/// Where an unfilled remainder would rest in the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestingPosition {
    /// Insertion index into the scanned side; `None` is the taker sentinel
    /// for market orders, which never rest.
    pub level: Option<usize>,
    /// True when the order would open a new price level rather than join
    /// an existing one.
    pub is_new_level: bool,
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Full simulation outcome: the order, its impact, and its resting position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlacement {
    pub order: HypotheticalOrder,
    pub impact: OrderImpactMetrics,
    pub position: RestingPosition,
}
