//! Simulation error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Input-validation failures surfaced by [`crate::simulate`].
///
/// This is the only error type that crosses the core's public boundary;
/// a zero-liquidity book is a valid 0%-fill result, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// A limit order was submitted without a price.
    #[error("limit order requires a price")]
    MissingLimitPrice,

    /// Order quantity must be strictly positive.
    #[error("order quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),
}
