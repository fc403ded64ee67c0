//! Deterministic order-impact simulation.
//!
//! Given a hypothetical order and a book snapshot, [`simulate`] computes
//! projected execution outcomes: fill percentage, average fill price,
//! slippage, market impact, resting-order insertion position, and an
//! approximate (non-SLA) time to fill. The engine is a pure function over
//! its inputs: no state, no side effects, safe to call concurrently against
//! any snapshot.

mod engine;
mod error;
mod order;

pub use engine::simulate;
pub use error::SimulationError;
pub use order::{HypotheticalOrder, OrderImpactMetrics, OrderPlacement, RestingPosition};
