//! Shared vocabulary types for the order-book engine.

use serde::{Deserialize, Serialize};

/// A supported trading venue.
///
/// The set is closed: adding a venue means adding a variant here and a
/// parser module in the `connectors` crate; the merge engine and the
/// simulation engine are untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    Okx,
    Bybit,
    Deribit,
}

impl Venue {
    /// Human-readable venue name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Okx => "OKX",
            Self::Bybit => "Bybit",
            Self::Deribit => "Deribit",
        }
    }

    /// All supported venues.
    pub fn all() -> [Venue; 3] {
        [Self::Okx, Self::Bybit, Self::Deribit]
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order type for hypothetical orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
}

/// Timing hint for a hypothetical order.
///
/// `Immediate` means "send now"; the fixed-delay classes model a user
/// staging the order for a few seconds before release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillTiming {
    Immediate,
    FiveSeconds,
    TenSeconds,
    ThirtySeconds,
}

impl FillTiming {
    /// Configured delay in milliseconds for the fixed-delay classes.
    pub fn delay_ms(&self) -> u64 {
        match self {
            Self::Immediate => 0,
            Self::FiveSeconds => 5_000,
            Self::TenSeconds => 10_000,
            Self::ThirtySeconds => 30_000,
        }
    }
}
