//! Shared level-normalization helpers.

use orderbook::PriceLevel;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Parses string `[price, qty, ...]` tuples into levels, keeping only the
/// first two fields and skipping entries that fail to parse.
///
/// Guards the merge layer's precondition: levels with a non-positive price
/// or a negative quantity are dropped here (quantity zero is kept — it is
/// the delete sentinel in delta batches).
pub(crate) fn levels_from_str_tuples(tuples: &[Vec<String>]) -> Vec<PriceLevel> {
    tuples
        .iter()
        .filter_map(|tuple| {
            let price = Decimal::from_str(tuple.first()?).ok()?;
            let quantity = Decimal::from_str(tuple.get(1)?).ok()?;
            well_formed(price, quantity)
        })
        .collect()
}

/// Parses string `(price, qty)` pairs into levels.
pub(crate) fn levels_from_str_pairs(pairs: &[(String, String)]) -> Vec<PriceLevel> {
    pairs
        .iter()
        .filter_map(|(price, quantity)| {
            let price = Decimal::from_str(price).ok()?;
            let quantity = Decimal::from_str(quantity).ok()?;
            well_formed(price, quantity)
        })
        .collect()
}

/// Extracts a decimal from a JSON value that may be a string or a number.
///
/// Numbers round-trip through their JSON text to avoid binary-float
/// artifacts; `from_scientific` covers the `1e-8` style serde_json emits
/// for small magnitudes.
pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .ok(),
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        _ => None,
    }
}

fn well_formed(price: Decimal, quantity: Decimal) -> Option<PriceLevel> {
    if price > Decimal::ZERO && quantity >= Decimal::ZERO {
        Some(PriceLevel::new(price, quantity))
    } else {
        None
    }
}
