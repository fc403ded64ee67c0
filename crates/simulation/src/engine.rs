//! Walk-the-book simulation engine.

use model::{FillTiming, OrderSide, OrderType};
use orderbook::{OrderBookSnapshot, PriceLevel};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::SimulationError;
use crate::order::{HypotheticalOrder, OrderImpactMetrics, OrderPlacement, RestingPosition};

/// Time-to-fill constant for near-complete immediate fills, in ms.
const FAST_FILL_MS: u64 = 100;
/// Time-to-fill constant for 50-89% immediate fills, in ms.
const PARTIAL_FILL_MS: u64 = 5_000;
/// Time-to-fill constant for sub-50% immediate fills, in ms.
const THIN_FILL_MS: u64 = 30_000;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Simulates a hypothetical order against a book snapshot.
///
/// Validation happens before any book access: a limit order without a
/// price or a non-positive quantity is rejected with a typed error. An
/// empty opposing side is not an error; it yields a 0% fill.
pub fn simulate(
    order: &HypotheticalOrder,
    book: &OrderBookSnapshot,
) -> Result<OrderPlacement, SimulationError> {
    if order.quantity <= Decimal::ZERO {
        return Err(SimulationError::NonPositiveQuantity(order.quantity));
    }
    match order.order_type {
        OrderType::Market => Ok(simulate_market(order, book)),
        OrderType::Limit => {
            let limit = order.price.ok_or(SimulationError::MissingLimitPrice)?;
            Ok(simulate_limit(order, book, limit))
        }
    }
}

/// Market order: greedily consume the opposing side best-first.
fn simulate_market(order: &HypotheticalOrder, book: &OrderBookSnapshot) -> OrderPlacement {
    let levels = opposing_side(order.side, book);

    let (filled, total_value) = walk(levels.iter(), order.quantity);
    let average_fill_price = if filled > Decimal::ZERO {
        total_value / filled
    } else {
        Decimal::ZERO
    };

    // Slippage against top of the consumed side. A zero here with an empty
    // side means "nothing to fill against", not "filled without slippage".
    let slippage_estimation = match levels.first() {
        Some(best) => (average_fill_price - best.price).abs(),
        None => Decimal::ZERO,
    };

    OrderPlacement {
        order: order.clone(),
        impact: OrderImpactMetrics {
            estimated_fill_percentage: filled / order.quantity * HUNDRED,
            market_impact: market_impact(levels, filled),
            slippage_estimation,
            total_value,
            average_fill_price,
            time_to_fill_ms: Some(time_to_fill_ms(order.timing, filled, order.quantity)),
        },
        position: RestingPosition {
            level: None, // taker: a market order never rests
            is_new_level: false,
            price: average_fill_price,
            quantity: filled,
        },
    }
}

/// Limit order: crossing fill bounded by the price condition, plus the
/// resting insertion point for any remainder.
fn simulate_limit(
    order: &HypotheticalOrder,
    book: &OrderBookSnapshot,
    limit: Decimal,
) -> OrderPlacement {
    let levels = opposing_side(order.side, book);

    let crossing = levels.iter().take_while(|level| match order.side {
        OrderSide::Buy => level.price <= limit,
        OrderSide::Sell => level.price >= limit,
    });
    let (filled, total_value) = walk(crossing, order.quantity);

    let average_fill_price = if filled > Decimal::ZERO {
        total_value / filled
    } else {
        limit
    };

    let (level, is_new_level) = insertion_point(order.side, levels, limit);

    OrderPlacement {
        order: order.clone(),
        impact: OrderImpactMetrics {
            estimated_fill_percentage: filled / order.quantity * HUNDRED,
            market_impact: market_impact(levels, filled),
            slippage_estimation: (average_fill_price - limit).abs(),
            total_value,
            average_fill_price,
            time_to_fill_ms: Some(time_to_fill_ms(order.timing, filled, order.quantity)),
        },
        position: RestingPosition {
            level: Some(level),
            is_new_level,
            price: limit,
            quantity: order.quantity,
        },
    }
}

/// The side a taker order consumes: buys read asks, sells read bids.
fn opposing_side(side: OrderSide, book: &OrderBookSnapshot) -> &[PriceLevel] {
    match side {
        OrderSide::Buy => &book.asks,
        OrderSide::Sell => &book.bids,
    }
}

/// Greedy best-first accumulation over an already price-ordered level walk.
fn walk<'a>(
    levels: impl Iterator<Item = &'a PriceLevel>,
    requested: Decimal,
) -> (Decimal, Decimal) {
    let mut remaining = requested;
    let mut filled = Decimal::ZERO;
    let mut total_value = Decimal::ZERO;

    for level in levels {
        if remaining.is_zero() {
            break;
        }
        let fill = remaining.min(level.quantity);
        total_value += fill * level.price;
        filled += fill;
        remaining -= fill;
    }
    (filled, total_value)
}

/// Filled quantity as a percentage of all visible depth on the consumed
/// side — the fraction of displayed liquidity the order would remove.
fn market_impact(levels: &[PriceLevel], filled: Decimal) -> Decimal {
    let total_depth: Decimal = levels.iter().map(|level| level.quantity).sum();
    if total_depth.is_zero() {
        Decimal::ZERO
    } else {
        filled / total_depth * HUNDRED
    }
}

/// First index on the scanned side where the order's ordering condition
/// holds; exact price match joins the level, otherwise a new one opens.
/// No qualifying index appends at the end of the list.
fn insertion_point(side: OrderSide, levels: &[PriceLevel], limit: Decimal) -> (usize, bool) {
    let found = levels.iter().position(|level| match side {
        OrderSide::Buy => level.price >= limit,
        OrderSide::Sell => level.price <= limit,
    });
    match found {
        Some(index) => (index, levels[index].price != limit),
        None => (levels.len(), true),
    }
}

/// Tiered, explicitly approximate time-to-fill estimate.
fn time_to_fill_ms(timing: FillTiming, filled: Decimal, requested: Decimal) -> u64 {
    // requested > 0 is validated before any simulation runs.
    let fraction = (filled / requested).to_f64().unwrap_or(0.0);
    let immediate = timing == FillTiming::Immediate;

    if fraction >= 0.9 {
        if immediate { FAST_FILL_MS } else { timing.delay_ms() }
    } else if fraction >= 0.5 {
        if immediate { PARTIAL_FILL_MS } else { timing.delay_ms() * 2 }
    } else if immediate {
        THIN_FILL_MS
    } else {
        timing.delay_ms() * 10
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::Venue;
    use rust_decimal_macros::dec;

    fn book(bids: &[(Decimal, Decimal)], asks: &[(Decimal, Decimal)]) -> OrderBookSnapshot {
        OrderBookSnapshot::from_unsorted(
            Venue::Okx,
            "BTC-USD",
            bids.iter().map(|&(p, q)| PriceLevel::new(p, q)).collect(),
            asks.iter().map(|&(p, q)| PriceLevel::new(p, q)).collect(),
            0,
        )
    }

    fn order(
        order_type: OrderType,
        side: OrderSide,
        price: Option<Decimal>,
        quantity: Decimal,
    ) -> HypotheticalOrder {
        HypotheticalOrder {
            venue: Venue::Okx,
            symbol: "BTC-USD".to_string(),
            order_type,
            side,
            price,
            quantity,
            timing: FillTiming::Immediate,
        }
    }

    #[test]
    fn market_sell_with_sufficient_depth() {
        let book = book(&[(dec!(100), dec!(2)), (dec!(99), dec!(3))], &[]);
        let placement = simulate(
            &order(OrderType::Market, OrderSide::Sell, None, dec!(4)),
            &book,
        )
        .unwrap();

        assert_eq!(placement.impact.total_value, dec!(398));
        assert_eq!(placement.impact.average_fill_price, dec!(99.5));
        assert_eq!(placement.impact.estimated_fill_percentage, dec!(100));
        assert_eq!(placement.impact.slippage_estimation, dec!(0.5));
        assert_eq!(placement.position.level, None);
        assert_eq!(placement.position.quantity, dec!(4));
    }

    #[test]
    fn market_buy_with_insufficient_depth() {
        let book = book(&[], &[(dec!(101), dec!(1))]);
        let placement = simulate(
            &order(OrderType::Market, OrderSide::Buy, None, dec!(5)),
            &book,
        )
        .unwrap();

        assert_eq!(placement.impact.estimated_fill_percentage, dec!(20));
        assert_eq!(placement.impact.average_fill_price, dec!(101));
        // All visible ask depth consumed.
        assert_eq!(placement.impact.market_impact, dec!(100));
        assert_eq!(placement.impact.slippage_estimation, dec!(0));
    }

    #[test]
    fn market_order_against_empty_side() {
        let book = book(&[(dec!(100), dec!(1))], &[]);
        let placement = simulate(
            &order(OrderType::Market, OrderSide::Buy, None, dec!(1)),
            &book,
        )
        .unwrap();

        assert_eq!(placement.impact.estimated_fill_percentage, dec!(0));
        assert_eq!(placement.impact.average_fill_price, dec!(0));
        // Zero slippage here must be read with the 0% fill.
        assert_eq!(placement.impact.slippage_estimation, dec!(0));
        assert_eq!(placement.impact.market_impact, dec!(0));
        assert_eq!(placement.position.quantity, dec!(0));
    }

    #[test]
    fn market_order_spans_multiple_levels_with_slippage() {
        let book = book(&[], &[(dec!(101), dec!(2)), (dec!(103), dec!(2))]);
        let placement = simulate(
            &order(OrderType::Market, OrderSide::Buy, None, dec!(4)),
            &book,
        )
        .unwrap();

        // avg = (2*101 + 2*103) / 4 = 102, best ask 101.
        assert_eq!(placement.impact.average_fill_price, dec!(102));
        assert_eq!(placement.impact.slippage_estimation, dec!(1));
        assert_eq!(placement.impact.market_impact, dec!(100));
    }

    #[test]
    fn limit_buy_fully_crossing() {
        let book = book(&[], &[(dec!(101), dec!(2)), (dec!(102), dec!(3))]);
        let placement = simulate(
            &order(OrderType::Limit, OrderSide::Buy, Some(dec!(102)), dec!(4)),
            &book,
        )
        .unwrap();

        assert_eq!(placement.impact.total_value, dec!(406));
        assert_eq!(placement.impact.average_fill_price, dec!(101.5));
        assert_eq!(placement.impact.estimated_fill_percentage, dec!(100));
        assert_eq!(placement.impact.slippage_estimation, dec!(0.5));
    }

    #[test]
    fn limit_buy_bounded_by_price() {
        let book = book(&[], &[(dec!(101), dec!(2)), (dec!(102), dec!(3))]);
        let placement = simulate(
            &order(OrderType::Limit, OrderSide::Buy, Some(dec!(101)), dec!(4)),
            &book,
        )
        .unwrap();

        // Only the 101 level crosses.
        assert_eq!(placement.impact.estimated_fill_percentage, dec!(50));
        assert_eq!(placement.impact.total_value, dec!(202));
        // Exact price match at index 0 joins the existing level.
        assert_eq!(placement.position.level, Some(0));
        assert!(!placement.position.is_new_level);
    }

    #[test]
    fn limit_sell_non_crossing_rests() {
        let book = book(&[(dec!(99), dec!(5))], &[]);
        let placement = simulate(
            &order(OrderType::Limit, OrderSide::Sell, Some(dec!(105)), dec!(1)),
            &book,
        )
        .unwrap();

        assert_eq!(placement.impact.estimated_fill_percentage, dec!(0));
        assert_eq!(placement.impact.total_value, dec!(0));
        // Uncrossed: average falls back to the limit, so slippage is 0.
        assert_eq!(placement.impact.average_fill_price, dec!(105));
        assert_eq!(placement.impact.slippage_estimation, dec!(0));
        assert!(placement.position.is_new_level);
        assert_eq!(placement.position.level, Some(0));
        assert_eq!(placement.position.price, dec!(105));
        assert_eq!(placement.position.quantity, dec!(1));
    }

    #[test]
    fn limit_buy_below_book_appends_at_end() {
        let book = book(&[], &[(dec!(101), dec!(1)), (dec!(102), dec!(1))]);
        let placement = simulate(
            &order(OrderType::Limit, OrderSide::Buy, Some(dec!(200)), dec!(0.5)),
            &book,
        )
        .unwrap();
        // Every ask sits below 200, so no index satisfies price >= 200
        // and the insertion point is the end of the list.
        assert_eq!(placement.position.level, Some(2));
        assert!(placement.position.is_new_level);
        assert_eq!(placement.impact.estimated_fill_percentage, dec!(100));
    }

    #[test]
    fn limit_order_against_empty_side_appends_at_end() {
        let book = book(&[], &[]);
        let placement = simulate(
            &order(OrderType::Limit, OrderSide::Buy, Some(dec!(100)), dec!(1)),
            &book,
        )
        .unwrap();

        assert_eq!(placement.impact.estimated_fill_percentage, dec!(0));
        assert_eq!(placement.position.level, Some(0));
        assert!(placement.position.is_new_level);
    }

    #[test]
    fn limit_order_without_price_is_rejected() {
        let book = book(&[], &[(dec!(101), dec!(1))]);
        let result = simulate(&order(OrderType::Limit, OrderSide::Buy, None, dec!(1)), &book);
        assert_eq!(result, Err(SimulationError::MissingLimitPrice));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let book = book(&[], &[(dec!(101), dec!(1))]);
        let zero = simulate(&order(OrderType::Market, OrderSide::Buy, None, dec!(0)), &book);
        assert_eq!(zero, Err(SimulationError::NonPositiveQuantity(dec!(0))));

        let negative = simulate(
            &order(OrderType::Limit, OrderSide::Sell, Some(dec!(1)), dec!(-2)),
            &book,
        );
        assert_eq!(negative, Err(SimulationError::NonPositiveQuantity(dec!(-2))));
    }

    #[test]
    fn market_impact_counts_unconsumed_levels() {
        let book = book(&[], &[(dec!(101), dec!(2)), (dec!(102), dec!(6))]);
        let placement = simulate(
            &order(OrderType::Market, OrderSide::Buy, None, dec!(2)),
            &book,
        )
        .unwrap();
        // 2 of 8 visible = 25%.
        assert_eq!(placement.impact.market_impact, dec!(25));
    }

    #[test]
    fn time_to_fill_tiers_for_immediate_orders() {
        assert_eq!(
            time_to_fill_ms(FillTiming::Immediate, dec!(95), dec!(100)),
            FAST_FILL_MS
        );
        assert_eq!(
            time_to_fill_ms(FillTiming::Immediate, dec!(60), dec!(100)),
            PARTIAL_FILL_MS
        );
        assert_eq!(
            time_to_fill_ms(FillTiming::Immediate, dec!(10), dec!(100)),
            THIN_FILL_MS
        );
    }

    #[test]
    fn time_to_fill_tiers_for_delayed_orders() {
        assert_eq!(
            time_to_fill_ms(FillTiming::FiveSeconds, dec!(95), dec!(100)),
            5_000
        );
        assert_eq!(
            time_to_fill_ms(FillTiming::TenSeconds, dec!(60), dec!(100)),
            20_000
        );
        assert_eq!(
            time_to_fill_ms(FillTiming::ThirtySeconds, dec!(10), dec!(100)),
            300_000
        );
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(
            time_to_fill_ms(FillTiming::Immediate, dec!(90), dec!(100)),
            FAST_FILL_MS
        );
        assert_eq!(
            time_to_fill_ms(FillTiming::Immediate, dec!(50), dec!(100)),
            PARTIAL_FILL_MS
        );
    }

    #[test]
    fn simulate_is_reentrant_over_the_same_snapshot() {
        let book = book(&[(dec!(100), dec!(2))], &[(dec!(101), dec!(2))]);
        let sell = order(OrderType::Market, OrderSide::Sell, None, dec!(1));
        let first = simulate(&sell, &book).unwrap();
        let second = simulate(&sell, &book).unwrap();
        assert_eq!(first, second);
    }
}
