//! Offline demo: replays real-shaped venue frames through the adapters into
//! a book store, then simulates a market and a limit order against the
//! resulting books. No network involved.

use std::str::FromStr;

use bookstore::BookStore;
use model::{FillTiming, OrderSide, OrderType, Venue};
use rust_decimal::Decimal;
use simulation::{simulate, HypotheticalOrder};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Frames in arrival order, as each venue would deliver them: acks first,
/// then a snapshot, then deltas.
const FRAMES: &[(Venue, &str)] = &[
    (
        Venue::Okx,
        r#"{"event":"subscribe","arg":{"channel":"books","instId":"BTC-USDT"}}"#,
    ),
    (
        Venue::Okx,
        r#"{"arg":{"channel":"books","instId":"BTC-USDT"},"action":"snapshot","data":[{"bids":[["64000.5","1.2","0","3"],["64000.0","0.8","0","1"],["63999.5","2.5","0","4"]],"asks":[["64001.0","0.9","0","2"],["64001.5","1.1","0","2"],["64002.0","3.0","0","5"]],"ts":"1718000000000"}]}"#,
    ),
    (
        Venue::Okx,
        r#"{"arg":{"channel":"books","instId":"BTC-USDT"},"action":"update","data":[{"bids":[["64000.5","0","0","0"],["64000.2","1.4","0","2"]],"asks":[["64001.0","0.4","0","1"]],"ts":"1718000000100"}]}"#,
    ),
    (
        Venue::Bybit,
        r#"{"success":true,"ret_msg":"","conn_id":"demo","op":"subscribe"}"#,
    ),
    (
        Venue::Bybit,
        r#"{"topic":"orderbook.50.BTCUSDT","type":"snapshot","ts":1718000000050,"data":{"s":"BTCUSDT","b":[["64000.4","1.0"],["64000.1","2.2"]],"a":[["64000.9","0.7"],["64001.3","1.8"]],"u":100,"seq":1}}"#,
    ),
    (
        Venue::Bybit,
        r#"{"topic":"orderbook.50.BTCUSDT","type":"delta","ts":1718000000150,"data":{"s":"BTCUSDT","b":[["64000.4","0"]],"a":[["64000.8","0.5"]],"u":101,"seq":2}}"#,
    ),
    (
        Venue::Deribit,
        r#"{"jsonrpc":"2.0","id":1,"result":["book.BTC-PERPETUAL.100ms"]}"#,
    ),
    (
        Venue::Deribit,
        r#"{"jsonrpc":"2.0","method":"subscription","params":{"channel":"book.BTC-PERPETUAL.100ms","data":{"type":"snapshot","timestamp":1718000000070,"instrument_name":"BTC-PERPETUAL","change_id":1,"bids":[["new",63999.0,30],["new",63998.5,20]],"asks":[["new",64001.5,40],["new",64002.5,10]]}}}"#,
    ),
    (
        Venue::Deribit,
        r#"{"jsonrpc":"2.0","method":"subscription","params":{"channel":"book.BTC-PERPETUAL.100ms","data":{"type":"change","timestamp":1718000000170,"instrument_name":"BTC-PERPETUAL","change_id":2,"bids":[["delete",63998.5,0]],"asks":[["change",64001.5,25]]}}}"#,
    ),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let store = BookStore::new();

    for (venue, raw) in FRAMES {
        let parsed = connectors::parse(*venue, raw);
        let existing = match &parsed {
            connectors::ParsedUpdate::Replace(update) | connectors::ParsedUpdate::Merge(update) => {
                store.snapshot(*venue, &update.symbol)
            }
            connectors::ParsedUpdate::Ignore => None,
        };
        if let Some(book) = connectors::apply_update(*venue, parsed, existing.as_deref()) {
            info!(
                venue = %venue,
                symbol = %book.symbol,
                best_bid = ?book.best_bid().map(|l| l.price),
                best_ask = ?book.best_ask().map(|l| l.price),
                "book updated"
            );
            store.publish(book);
        }
    }

    info!(books = store.len(), "replay complete");

    let market_sell = HypotheticalOrder {
        venue: Venue::Okx,
        symbol: "BTC-USDT".to_string(),
        order_type: OrderType::Market,
        side: OrderSide::Sell,
        price: None,
        quantity: Decimal::from_str("2.0").expect("literal"),
        timing: FillTiming::Immediate,
    };
    let limit_buy = HypotheticalOrder {
        venue: Venue::Bybit,
        symbol: "BTCUSDT".to_string(),
        order_type: OrderType::Limit,
        side: OrderSide::Buy,
        price: Some(Decimal::from_str("64000.9").expect("literal")),
        quantity: Decimal::from_str("1.5").expect("literal"),
        timing: FillTiming::FiveSeconds,
    };

    for order in [market_sell, limit_buy] {
        let Some(book) = store.snapshot(order.venue, &order.symbol) else {
            warn!(venue = %order.venue, symbol = %order.symbol, "no book for order");
            continue;
        };
        match simulate(&order, &book) {
            Ok(placement) => info!(
                venue = %order.venue,
                side = ?order.side,
                order_type = ?order.order_type,
                fill_pct = %placement.impact.estimated_fill_percentage,
                avg_price = %placement.impact.average_fill_price,
                slippage = %placement.impact.slippage_estimation,
                impact_pct = %placement.impact.market_impact,
                time_to_fill_ms = ?placement.impact.time_to_fill_ms,
                resting_level = ?placement.position.level,
                "simulation result"
            ),
            Err(error) => warn!(%error, "invalid order"),
        }
    }
}
