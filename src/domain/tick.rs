//! Tick — the point-in-time market snapshot record with book depth.

use super::Exchange;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

/// Order-book depth levels carried on a tick.
pub const DEPTH: usize = 5;

/// One market snapshot: last trade, day aggregates, price limits, and five
/// levels of bid/ask depth.
///
/// Depth level 1 sits at index 0 of each array. The feed reads missing
/// vendor cells as zero, so an instrument quoted to fewer than five levels
/// carries zeros in the unquoted slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub symbol: String,
    pub exchange: Exchange,
    pub datetime: DateTime<Tz>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub last: f64,
    pub prev_close: f64,
    pub volume: f64,
    pub turnover: f64,
    pub open_interest: f64,
    pub limit_up: f64,
    pub limit_down: f64,
    pub bid_price: [f64; DEPTH],
    pub ask_price: [f64; DEPTH],
    pub bid_volume: [f64; DEPTH],
    pub ask_volume: [f64; DEPTH],
    /// Data-origin tag, fixed per feed.
    pub gateway: String,
}

impl Tick {
    /// Host-style `SYMBOL.EXCHANGE` identifier.
    pub fn composite_symbol(&self) -> String {
        format!("{}.{}", self.symbol, self.exchange)
    }

    /// Best bid (depth level 1).
    pub fn best_bid(&self) -> f64 {
        self.bid_price[0]
    }

    /// Best ask (depth level 1).
    pub fn best_ask(&self) -> f64 {
        self.ask_price[0]
    }
}
