//! Bar — the OHLCV aggregate record the feed populates.

use super::{Exchange, Interval};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

/// OHLCV(+turnover+open-interest) aggregate over one time bucket of an
/// instrument, shaped the way the host platform stores it.
///
/// `datetime` carries the trading timezone: the feed attaches the zone to
/// the vendor's wall-clock value without shifting it. Numeric fields hold
/// the vendor's reported values; only a missing open interest is coerced
/// to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub symbol: String,
    pub exchange: Exchange,
    pub datetime: DateTime<Tz>,
    pub interval: Interval,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub turnover: f64,
    pub open_interest: f64,
    /// Data-origin tag, fixed per feed.
    pub gateway: String,
}

impl Bar {
    /// Host-style `SYMBOL.EXCHANGE` identifier.
    pub fn composite_symbol(&self) -> String {
        format!("{}.{}", self.symbol, self.exchange)
    }
}
