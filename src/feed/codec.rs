//! Static lookup tables between host identifiers and vendor encodings.
//!
//! Everything here is fixed data: exchange suffixes, bar-size strings,
//! field lists, the canonical tick column set, and the futures-index alias
//! table. The tables are exercised exhaustively in the tests below.

use crate::domain::{Exchange, Interval};

/// Host exchange ↔ vendor code suffix. `Exchange::Local` is deliberately
/// absent: the vendor cannot serve the host's pseudo-venue.
pub const EXCHANGE_SUFFIXES: [(Exchange, &str); 8] = [
    (Exchange::Sse, "SH"),
    (Exchange::Szse, "SZ"),
    (Exchange::Cffex, "CFE"),
    (Exchange::Shfe, "SHF"),
    (Exchange::Czce, "CZC"),
    (Exchange::Dce, "DCE"),
    (Exchange::Ine, "INE"),
    (Exchange::Gfex, "GFE"),
];

/// Vendor suffix for a host exchange, `None` when the venue has no vendor
/// encoding.
pub fn vendor_suffix(exchange: Exchange) -> Option<&'static str> {
    EXCHANGE_SUFFIXES
        .iter()
        .find(|(e, _)| *e == exchange)
        .map(|(_, suffix)| *suffix)
}

/// Host exchange for a vendor suffix.
pub fn exchange_for_suffix(suffix: &str) -> Option<Exchange> {
    EXCHANGE_SUFFIXES
        .iter()
        .find(|(_, s)| *s == suffix)
        .map(|(exchange, _)| *exchange)
}

/// Vendor bar-size string. Minute and hour only; daily and tick use
/// dedicated query shapes, and weekly has no vendor encoding at all.
pub fn bar_size(interval: Interval) -> Option<&'static str> {
    match interval {
        Interval::Minute => Some("1"),
        Interval::Hour => Some("60"),
        _ => None,
    }
}

/// Vendor code for a host instrument: `UPPERCASE(symbol).SUFFIX`.
pub fn wind_symbol(symbol: &str, exchange: Exchange) -> Option<String> {
    vendor_suffix(exchange).map(|suffix| format!("{}.{}", symbol.to_uppercase(), suffix))
}

/// Split a host composite `SYMBOL.EXCHANGE` at its last dot.
pub fn split_composite(composite: &str) -> Option<(&str, Exchange)> {
    let (symbol, code) = composite.rsplit_once('.')?;
    if symbol.is_empty() {
        return None;
    }
    let exchange = code.parse().ok()?;
    Some((symbol, exchange))
}

/// Host-style code from a vendor code, by suffix translation only. Codes
/// with an unmapped or missing suffix pass through unchanged — this is not
/// a full exchange-table lookup.
pub fn host_code(wind_code: &str) -> String {
    match wind_code.rsplit_once('.') {
        Some((symbol, "SH")) => format!("{symbol}.SSE"),
        Some((symbol, "SZ")) => format!("{symbol}.SZSE"),
        _ => wind_code.to_string(),
    }
}

/// Field list for the single-symbol bar queries.
pub const BAR_FIELDS: &str = "open,high,low,close,volume,amt,oi";

/// Trimmed field list for the batch snapshot path.
pub const SNAPSHOT_FIELDS: &str = "open,high,low,close,volume";

/// Quote fields for the index composition snapshot.
pub const QUOTE_FIELDS: &str = "rt_latest,rt_bid1,rt_ask1";

/// Tick request fields, in the column order the vendor returns.
pub const TICK_FIELDS: &str = "open,high,low,last,pre_close,volume,amt,oi,limit_up,limit_down,\
    bid1,bid2,bid3,bid4,bid5,ask1,ask2,ask3,ask4,ask5,\
    bsize1,bsize2,bsize3,bsize4,bsize5,asize1,asize2,asize3,asize4,asize5";

/// Canonical tick column names, positionally matching [`TICK_FIELDS`]:
/// ten scalar fields, then bid prices, ask prices, bid sizes, ask sizes,
/// five levels each.
pub const TICK_COLUMNS: [&str; 30] = [
    "open",
    "high",
    "low",
    "last",
    "prev_close",
    "volume",
    "total_turnover",
    "open_interest",
    "limit_up",
    "limit_down",
    "b1",
    "b2",
    "b3",
    "b4",
    "b5",
    "a1",
    "a2",
    "a3",
    "a4",
    "a5",
    "b1_v",
    "b2_v",
    "b3_v",
    "b4_v",
    "b5_v",
    "a1_v",
    "a2_v",
    "a3_v",
    "a4_v",
    "a5_v",
];

/// Futures-index aliases to their underlying vendor index codes.
pub const INDEX_ALIASES: [(&str, &str); 4] = [
    ("IF", "000300.SH"),
    ("IC", "000905.SH"),
    ("IM", "000852.SH"),
    ("IH", "000016.SH"),
];

/// Resolve a known index alias; anything else passes through as a vendor
/// code already.
pub fn resolve_index_alias(symbol: &str) -> &str {
    INDEX_ALIASES
        .iter()
        .find(|(alias, _)| *alias == symbol)
        .map(|(_, code)| *code)
        .unwrap_or(symbol)
}

/// Per-index-family share scale. Decided on the caller-supplied spelling,
/// before alias resolution: passing a resolved code directly always scales
/// at 200.
pub fn share_scale(caller_symbol: &str) -> f64 {
    if caller_symbol == "IF" || caller_symbol == "IH" {
        300.0
    } else {
        200.0
    }
}
