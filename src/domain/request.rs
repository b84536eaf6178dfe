//! History request — the normalized query the host hands to a datafeed.

use super::{Exchange, Interval};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One historical-data query: which instrument, at what granularity, over
/// which time range.
///
/// Start and end are naive wall-clock values in the trading timezone; the
/// feed decides how to widen and encode them for the vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub symbol: String,
    pub exchange: Exchange,
    pub interval: Interval,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl HistoryRequest {
    pub fn new(
        symbol: impl Into<String>,
        exchange: Exchange,
        interval: Interval,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            exchange,
            interval,
            start,
            end,
        }
    }

    /// Host-style `SYMBOL.EXCHANGE` identifier.
    pub fn composite_symbol(&self) -> String {
        format!("{}.{}", self.symbol, self.exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn request_serialization_roundtrip() {
        let req = HistoryRequest::new(
            "IF2203",
            Exchange::Cffex,
            Interval::Minute,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 30, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(15, 0, 0).unwrap(),
        );

        let json = serde_json::to_string(&req).unwrap();
        let back: HistoryRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, back);
        assert_eq!(back.composite_symbol(), "IF2203.CFFEX");
    }
}
