//! Index composition: constituent weights joined with a live quote
//! snapshot, plus the share quantities derived from them.

use crate::feed::decode::{self, DecodeError};
use crate::feed::observer::{FeedEvent, QueryKind};
use crate::feed::session::WindSession;
use crate::feed::{codec, WindDatafeed, CHINA_TZ};
use chrono::{NaiveDate, Utc};
use polars::prelude::DataFrame;
use serde::Serialize;
use std::collections::HashMap;

/// One index member with its weight and the derived hedge quantities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexConstituent {
    /// Vendor code of the constituent.
    pub wind_code: String,
    /// Security display name, when the vendor supplies one.
    pub sec_name: Option<String>,
    /// Resolved vendor code of the index itself.
    pub index_code: String,
    /// Fractional index weight (the vendor reports percent).
    pub weight: f64,
    pub latest: f64,
    pub bid: f64,
    pub ask: f64,
    /// Index latest × weight ÷ constituent latest.
    pub divisor: f64,
    /// Contract share scale × divisor.
    pub shares: f64,
}

impl<S: WindSession> WindDatafeed<S> {
    /// Constituents of `index_symbol` as of `date` (today when `None`),
    /// keyed by host-style composite code.
    ///
    /// `index_symbol` takes either a vendor index code (`"000300.SH"`) or
    /// one of the futures aliases (`IF`/`IC`/`IM`/`IH`). The share scale is
    /// keyed off the caller's spelling before alias resolution: `IF` and
    /// `IH` carry 300 shares per point, everything else 200.
    pub fn query_index_composition(
        &self,
        index_symbol: &str,
        date: Option<NaiveDate>,
    ) -> HashMap<String, IndexConstituent> {
        self.ensure_connected();

        let scale = codec::share_scale(index_symbol);
        let index_code = codec::resolve_index_alias(index_symbol).to_string();
        let date = date.unwrap_or_else(|| Utc::now().with_timezone(&CHINA_TZ).date_naive());

        let options = format!("date={};windcode={}", date.format("%Y-%m-%d"), index_code);
        let reply = self.session.report_set("indexconstituent", &options);
        if reply.is_error() {
            self.emit(FeedEvent::QueryFailed {
                kind: QueryKind::IndexConstituents,
                code: reply.error_code,
            });
            return HashMap::new();
        }
        let members = match constituent_rows(&reply.frame) {
            Ok(rows) => rows,
            Err(err) => {
                self.emit(FeedEvent::DecodeFailed {
                    kind: QueryKind::IndexConstituents,
                    detail: err.to_string(),
                });
                return HashMap::new();
            }
        };

        // One snapshot for the index and every member; the index row anchors
        // the divisor math.
        let mut quote_codes = Vec::with_capacity(members.len() + 1);
        quote_codes.push(index_code.clone());
        quote_codes.extend(members.iter().map(|m| m.wind_code.clone()));
        let reply = self.session.snapshot_quotes(&quote_codes, codec::QUOTE_FIELDS);
        if reply.is_error() {
            self.emit(FeedEvent::QueryFailed {
                kind: QueryKind::Quotes,
                code: reply.error_code,
            });
            return HashMap::new();
        }
        let quotes = match quote_rows(&reply.frame) {
            Ok(quotes) => quotes,
            Err(err) => {
                self.emit(FeedEvent::DecodeFailed {
                    kind: QueryKind::Quotes,
                    detail: err.to_string(),
                });
                return HashMap::new();
            }
        };
        let Some(index_quote) = quotes.get(index_code.as_str()) else {
            self.emit(FeedEvent::DecodeFailed {
                kind: QueryKind::Quotes,
                detail: format!("no snapshot row for index {}", index_code),
            });
            return HashMap::new();
        };
        let index_latest = index_quote.latest;

        let mut composition = HashMap::with_capacity(members.len());
        for member in members {
            // A member the snapshot does not cover (suspension, fresh
            // listing) is dropped rather than poisoning the math with NaN.
            let Some(quote) = quotes.get(member.wind_code.as_str()) else {
                continue;
            };
            let weight = member.weight_percent / 100.0;
            let divisor = index_latest * weight / quote.latest;
            composition.insert(
                codec::host_code(&member.wind_code),
                IndexConstituent {
                    sec_name: member.sec_name,
                    index_code: index_code.clone(),
                    weight,
                    latest: quote.latest,
                    bid: quote.bid,
                    ask: quote.ask,
                    divisor,
                    shares: scale * divisor,
                    wind_code: member.wind_code,
                },
            );
        }
        composition
    }
}

struct ConstituentRow {
    wind_code: String,
    sec_name: Option<String>,
    weight_percent: f64,
}

fn constituent_rows(frame: &DataFrame) -> Result<Vec<ConstituentRow>, DecodeError> {
    let codes = decode::str_column(frame, "wind_code")?;
    let weights = decode::f64_column(frame, "i_weight")?;
    // sec_name is informational and not guaranteed by the dataset.
    let names = frame.column("sec_name").ok().and_then(|c| c.str().ok());

    let mut rows = Vec::with_capacity(frame.height());
    for i in 0..frame.height() {
        let Some(code) = codes.get(i) else {
            continue;
        };
        rows.push(ConstituentRow {
            wind_code: code.to_string(),
            sec_name: names.and_then(|n| n.get(i)).map(str::to_string),
            weight_percent: weights.get(i).unwrap_or(f64::NAN),
        });
    }
    Ok(rows)
}

#[derive(Debug)]
struct QuoteRow {
    latest: f64,
    bid: f64,
    ask: f64,
}

fn quote_rows(frame: &DataFrame) -> Result<HashMap<String, QuoteRow>, DecodeError> {
    let codes = decode::str_column(frame, "code")?;
    let latests = decode::f64_column(frame, "RT_LATEST")?;
    let bids = decode::f64_column(frame, "RT_BID1")?;
    let asks = decode::f64_column(frame, "RT_ASK1")?;

    let mut rows = HashMap::with_capacity(frame.height());
    for i in 0..frame.height() {
        let Some(code) = codes.get(i) else {
            continue;
        };
        rows.insert(
            code.to_string(),
            QuoteRow {
                latest: latests.get(i).unwrap_or(f64::NAN),
                bid: bids.get(i).unwrap_or(f64::NAN),
                ask: asks.get(i).unwrap_or(f64::NAN),
            },
        );
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn constituent_rows_tolerate_a_missing_name_column() {
        let frame = DataFrame::new(vec![
            Column::new("wind_code".into(), vec!["600519.SH", "000001.SZ"]),
            Column::new("i_weight".into(), vec![5.32, 0.64]),
        ])
        .unwrap();
        let rows = constituent_rows(&frame).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].wind_code, "600519.SH");
        assert_eq!(rows[0].sec_name, None);
        assert_eq!(rows[1].weight_percent, 0.64);
    }

    #[test]
    fn constituent_rows_carry_names_when_present() {
        let frame = DataFrame::new(vec![
            Column::new("wind_code".into(), vec!["600519.SH"]),
            Column::new("sec_name".into(), vec!["贵州茅台"]),
            Column::new("i_weight".into(), vec![5.32]),
        ])
        .unwrap();
        let rows = constituent_rows(&frame).unwrap();
        assert_eq!(rows[0].sec_name.as_deref(), Some("贵州茅台"));
    }

    #[test]
    fn quote_rows_key_by_vendor_code() {
        let frame = DataFrame::new(vec![
            Column::new("code".into(), vec!["000300.SH", "600519.SH"]),
            Column::new("RT_LATEST".into(), vec![4000.0, 1700.0]),
            Column::new("RT_BID1".into(), vec![3999.8, 1699.9]),
            Column::new("RT_ASK1".into(), vec![4000.2, 1700.1]),
        ])
        .unwrap();
        let quotes = quote_rows(&frame).unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes["600519.SH"].latest, 1700.0);
        assert_eq!(quotes["000300.SH"].ask, 4000.2);
    }

    #[test]
    fn quote_rows_need_the_uppercase_field_names() {
        let frame = DataFrame::new(vec![
            Column::new("code".into(), vec!["000300.SH"]),
            Column::new("rt_latest".into(), vec![4000.0]),
        ])
        .unwrap();
        let err = quote_rows(&frame).unwrap_err();
        assert!(matches!(err, DecodeError::MissingColumn(ref c) if c == "RT_LATEST"));
    }
}
