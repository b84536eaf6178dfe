//! Batch snapshot: recent minute bars for a whole instrument list in a
//! bounded number of vendor calls.

use crate::domain::{Bar, Exchange, Interval};
use crate::feed::observer::{FeedEvent, QueryKind};
use crate::feed::session::WindSession;
use crate::feed::{codec, decode, WindDatafeed, CHINA_TZ};
use chrono::{Duration, NaiveDateTime, Utc};
use polars::prelude::DataFrame;
use std::collections::{BTreeMap, HashMap};
use std::thread;

/// The vendor batch call is fixed at one-minute bars.
const BATCH_OPTIONS: &str = "BarSize=1;Fill=Previous";

impl<S: WindSession> WindDatafeed<S> {
    /// Fetch the last `lookback_days` of minute bars for every composite
    /// symbol at once.
    ///
    /// Returns one map per distinct timestamp, ascending, keyed by composite
    /// symbol. The vendor caps each call at `symbols × days ≤ chunk_budget`,
    /// so the code list is partitioned into chunks and each chunk retried up
    /// to `max_retries` times before it is dropped; an abandoned chunk only
    /// thins out the affected timestamps, it never fails the whole query.
    pub fn query_recent_bars(
        &self,
        symbols: &[String],
        lookback_days: u32,
        interval: Interval,
    ) -> Vec<HashMap<String, Bar>> {
        self.ensure_connected();
        if interval != Interval::Minute {
            self.emit(FeedEvent::UnsupportedQuery {
                kind: QueryKind::Snapshot,
                detail: format!("batch bars are fixed at 1-minute, got {}", interval),
            });
            return Vec::new();
        }

        let end = Utc::now().with_timezone(&CHINA_TZ).naive_local();
        let Some(start) = end.checked_sub_signed(Duration::days(i64::from(lookback_days))) else {
            self.emit(FeedEvent::UnsupportedQuery {
                kind: QueryKind::Snapshot,
                detail: format!("lookback of {lookback_days} days is out of range"),
            });
            return Vec::new();
        };

        // Vendor code → (symbol, exchange), plus the codes in first-seen
        // order. Duplicate composites collapse onto one vendor code.
        let mut reverse: HashMap<String, (String, Exchange)> = HashMap::new();
        let mut codes: Vec<String> = Vec::new();
        for composite in symbols {
            let Some((symbol, exchange)) = codec::split_composite(composite) else {
                self.emit(FeedEvent::SymbolSkipped {
                    symbol: composite.clone(),
                });
                continue;
            };
            let Some(code) = codec::wind_symbol(symbol, exchange) else {
                self.emit(FeedEvent::SymbolSkipped {
                    symbol: composite.clone(),
                });
                continue;
            };
            if reverse
                .insert(code.clone(), (symbol.to_string(), exchange))
                .is_none()
            {
                codes.push(code);
            }
        }

        let per_chunk = self.config.symbols_per_chunk(lookback_days);
        let mut grouped: BTreeMap<NaiveDateTime, HashMap<String, Bar>> = BTreeMap::new();
        for (index, chunk) in codes.chunks(per_chunk).enumerate() {
            let Some(frame) = self.fetch_chunk(index, chunk, start, end) else {
                continue;
            };
            match decode::batch_bars(&frame, &reverse) {
                Ok(rows) => {
                    for (when, bar) in rows {
                        grouped
                            .entry(when)
                            .or_default()
                            .insert(bar.composite_symbol(), bar);
                    }
                }
                Err(err) => {
                    self.emit(FeedEvent::DecodeFailed {
                        kind: QueryKind::Snapshot,
                        detail: err.to_string(),
                    });
                }
            }
        }
        grouped.into_values().collect()
    }

    /// One chunk call with bounded retries. `None` means the chunk was
    /// abandoned after `max_retries` failed retries.
    fn fetch_chunk(
        &self,
        chunk: usize,
        codes: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<DataFrame> {
        let joined = codes.join(",");
        let mut reply =
            self.session
                .intraday_series(&joined, codec::SNAPSHOT_FIELDS, start, end, BATCH_OPTIONS);
        let mut attempt = 0;
        while reply.is_error() {
            attempt += 1;
            if attempt > self.config.max_retries {
                self.emit(FeedEvent::ChunkAbandoned {
                    chunk,
                    code: reply.error_code,
                });
                return None;
            }
            self.emit(FeedEvent::ChunkRetry {
                chunk,
                attempt,
                code: reply.error_code,
            });
            thread::sleep(self.config.retry_delay());
            reply = self.session.intraday_series(
                &joined,
                codec::SNAPSHOT_FIELDS,
                start,
                end,
                BATCH_OPTIONS,
            );
        }
        Some(reply.frame)
    }
}
