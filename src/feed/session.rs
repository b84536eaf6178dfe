//! Vendor session seam.
//!
//! `WindSession` abstracts the vendor's client library (session lifecycle
//! plus the query functions this feed consumes) so the adapter can be
//! driven by a real transport in production and a scripted double in tests.
//! The vendor client itself — connection plumbing, RPC semantics — is the
//! implementor's concern.

use chrono::NaiveDateTime;
use polars::prelude::DataFrame;

/// One vendor response: an error code plus the tabular payload.
#[derive(Debug, Clone)]
pub struct WindReply {
    /// Vendor error code; zero means success.
    pub error_code: i32,
    /// Tabular payload; empty when the call failed.
    pub frame: DataFrame,
}

impl WindReply {
    /// Successful reply carrying `frame`.
    pub fn ok(frame: DataFrame) -> Self {
        Self {
            error_code: 0,
            frame,
        }
    }

    /// Failed reply with the vendor's non-zero `code` and an empty frame.
    pub fn error(code: i32) -> Self {
        Self {
            error_code: code,
            frame: DataFrame::empty(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_code != 0
    }
}

/// The outbound vendor contract, injected at adapter construction.
///
/// Series frames carry the vendor's row index as a leading `"time"` column
/// of naive millisecond datetimes; a null time marks the vendor's
/// occasional trailing label row and is skipped by the decoders. Beyond
/// that, each shape has its own column convention:
///
/// - [`intraday_series`](WindSession::intraday_series): a `windcode` string
///   column (present even for single-code calls) plus `open, high, low,
///   close, volume, amount, position` floats — the vendor renames the
///   requested `amt`/`oi` fields.
/// - [`daily_series`](WindSession::daily_series): uppercase `OPEN, HIGH,
///   LOW, CLOSE, VOLUME, AMT, OI` floats.
/// - [`tick_series`](WindSession::tick_series): exactly 30 data columns
///   after `"time"`, in request-field order; the decoder renames them
///   positionally.
/// - [`report_set`](WindSession::report_set) with `"indexconstituent"`:
///   `wind_code` (string), `i_weight` (float), optionally `sec_name`.
/// - [`snapshot_quotes`](WindSession::snapshot_quotes): `code` (string)
///   plus `RT_LATEST, RT_BID1, RT_ASK1` floats.
pub trait WindSession: Send {
    /// Whether the vendor session is currently live.
    fn is_connected(&self) -> bool;

    /// Start the session. Returns the vendor error code, zero on success.
    fn start(&self) -> i32;

    /// Intraday bar series for one or more comma-joined vendor codes.
    fn intraday_series(
        &self,
        codes: &str,
        fields: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        options: &str,
    ) -> WindReply;

    /// Daily bar series for one vendor code.
    fn daily_series(
        &self,
        codes: &str,
        fields: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        options: &str,
    ) -> WindReply;

    /// Tick series for one vendor code.
    fn tick_series(
        &self,
        codes: &str,
        fields: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> WindReply;

    /// Dataset report query (constituent lists and the like).
    fn report_set(&self, report: &str, options: &str) -> WindReply;

    /// Real-time quote snapshot for a set of vendor codes.
    fn snapshot_quotes(&self, codes: &[String], fields: &str) -> WindReply;
}
