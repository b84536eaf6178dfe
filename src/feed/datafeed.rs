//! The adapter itself: connection guard, interval routing, and the three
//! single-instrument query paths.
//!
//! Every public query is fails-soft: vendor errors, decode errors and
//! unsupported encodings yield an empty result plus one [`FeedEvent`],
//! never a panic or an error return.

use crate::domain::{Bar, HistoryRequest, Interval, Tick};
use crate::feed::observer::{FeedEvent, FeedObserver, NullObserver, QueryKind};
use crate::feed::session::WindSession;
use crate::feed::{codec, decode, Datafeed, FeedConfig, HistoryResult, GATEWAY_NAME};
use chrono::Duration;

/// Wind implementation of the host's [`Datafeed`] contract.
///
/// Owns the vendor session; diagnostics go to the injected observer and the
/// `log` facade.
pub struct WindDatafeed<S: WindSession> {
    pub(super) session: S,
    pub(super) observer: Box<dyn FeedObserver>,
    pub(super) config: FeedConfig,
}

impl<S: WindSession> WindDatafeed<S> {
    /// Adapter with no observer and default limits.
    pub fn new(session: S) -> Self {
        Self::with_observer(session, Box::new(NullObserver))
    }

    /// Adapter reporting swallowed failures to `observer`.
    pub fn with_observer(session: S, observer: Box<dyn FeedObserver>) -> Self {
        Self {
            session,
            observer,
            config: FeedConfig::default(),
        }
    }

    /// Replace the batch/retry limits.
    pub fn with_config(mut self, config: FeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the vendor session unless it is already live. Idempotent; a
    /// failed start emits `ConnectFailed` and returns false.
    pub fn ensure_connected(&self) -> bool {
        if self.session.is_connected() {
            return true;
        }
        let code = self.session.start();
        if code != 0 {
            self.emit(FeedEvent::ConnectFailed { code });
            return false;
        }
        log::debug!("wind session started");
        true
    }

    /// Alias of [`ensure_connected`](Self::ensure_connected), matching the
    /// property name hosts poll.
    pub fn inited(&self) -> bool {
        self.ensure_connected()
    }

    pub(super) fn emit(&self, event: FeedEvent) {
        log::warn!("wind datafeed: {:?}", event);
        self.observer.on_event(&event);
    }

    /// Minute/hour bars for one instrument.
    ///
    /// The vendor window is `[start, end + 1 day)`; the overrun compensates
    /// for the vendor's boundary ambiguity and must stay.
    pub fn query_intraday_bars(&self, req: &HistoryRequest) -> Vec<Bar> {
        self.ensure_connected();
        let Some(size) = codec::bar_size(req.interval) else {
            self.emit(FeedEvent::UnsupportedQuery {
                kind: QueryKind::Intraday,
                detail: format!("no vendor bar size for interval {}", req.interval),
            });
            return Vec::new();
        };
        let Some(code) = codec::wind_symbol(&req.symbol, req.exchange) else {
            self.emit(FeedEvent::UnsupportedQuery {
                kind: QueryKind::Intraday,
                detail: format!("no vendor suffix for exchange {}", req.exchange),
            });
            return Vec::new();
        };
        let options = format!("BarSize={size};Fill=Previous");
        let reply = self.session.intraday_series(
            &code,
            codec::BAR_FIELDS,
            req.start,
            req.end + Duration::days(1),
            &options,
        );
        if reply.is_error() {
            self.emit(FeedEvent::QueryFailed {
                kind: QueryKind::Intraday,
                code: reply.error_code,
            });
            return Vec::new();
        }
        match decode::intraday_bars(&reply.frame, req) {
            Ok(bars) => bars,
            Err(err) => {
                self.emit(FeedEvent::DecodeFailed {
                    kind: QueryKind::Intraday,
                    detail: err.to_string(),
                });
                Vec::new()
            }
        }
    }

    /// Daily bars for one instrument, stamped at midnight.
    pub fn query_daily_bars(&self, req: &HistoryRequest) -> Vec<Bar> {
        self.ensure_connected();
        let Some(code) = codec::wind_symbol(&req.symbol, req.exchange) else {
            self.emit(FeedEvent::UnsupportedQuery {
                kind: QueryKind::Daily,
                detail: format!("no vendor suffix for exchange {}", req.exchange),
            });
            return Vec::new();
        };
        let reply = self.session.daily_series(
            &code,
            codec::BAR_FIELDS,
            req.start,
            req.end + Duration::days(1),
            "Fill=Previous",
        );
        if reply.is_error() {
            self.emit(FeedEvent::QueryFailed {
                kind: QueryKind::Daily,
                code: reply.error_code,
            });
            return Vec::new();
        }
        match decode::daily_bars(&reply.frame, req) {
            Ok(bars) => bars,
            Err(err) => {
                self.emit(FeedEvent::DecodeFailed {
                    kind: QueryKind::Daily,
                    detail: err.to_string(),
                });
                Vec::new()
            }
        }
    }

    /// Tick history with five levels of depth for one instrument.
    pub fn query_ticks(&self, req: &HistoryRequest) -> Vec<Tick> {
        self.ensure_connected();
        let Some(code) = codec::wind_symbol(&req.symbol, req.exchange) else {
            // The local pseudo-venue carries no vendor series; the answer
            // is an empty set, not an error.
            return Vec::new();
        };
        let reply = self.session.tick_series(
            &code,
            codec::TICK_FIELDS,
            req.start,
            req.end + Duration::days(1),
        );
        if reply.is_error() {
            self.emit(FeedEvent::QueryFailed {
                kind: QueryKind::Tick,
                code: reply.error_code,
            });
            return Vec::new();
        }
        match decode::ticks(&reply.frame, req) {
            Ok(ticks) => ticks,
            Err(err) => {
                self.emit(FeedEvent::DecodeFailed {
                    kind: QueryKind::Tick,
                    detail: err.to_string(),
                });
                Vec::new()
            }
        }
    }
}

impl<S: WindSession> Datafeed for WindDatafeed<S> {
    fn name(&self) -> &str {
        GATEWAY_NAME
    }

    fn init(&self) -> bool {
        self.ensure_connected()
    }

    fn query_history(&self, req: &HistoryRequest) -> HistoryResult {
        match req.interval {
            Interval::Tick => HistoryResult::Ticks(self.query_ticks(req)),
            Interval::Daily => HistoryResult::Bars(self.query_daily_bars(req)),
            _ => HistoryResult::Bars(self.query_intraday_bars(req)),
        }
    }
}
