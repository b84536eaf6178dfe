//! The Wind datafeed adapter.
//!
//! Translates between the host platform's request/record model and the
//! vendor's query/response model:
//! - Connection guard over the injected vendor session
//! - Symbol/exchange/interval codecs (static lookup tables)
//! - Query dispatch across the three vendor series shapes
//! - Frame decoding with timezone localization and missing-value policy
//! - Chunked batch snapshot fetch with bounded retry
//! - Index composition fetch with divisor/share derivation
//!
//! Public query entry points fail soft: vendor errors and malformed frames
//! surface as empty results plus a structured [`FeedEvent`], never as a
//! panic or error return.

pub mod codec;
pub mod config;
pub mod datafeed;
pub mod decode;
pub mod index;
pub mod observer;
pub mod session;
pub mod snapshot;

use crate::domain::{Bar, HistoryRequest, Tick};
use chrono_tz::Tz;
use serde::Serialize;

pub use config::{ConfigError, FeedConfig};
pub use datafeed::WindDatafeed;
pub use decode::DecodeError;
pub use index::IndexConstituent;
pub use observer::{FeedEvent, FeedObserver, NullObserver, QueryKind, StderrObserver};
pub use session::{WindReply, WindSession};

/// Trading timezone attached to every record timestamp.
///
/// The vendor reports naive wall-clock values; the feed attaches this zone
/// to them directly, with no UTC shift.
pub const CHINA_TZ: Tz = chrono_tz::Asia::Shanghai;

/// Gateway tag identifying the vendor as the data origin on every record.
pub const GATEWAY_NAME: &str = "WIND";

/// What a history query produced: bar records or tick records, depending on
/// the requested interval. Failed queries yield the empty variant for the
/// routed path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HistoryResult {
    Bars(Vec<Bar>),
    Ticks(Vec<Tick>),
}

impl HistoryResult {
    pub fn len(&self) -> usize {
        match self {
            HistoryResult::Bars(bars) => bars.len(),
            HistoryResult::Ticks(ticks) => ticks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The historical-data contract a pluggable feed implements for the host
/// platform.
///
/// `query_bar_history` is a host-compat alias; implementors only route
/// `query_history`.
pub trait Datafeed {
    /// Gateway name reported on every record this feed produces.
    fn name(&self) -> &str;

    /// Ensure the feed is ready to serve queries. Idempotent; `false` means
    /// the vendor session could not be started.
    fn init(&self) -> bool;

    /// Fetch history for one instrument, routed by the requested interval.
    fn query_history(&self, req: &HistoryRequest) -> HistoryResult;

    /// Alias of [`Datafeed::query_history`], kept for hosts that call the
    /// bar-specific name.
    fn query_bar_history(&self, req: &HistoryRequest) -> HistoryResult {
        self.query_history(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_result_len_covers_both_variants() {
        assert!(HistoryResult::Bars(Vec::new()).is_empty());
        assert!(HistoryResult::Ticks(Vec::new()).is_empty());
        assert_eq!(HistoryResult::Bars(Vec::new()).len(), 0);
    }

    /// The trait stays object-safe: hosts hold feeds as `&dyn Datafeed`.
    #[test]
    fn datafeed_trait_usable_as_object() {
        fn _check_trait_object_builds(feed: &dyn Datafeed, req: &HistoryRequest) -> HistoryResult {
            feed.query_bar_history(req)
        }
    }
}
