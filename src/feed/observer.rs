//! Structured diagnostics for swallowed failures.
//!
//! The query entry points fail soft — empty results, never errors — so an
//! injected observer is the only way callers can distinguish "genuinely
//! empty" from "vendor error". Every swallowed failure emits exactly one
//! [`FeedEvent`].

use serde::{Deserialize, Serialize};

/// Which vendor query shape an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryKind {
    Intraday,
    Daily,
    Tick,
    Snapshot,
    IndexConstituents,
    Quotes,
}

/// One swallowed failure, with enough payload to act on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedEvent {
    /// The vendor session failed to start.
    ConnectFailed { code: i32 },

    /// The vendor answered a query with a non-zero error code.
    QueryFailed { kind: QueryKind, code: i32 },

    /// The vendor's reply frame did not match its column convention.
    DecodeFailed { kind: QueryKind, detail: String },

    /// The request has no vendor encoding (Weekly interval, Local venue…).
    UnsupportedQuery { kind: QueryKind, detail: String },

    /// A batch chunk errored and is about to be retried.
    ChunkRetry { chunk: usize, attempt: u32, code: i32 },

    /// A batch chunk exhausted its retries and was dropped.
    ChunkAbandoned { chunk: usize, code: i32 },

    /// A malformed composite symbol was dropped from a batch request.
    SymbolSkipped { symbol: String },
}

/// Sink for [`FeedEvent`]s, injected at adapter construction.
pub trait FeedObserver: Send {
    fn on_event(&self, event: &FeedEvent);
}

/// Discards every event. The default when no observer is wired.
pub struct NullObserver;

impl FeedObserver for NullObserver {
    fn on_event(&self, _event: &FeedEvent) {}
}

/// Writes each event as one JSON line on stderr.
pub struct StderrObserver;

impl FeedObserver for StderrObserver {
    fn on_event(&self, event: &FeedEvent) {
        let line = serde_json::to_string(event).expect("FeedEvent serialization failed");
        eprintln!("{line}");
    }
}
