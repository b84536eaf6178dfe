//! Wind Datafeed — market-data adapter for the Wind quant terminal.
//!
//! This crate plugs the Wind vendor API into a trading platform's
//! pluggable datafeed contract:
//! - Host domain types (exchanges, intervals, bar/tick/request records)
//! - An injected vendor session trait answering with tabular frames
//! - Interval-routed history queries that fail soft into empty results
//! - Frame decoding with wall-clock timezone localization
//! - Chunked batch snapshot of recent minute bars with bounded retry
//! - Index composition with weight, divisor and share derivation

pub mod domain;
pub mod feed;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything a host worker thread moves around is
    /// Send, and the passive records are Sync too.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain records
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Tick>();
        require_sync::<domain::Tick>();
        require_send::<domain::HistoryRequest>();
        require_sync::<domain::HistoryRequest>();
        require_send::<domain::Exchange>();
        require_sync::<domain::Exchange>();
        require_send::<domain::Interval>();
        require_sync::<domain::Interval>();
        require_send::<domain::UnknownExchange>();
        require_send::<domain::UnknownInterval>();

        // Feed plumbing
        require_send::<feed::FeedConfig>();
        require_sync::<feed::FeedConfig>();
        require_send::<feed::FeedEvent>();
        require_sync::<feed::FeedEvent>();
        require_send::<feed::WindReply>();
        require_sync::<feed::WindReply>();
        require_send::<feed::HistoryResult>();
        require_sync::<feed::HistoryResult>();

        // The adapter moves into worker threads whole; this must hold for
        // any session implementation, not just the ones the tests use.
        #[allow(dead_code)]
        fn adapter_is_send<S: feed::WindSession>() {
            require_send::<feed::WindDatafeed<S>>();
        }
    }

    /// Observers are injected as trait objects; the trait must stay
    /// object-safe.
    #[test]
    fn observer_trait_usable_as_object() {
        fn _check_trait_object_builds(observer: &dyn feed::FeedObserver, event: &feed::FeedEvent) {
            observer.on_event(event);
        }
    }
}
