//! Property tests for codec and config invariants.
//!
//! Uses proptest to verify:
//! 1. Chunk sizing — always at least one symbol, never over the vendor budget
//! 2. Name round trips — exchange and interval encodings invert cleanly
//! 3. Vendor symbols — suffix encoding recovers the exchange
//! 4. Localization — attaching the trading timezone never shifts the wall clock
//! 5. Host re-keying — only the venue suffix is translated

use chrono::{NaiveDate, NaiveTime, Timelike};
use proptest::prelude::*;
use std::str::FromStr;
use wind_datafeed::domain::{Exchange, Interval};
use wind_datafeed::feed::decode::localize;
use wind_datafeed::feed::{codec, FeedConfig};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_exchange() -> impl Strategy<Value = Exchange> {
    proptest::sample::select(Exchange::ALL.to_vec())
}

fn arb_interval() -> impl Strategy<Value = Interval> {
    proptest::sample::select(Interval::ALL.to_vec())
}

// ── 1. Chunk sizing ──────────────────────────────────────────────────

proptest! {
    /// The chunk size never hits zero (which would loop forever) and, except
    /// in the degraded single-symbol case, stays within the vendor budget.
    #[test]
    fn chunk_size_is_positive_and_within_budget(
        budget in 1u32..=1000,
        days in 0u32..=400,
    ) {
        let config = FeedConfig {
            chunk_budget: budget,
            ..FeedConfig::default()
        };
        let per_chunk = config.symbols_per_chunk(days);

        prop_assert!(per_chunk >= 1);
        if per_chunk > 1 {
            prop_assert!(per_chunk as u64 * u64::from(days.max(1)) <= u64::from(budget));
        }
    }
}

// ── 2. Name round trips ──────────────────────────────────────────────

proptest! {
    #[test]
    fn exchange_names_round_trip(exchange in arb_exchange()) {
        prop_assert_eq!(Exchange::from_str(exchange.as_str()).unwrap(), exchange);
    }

    #[test]
    fn interval_names_round_trip(interval in arb_interval()) {
        prop_assert_eq!(Interval::from_str(interval.as_str()).unwrap(), interval);
    }
}

// ── 3. Vendor symbols ────────────────────────────────────────────────

proptest! {
    /// Encoding a symbol for the vendor uppercases the stem and appends a
    /// suffix that maps back to the same exchange.
    #[test]
    fn vendor_symbol_recovers_the_exchange(
        sym in "[a-z]{1,6}[0-9]{0,4}",
        exchange in arb_exchange(),
    ) {
        prop_assume!(exchange != Exchange::Local);

        let code = codec::wind_symbol(&sym, exchange).unwrap();
        let (stem, suffix) = code.rsplit_once('.').unwrap();
        prop_assert_eq!(stem, sym.to_uppercase());
        prop_assert_eq!(codec::exchange_for_suffix(suffix), Some(exchange));
    }

    /// A host composite splits back into the symbol and exchange it was
    /// built from.
    #[test]
    fn composite_symbols_round_trip(
        sym in "[a-z]{1,6}[0-9]{0,4}",
        exchange in arb_exchange(),
    ) {
        let composite = format!("{sym}.{exchange}");
        let (parsed_sym, parsed_exchange) = codec::split_composite(&composite).unwrap();
        prop_assert_eq!(parsed_sym, sym.as_str());
        prop_assert_eq!(parsed_exchange, exchange);
    }

    /// The futures share scale is 300 for IF/IH exactly as spelled by the
    /// caller, 200 for everything else.
    #[test]
    fn share_scale_keys_off_the_spelling(sym in "[A-Z0-9.]{1,10}") {
        let expected = if sym == "IF" || sym == "IH" { 300.0 } else { 200.0 };
        prop_assert_eq!(codec::share_scale(&sym), expected);
    }
}

// ── 4. Localization ──────────────────────────────────────────────────

proptest! {
    /// Attaching the trading timezone preserves every wall-clock field; the
    /// vendor's naive timestamps are never shifted through UTC.
    #[test]
    fn localization_keeps_the_wall_clock(
        year in 2000i32..2035,
        ordinal in 1u32..=365,
        secs in 0u32..86_400,
    ) {
        let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
        let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap();
        let naive = date.and_time(time);

        let localized = localize(naive).unwrap();
        prop_assert_eq!(localized.naive_local(), naive);
        prop_assert_eq!(localized.hour(), naive.hour());
        prop_assert_eq!(localized.minute(), naive.minute());
    }
}

// ── 5. Host re-keying ────────────────────────────────────────────────

proptest! {
    /// Only the venue suffix is translated; the stem passes through even
    /// when it contains the letters SH or SZ.
    #[test]
    fn host_code_rewrites_only_the_suffix(stem in "[A-Z0-9]{4,8}") {
        prop_assert_eq!(codec::host_code(&format!("{stem}.SH")), format!("{stem}.SSE"));
        prop_assert_eq!(codec::host_code(&format!("{stem}.SZ")), format!("{stem}.SZSE"));
        prop_assert_eq!(codec::host_code(&format!("{stem}.CFE")), format!("{stem}.CFE"));
        prop_assert_eq!(codec::host_code(stem.as_str()), stem.clone());
    }
}
