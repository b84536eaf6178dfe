//! Vendor frame decoding into host records.
//!
//! Each decoder takes one reply frame and the request that produced it,
//! validates the shape the session contract promises, and builds records
//! row by row. Rules shared across the series decoders:
//!
//! - a null `"time"` cell marks the vendor's trailing label row → skip it
//! - timestamps are naive wall clocks → attach the trading timezone, no shift
//! - a null/NaN open interest reads as exactly zero; other values pass
//!   through unrounded

use crate::domain::{Bar, Exchange, HistoryRequest, Interval, Tick, DEPTH};
use crate::feed::{codec, CHINA_TZ, GATEWAY_NAME};
use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use polars::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

/// Failures while translating a vendor frame into host records.
///
/// These never cross the adapter boundary: the query layer converts them
/// into an empty result plus a `DecodeFailed` event.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("column '{column}' has the wrong type: {source}")]
    ColumnType {
        column: String,
        source: PolarsError,
    },

    #[error("tick frame has {found} columns, expected {expected}")]
    TickShape { expected: usize, found: usize },

    #[error("millisecond timestamp {0} is out of range")]
    OutOfRangeTime(i64),

    #[error("wall-clock time {0} does not exist in the trading timezone")]
    UnrepresentableTime(NaiveDateTime),
}

/// Attach the trading timezone to a vendor wall-clock value. The hour and
/// minute of the result equal the input's — no UTC conversion.
pub fn localize(naive: NaiveDateTime) -> Result<DateTime<Tz>, DecodeError> {
    CHINA_TZ
        .from_local_datetime(&naive)
        .earliest()
        .ok_or(DecodeError::UnrepresentableTime(naive))
}

/// Decode an intraday series frame into minute/hour bars.
pub fn intraday_bars(frame: &DataFrame, req: &HistoryRequest) -> Result<Vec<Bar>, DecodeError> {
    let times = time_column(frame)?;
    let opens = f64_column(frame, "open")?;
    let highs = f64_column(frame, "high")?;
    let lows = f64_column(frame, "low")?;
    let closes = f64_column(frame, "close")?;
    let volumes = f64_column(frame, "volume")?;
    let amounts = f64_column(frame, "amount")?;
    let positions = f64_column(frame, "position")?;

    let mut bars = Vec::with_capacity(frame.height());
    for i in 0..frame.height() {
        let Some(naive) = naive_time(times, i)? else {
            continue;
        };
        bars.push(Bar {
            symbol: req.symbol.clone(),
            exchange: req.exchange,
            datetime: localize(naive)?,
            interval: req.interval,
            open: value(opens, i),
            high: value(highs, i),
            low: value(lows, i),
            close: value(closes, i),
            volume: value(volumes, i),
            turnover: value(amounts, i),
            open_interest: zero_if_missing(positions.get(i)),
            gateway: GATEWAY_NAME.to_string(),
        });
    }
    Ok(bars)
}

/// Decode a daily series frame. The vendor reports daily rows with
/// uppercase column names and session-close timestamps; record times are
/// truncated to the calendar date at midnight.
pub fn daily_bars(frame: &DataFrame, req: &HistoryRequest) -> Result<Vec<Bar>, DecodeError> {
    let times = time_column(frame)?;
    let opens = f64_column(frame, "OPEN")?;
    let highs = f64_column(frame, "HIGH")?;
    let lows = f64_column(frame, "LOW")?;
    let closes = f64_column(frame, "CLOSE")?;
    let volumes = f64_column(frame, "VOLUME")?;
    let amounts = f64_column(frame, "AMT")?;
    let open_interests = f64_column(frame, "OI")?;

    let mut bars = Vec::with_capacity(frame.height());
    for i in 0..frame.height() {
        let Some(naive) = naive_time(times, i)? else {
            continue;
        };
        let midnight = naive.date().and_time(NaiveTime::MIN);
        bars.push(Bar {
            symbol: req.symbol.clone(),
            exchange: req.exchange,
            datetime: localize(midnight)?,
            interval: req.interval,
            open: value(opens, i),
            high: value(highs, i),
            low: value(lows, i),
            close: value(closes, i),
            volume: value(volumes, i),
            turnover: value(amounts, i),
            open_interest: zero_if_missing(open_interests.get(i)),
            gateway: GATEWAY_NAME.to_string(),
        });
    }
    Ok(bars)
}

/// Decode a tick series frame.
///
/// The vendor returns 30 data columns after `"time"` in request-field
/// order; they are renamed positionally to the canonical set, every cell
/// is read as float, and null/NaN cells read as zero.
pub fn ticks(frame: &DataFrame, req: &HistoryRequest) -> Result<Vec<Tick>, DecodeError> {
    let expected = codec::TICK_COLUMNS.len() + 1;
    if frame.width() != expected {
        return Err(DecodeError::TickShape {
            expected,
            found: frame.width(),
        });
    }
    let times = time_column(frame)?;

    let mut data: Vec<Float64Chunked> = Vec::with_capacity(codec::TICK_COLUMNS.len());
    for (slot, column) in frame
        .get_columns()
        .iter()
        .filter(|c| c.name().as_str() != "time")
        .enumerate()
    {
        let cast = column
            .cast(&DataType::Float64)
            .map_err(|source| DecodeError::ColumnType {
                column: codec::TICK_COLUMNS[slot].to_string(),
                source,
            })?;
        data.push(
            cast.f64()
                .map_err(|source| DecodeError::ColumnType {
                    column: codec::TICK_COLUMNS[slot].to_string(),
                    source,
                })?
                .clone(),
        );
    }

    // Canonical layout: ten scalar fields, then four blocks of five depth
    // levels (bid price, ask price, bid size, ask size).
    const SCALARS: usize = 10;

    let mut ticks = Vec::with_capacity(frame.height());
    for i in 0..frame.height() {
        let Some(naive) = naive_time(times, i)? else {
            continue;
        };
        ticks.push(Tick {
            symbol: req.symbol.clone(),
            exchange: req.exchange,
            datetime: localize(naive)?,
            open: cell(&data[0], i),
            high: cell(&data[1], i),
            low: cell(&data[2], i),
            last: cell(&data[3], i),
            prev_close: cell(&data[4], i),
            volume: cell(&data[5], i),
            turnover: cell(&data[6], i),
            open_interest: cell(&data[7], i),
            limit_up: cell(&data[8], i),
            limit_down: cell(&data[9], i),
            bid_price: depth(&data, SCALARS, i),
            ask_price: depth(&data, SCALARS + DEPTH, i),
            bid_volume: depth(&data, SCALARS + 2 * DEPTH, i),
            ask_volume: depth(&data, SCALARS + 3 * DEPTH, i),
            gateway: GATEWAY_NAME.to_string(),
        });
    }
    Ok(ticks)
}

/// Decode one batch snapshot frame into `(wall clock, bar)` rows.
///
/// Rows are mapped back to host instruments through `reverse` (vendor code
/// → symbol/exchange); codes outside the map are skipped. The batch field
/// list omits turnover and open interest, so those record fields are zero.
pub fn batch_bars(
    frame: &DataFrame,
    reverse: &HashMap<String, (String, Exchange)>,
) -> Result<Vec<(NaiveDateTime, Bar)>, DecodeError> {
    let times = time_column(frame)?;
    let codes = str_column(frame, "windcode")?;
    let opens = f64_column(frame, "open")?;
    let highs = f64_column(frame, "high")?;
    let lows = f64_column(frame, "low")?;
    let closes = f64_column(frame, "close")?;
    let volumes = f64_column(frame, "volume")?;

    let mut rows = Vec::with_capacity(frame.height());
    for i in 0..frame.height() {
        let Some(naive) = naive_time(times, i)? else {
            continue;
        };
        let Some((symbol, exchange)) = codes.get(i).and_then(|code| reverse.get(code)) else {
            continue;
        };
        rows.push((
            naive,
            Bar {
                symbol: symbol.clone(),
                exchange: *exchange,
                datetime: localize(naive)?,
                interval: Interval::Minute,
                open: value(opens, i),
                high: value(highs, i),
                low: value(lows, i),
                close: value(closes, i),
                volume: value(volumes, i),
                turnover: 0.0,
                open_interest: 0.0,
                gateway: GATEWAY_NAME.to_string(),
            },
        ));
    }
    Ok(rows)
}

// ── Column access helpers ───────────────────────────────────────────

pub(super) fn column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column, DecodeError> {
    frame
        .column(name)
        .map_err(|_| DecodeError::MissingColumn(name.to_string()))
}

pub(super) fn f64_column<'a>(
    frame: &'a DataFrame,
    name: &str,
) -> Result<&'a Float64Chunked, DecodeError> {
    column(frame, name)?
        .f64()
        .map_err(|source| DecodeError::ColumnType {
            column: name.to_string(),
            source,
        })
}

pub(super) fn str_column<'a>(
    frame: &'a DataFrame,
    name: &str,
) -> Result<&'a StringChunked, DecodeError> {
    column(frame, name)?
        .str()
        .map_err(|source| DecodeError::ColumnType {
            column: name.to_string(),
            source,
        })
}

fn time_column(frame: &DataFrame) -> Result<&DatetimeChunked, DecodeError> {
    column(frame, "time")?
        .datetime()
        .map_err(|source| DecodeError::ColumnType {
            column: "time".to_string(),
            source,
        })
}

/// Millisecond cell to a naive wall clock; `Ok(None)` for the vendor's
/// trailing label row (null time).
fn naive_time(times: &DatetimeChunked, i: usize) -> Result<Option<NaiveDateTime>, DecodeError> {
    match times.get(i) {
        None => Ok(None),
        Some(ms) => DateTime::from_timestamp_millis(ms)
            .map(|dt| Some(dt.naive_utc()))
            .ok_or(DecodeError::OutOfRangeTime(ms)),
    }
}

/// The vendor's value as-is; a null cell reads as NaN.
fn value(values: &Float64Chunked, i: usize) -> f64 {
    values.get(i).unwrap_or(f64::NAN)
}

/// Null and NaN read as exactly zero.
fn zero_if_missing(cell: Option<f64>) -> f64 {
    match cell {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Tick cells share the zero policy for every field.
fn cell(values: &Float64Chunked, i: usize) -> f64 {
    zero_if_missing(values.get(i))
}

/// One five-level depth block starting at `offset` in the canonical layout.
fn depth(data: &[Float64Chunked], offset: usize, row: usize) -> [f64; DEPTH] {
    std::array::from_fn(|level| cell(&data[offset + level], row))
}
