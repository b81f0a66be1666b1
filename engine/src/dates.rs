//! FILENAME: engine/src/dates.rs
//! Epoch-millisecond date helpers shared by filtering and aggregation.
//!
//! All range comparisons in the engines are done in epoch milliseconds so
//! that a single pair of bounds covers date-only and datetime records alike.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Milliseconds from midnight to 23:59:59.999 of the same day.
/// Added to a day's start to make end-of-range bounds inclusive.
pub const END_OF_DAY_OFFSET_MS: i64 = 86_399_999;

/// Epoch milliseconds at 00:00:00.000 UTC of the given date.
pub fn start_of_day_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Epoch milliseconds at 23:59:59.999 UTC of the given date.
///
/// Computed as midnight plus a fixed offset so that a record stamped
/// anywhere within the end date still matches an inclusive range filter.
pub fn end_of_day_ms(date: NaiveDate) -> i64 {
    start_of_day_ms(date) + END_OF_DAY_OFFSET_MS
}

/// Epoch milliseconds of a datetime.
pub fn epoch_ms(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}
