use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::error::ParseError;

/// Format of the `InvoiceDate` column, e.g. `2022-06-25 09:00`.
pub const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const MINUTES_PER_DAY: u32 = 24 * 60;

pub fn parse_invoice_timestamp(input: &str) -> Result<NaiveDateTime, ParseError> {
    let input = input.trim();
    NaiveDateTime::parse_from_str(input, INVOICE_DATE_FORMAT)
        .map_err(|_| ParseError::InvalidTimestamp(input.to_string()))
}

/// Calendar day of a timestamp, time-of-day discarded.
pub fn day_of(timestamp: &NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

/// Minutes elapsed since midnight.
pub fn minute_of_day(timestamp: &NaiveDateTime) -> u32 {
    timestamp.hour() * 60 + timestamp.minute()
}

/// Index of the intraday slot a timestamp falls into when the day is cut
/// into `slots` equal parts. Always `< slots` for `slots` in `1..=1440`.
pub fn slot_of_day(timestamp: &NaiveDateTime, slots: usize) -> usize {
    let slots = slots.clamp(1, MINUTES_PER_DAY as usize);
    minute_of_day(timestamp) as usize * slots / MINUTES_PER_DAY as usize
}
