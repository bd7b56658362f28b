//! Placement of calendar days on a year grid: one column per week, one row
//! per weekday, weeks starting on Monday.

use chrono::{Datelike, NaiveDate};

/// Week columns a year grid shows by default.
pub const WEEK_COLUMNS: u32 = 53;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Number of Mondays in `(Jan 1, date]` of the date's year.
///
/// Jan 1 is always column 0. The first Monday after Jan 1 opens column 1.
pub fn week_index_within_year(date: NaiveDate) -> u32 {
    let jan_first = date.with_ordinal(1).unwrap_or(date);
    let offset = jan_first.weekday().num_days_from_monday();
    (date.ordinal0() + offset) / 7
}

/// Monday = 0 ... Sunday = 6.
pub fn day_of_week_row(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

/// Date drawn at (`week`, `row`) of the `year` grid, `None` for the empty
/// slots before Jan 1 and after Dec 31.
pub fn date_at(year: i32, week: u32, row: u32) -> Option<NaiveDate> {
    if row > 6 {
        return None;
    }
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let offset = jan_first.weekday().num_days_from_monday();
    let ordinal0 = (week * 7 + row).checked_sub(offset)?;
    jan_first.with_ordinal0(ordinal0)
}

/// Columns needed to draw `year`, never fewer than `min_columns`.
///
/// A leap year starting on a Sunday puts Dec 31 in column 53.
pub fn week_columns_for_year(year: i32, min_columns: u32) -> u32 {
    let needed = NaiveDate::from_ymd_opt(year, 12, 31)
        .map(|last| week_index_within_year(last) + 1)
        .unwrap_or(min_columns);
    needed.max(min_columns)
}

/// Header labels for `columns` week columns: every other column is
/// numbered (1, 3, 5, ...), the rest are left blank.
pub fn week_labels(columns: u32) -> Vec<Option<u32>> {
    (0..columns)
        .map(|i| if i % 2 == 0 { Some(i + 1) } else { None })
        .collect()
}

/// Every date of `year`, in order.
pub fn days_of_year(year: i32) -> impl Iterator<Item = NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    first
        .into_iter()
        .flat_map(|d| d.iter_days())
        .take_while(move |d| d.year() == year)
}
