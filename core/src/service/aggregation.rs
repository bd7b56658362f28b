use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::day::{DayAggregate, Dataset};
use crate::model::transaction::TransactionRecord;
use crate::time::{day_of, slot_of_day};

pub const HOURLY_BUCKETS: usize = 24;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HourlyBucket {
    pub hour: u32,
    pub value: f64,
}

/// Groups records by calendar day and sums their revenue.
///
/// Each record lands in exactly one day; within a day the input order of
/// the records is kept.
pub fn aggregate_daily(records: Vec<TransactionRecord>) -> Dataset {
    let mut by_day: BTreeMap<NaiveDate, Vec<TransactionRecord>> = BTreeMap::new();
    for record in records {
        by_day.entry(day_of(&record.timestamp)).or_default().push(record);
    }

    let days = by_day
        .into_iter()
        .map(|(date, records)| DayAggregate::new(date, records))
        .collect();

    Dataset::new(days)
}

/// Revenue per hour of day, always 24 buckets. Minutes are truncated, so a
/// 09:45 sale counts toward hour 9.
pub fn hourly_revenue(records: &[TransactionRecord]) -> Vec<HourlyBucket> {
    intraday_revenue(records, HOURLY_BUCKETS)
        .into_iter()
        .enumerate()
        .map(|(hour, value)| HourlyBucket {
            hour: hour as u32,
            value,
        })
        .collect()
}

/// Revenue per equal slice of the day, `slots` values long (48 gives
/// half-hour bins). Empty slots are zero.
pub fn intraday_revenue(records: &[TransactionRecord], slots: usize) -> Vec<f64> {
    let slots = slots.clamp(1, 1440);
    let mut values = vec![0.0; slots];
    for record in records {
        values[slot_of_day(&record.timestamp, slots)] += record.revenue;
    }
    values
}

/// Hour with the most revenue. Ties go to the earliest hour.
pub fn peak_hour(buckets: &[HourlyBucket]) -> Option<u32> {
    buckets
        .iter()
        .filter(|b| b.value > 0.0)
        .fold(None, |best: Option<&HourlyBucket>, b| match best {
            Some(current) if current.value >= b.value => Some(current),
            _ => Some(b),
        })
        .map(|b| b.hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_invoice_timestamp;

    const EPSILON: f64 = 1e-9;

    fn record(ts: &str, qty: f64, price: f64, discount: f64) -> TransactionRecord {
        TransactionRecord::new(parse_invoice_timestamp(ts).unwrap(), qty, price, discount)
    }

    fn sample_records() -> Vec<TransactionRecord> {
        vec![
            record("2022-06-25 09:00", 2.0, 10.0, 0.0),
            record("2022-06-26 13:00", 3.0, 1.5, 0.0),
            record("2022-06-25 09:00", 1.0, 5.0, 0.1),
            record("2021-12-31 23:00", 4.0, 2.0, 0.5),
            record("2022-06-25 17:00", 1.0, 7.25, 0.0),
        ]
    }

    #[test]
    fn test_aggregate_daily_sums_per_day() {
        let dataset = aggregate_daily(vec![
            record("2022-06-25 09:00", 2.0, 10.0, 0.0),
            record("2022-06-25 09:00", 1.0, 5.0, 0.1),
        ]);

        assert_eq!(dataset.len(), 1);
        let day = &dataset.days()[0];
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2022, 6, 25).unwrap());
        assert!((day.total - 24.5).abs() < EPSILON);
        assert_eq!(day.year, 2022);
    }

    #[test]
    fn test_aggregate_daily_partitions_records() {
        let records = sample_records();
        let input_count = records.len();
        let dataset = aggregate_daily(records);

        assert_eq!(dataset.len(), 3);
        let grouped: usize = dataset.iter().map(|d| d.records.len()).sum();
        assert_eq!(grouped, input_count);

        for day in dataset.iter() {
            assert!(!day.records.is_empty());
            let sum: f64 = day.records.iter().map(|r| r.revenue).sum();
            assert!((day.total - sum).abs() < EPSILON);
            assert!(day.records.iter().all(|r| r.timestamp.date() == day.date));
        }
    }

    #[test]
    fn test_aggregate_daily_keeps_record_order_within_day() {
        let dataset = aggregate_daily(sample_records());
        let day = dataset.get(NaiveDate::from_ymd_opt(2022, 6, 25).unwrap()).unwrap();
        let revenues: Vec<f64> = day.records.iter().map(|r| r.revenue).collect();
        assert_eq!(revenues.len(), 3);
        assert_eq!(revenues[0], 20.0);
        assert!((revenues[1] - 4.5).abs() < EPSILON);
        assert_eq!(revenues[2], 7.25);
    }

    #[test]
    fn test_aggregate_daily_totals_ignore_input_order() {
        let forward = aggregate_daily(sample_records());
        let mut reversed_input = sample_records();
        reversed_input.reverse();
        let backward = aggregate_daily(reversed_input);

        for (a, b) in forward.iter().zip(backward.iter()) {
            assert_eq!(a.date, b.date);
            assert!((a.total - b.total).abs() < EPSILON);
        }
    }

    #[test]
    fn test_hourly_revenue_example_day() {
        let dataset = aggregate_daily(vec![
            record("2022-06-25 09:00", 2.0, 10.0, 0.0),
            record("2022-06-25 09:00", 1.0, 5.0, 0.1),
        ]);
        let buckets = hourly_revenue(&dataset.days()[0].records);

        assert_eq!(buckets.len(), 24);
        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.hour, i as u32);
            if i == 9 {
                assert!((bucket.value - 24.5).abs() < EPSILON);
            } else {
                assert_eq!(bucket.value, 0.0);
            }
        }
    }

    #[test]
    fn test_hourly_revenue_sums_to_day_total() {
        let dataset = aggregate_daily(sample_records());
        for day in dataset.iter() {
            let sum: f64 = hourly_revenue(&day.records).iter().map(|b| b.value).sum();
            assert!((sum - day.total).abs() < EPSILON);
        }
    }

    #[test]
    fn test_hourly_revenue_truncates_minutes() {
        let buckets = hourly_revenue(&[
            record("2022-06-25 09:59", 1.0, 3.0, 0.0),
            record("2022-06-25 10:01", 1.0, 4.0, 0.0),
        ]);
        assert_eq!(buckets[9].value, 3.0);
        assert_eq!(buckets[10].value, 4.0);
    }

    #[test]
    fn test_hourly_revenue_of_nothing_is_all_zero() {
        let buckets = hourly_revenue(&[]);
        assert_eq!(buckets.len(), 24);
        assert!(buckets.iter().all(|b| b.value == 0.0));
        assert_eq!(peak_hour(&buckets), None);
    }

    #[test]
    fn test_intraday_revenue_half_hours() {
        let values = intraday_revenue(
            &[
                record("2022-06-25 09:10", 1.0, 3.0, 0.0),
                record("2022-06-25 09:40", 1.0, 4.0, 0.0),
            ],
            48,
        );
        assert_eq!(values.len(), 48);
        assert_eq!(values[18], 3.0);
        assert_eq!(values[19], 4.0);
    }

    #[test]
    fn test_peak_hour() {
        let buckets = hourly_revenue(&[
            record("2022-06-25 08:00", 1.0, 5.0, 0.0),
            record("2022-06-25 11:00", 1.0, 9.0, 0.0),
            record("2022-06-25 15:00", 1.0, 9.0, 0.0),
        ]);
        assert_eq!(peak_hour(&buckets), Some(11));
    }
}
