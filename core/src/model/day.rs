use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::transaction::TransactionRecord;

/// Revenue and raw transactions of one calendar day.
///
/// Only days with at least one transaction get an aggregate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub total: f64,
    pub records: Vec<TransactionRecord>,
    pub year: i32,
}

impl DayAggregate {
    pub fn new(date: NaiveDate, records: Vec<TransactionRecord>) -> Self {
        let total = records.iter().map(|r| r.revenue).sum();
        Self {
            date,
            total,
            records,
            year: date.year(),
        }
    }

    pub fn order_count(&self) -> usize {
        self.records.len()
    }

    pub fn mean_quantity(&self) -> f64 {
        self.mean_of(|r| r.quantity)
    }

    pub fn mean_unit_price(&self) -> f64 {
        self.mean_of(|r| r.unit_price)
    }

    fn mean_of(&self, field: impl Fn(&TransactionRecord) -> f64) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.records.iter().map(field).sum::<f64>() / self.records.len() as f64
    }
}

/// Every day of the transaction log, sorted by date. Read-only once built.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    days: Vec<DayAggregate>,
}

impl Dataset {
    pub fn new(mut days: Vec<DayAggregate>) -> Self {
        days.sort_by_key(|d| d.date);
        Self { days }
    }

    pub fn days(&self) -> &[DayAggregate] {
        &self.days
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayAggregate> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayAggregate> {
        self.days
            .binary_search_by_key(&date, |d| d.date)
            .ok()
            .map(|i| &self.days[i])
    }

    /// Largest daily total across all years, `None` for an empty dataset.
    pub fn global_max_total(&self) -> Option<f64> {
        self.days.iter().map(|d| d.total).reduce(f64::max)
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.days.iter().map(|d| d.year).collect();
        years.dedup();
        years
    }
}
