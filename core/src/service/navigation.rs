use serde::{Deserialize, Serialize};

use crate::model::day::{DayAggregate, Dataset};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// The displayed year, kept inside `[min_year, max_year]`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    current_year: i32,
    min_year: i32,
    max_year: i32,
}

impl NavigationState {
    /// `year` is clamped into the range.
    pub fn new(year: i32, min_year: i32, max_year: i32) -> Self {
        let (min_year, max_year) = (min_year.min(max_year), min_year.max(max_year));
        Self {
            current_year: year.clamp(min_year, max_year),
            min_year,
            max_year,
        }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min_year, self.max_year)
    }

    pub fn has_prev(&self) -> bool {
        self.current_year > self.min_year
    }

    pub fn has_next(&self) -> bool {
        self.current_year < self.max_year
    }

    /// Steps one year back or forward. At a bound nothing changes and
    /// `false` is returned.
    pub fn advance(&mut self, direction: Direction) -> bool {
        let moved = match direction {
            Direction::Prev if self.has_prev() => {
                self.current_year -= 1;
                true
            }
            Direction::Next if self.has_next() => {
                self.current_year += 1;
                true
            }
            _ => false,
        };
        if moved {
            tracing::debug!(year = self.current_year, ?direction, "year changed");
        }
        moved
    }
}

/// Days of `year`, ordered by date. Empty when the year has no data.
pub fn select_year(dataset: &Dataset, year: i32) -> Vec<&DayAggregate> {
    dataset.iter().filter(|d| d.year == year).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::aggregation::aggregate_daily;
    use crate::model::transaction::TransactionRecord;
    use crate::time::parse_invoice_timestamp;

    fn dataset(timestamps: &[&str]) -> Dataset {
        aggregate_daily(
            timestamps
                .iter()
                .map(|ts| TransactionRecord::new(parse_invoice_timestamp(ts).unwrap(), 1.0, 10.0, 0.0))
                .collect(),
        )
    }

    #[test]
    fn test_advance_is_bounded() {
        let mut state = NavigationState::new(2020, 2020, 2025);
        assert!(!state.has_prev());
        assert!(!state.advance(Direction::Prev));
        assert_eq!(state.current_year(), 2020);

        assert!(state.advance(Direction::Next));
        assert_eq!(state.current_year(), 2021);

        let mut state = NavigationState::new(2025, 2020, 2025);
        assert!(!state.has_next());
        assert!(!state.advance(Direction::Next));
        assert_eq!(state.current_year(), 2025);
        assert!(state.advance(Direction::Prev));
        assert_eq!(state.current_year(), 2024);
    }

    #[test]
    fn test_advance_does_not_wrap() {
        let mut state = NavigationState::new(2022, 2020, 2025);
        for _ in 0..10 {
            state.advance(Direction::Next);
        }
        assert_eq!(state.current_year(), 2025);
        for _ in 0..10 {
            state.advance(Direction::Prev);
        }
        assert_eq!(state.current_year(), 2020);
    }

    #[test]
    fn test_new_clamps_year() {
        assert_eq!(NavigationState::new(1999, 2020, 2025).current_year(), 2020);
        assert_eq!(NavigationState::new(2030, 2020, 2025).current_year(), 2025);
        assert_eq!(NavigationState::new(2022, 2022, 2022).bounds(), (2022, 2022));
    }

    #[test]
    fn test_select_year() {
        let data = dataset(&["2022-06-25 09:00", "2021-01-01 10:00", "2022-01-03 12:00"]);
        let days = select_year(&data, 2022);
        assert_eq!(days.len(), 2);
        assert!(days[0].date < days[1].date);
        assert!(days.iter().all(|d| d.year == 2022));
    }

    #[test]
    fn test_select_year_without_data_is_empty() {
        let data = dataset(&["2022-06-25 09:00"]);
        assert!(select_year(&data, 2021).is_empty());
    }
}
