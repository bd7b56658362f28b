use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{day_of_week_row, week_columns_for_year, week_index_within_year, week_labels};
use crate::model::day::DayAggregate;
use crate::service::aggregation::{hourly_revenue, peak_hour, HourlyBucket};
use crate::service::color::{ColorScale, LegendEntry, Rgb};

/// One painted square of the year grid.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub week: u32,
    pub row: u32,
    pub total: f64,
    pub color: Rgb,
}

impl HeatmapCell {
    pub fn from_day(day: &DayAggregate, scale: &ColorScale) -> Self {
        Self {
            date: day.date,
            week: week_index_within_year(day.date),
            row: day_of_week_row(day.date),
            total: day.total,
            color: scale.map(day.total),
        }
    }
}

/// Everything a renderer needs to draw one year.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct YearView {
    pub year: i32,
    pub columns: u32,
    pub cells: Vec<HeatmapCell>,
    pub week_labels: Vec<Option<u32>>,
    pub legend: Vec<LegendEntry>,
    pub has_prev: bool,
    pub has_next: bool,
    pub year_total: f64,
}

impl YearView {
    pub fn build(
        year: i32,
        days: &[&DayAggregate],
        scale: &ColorScale,
        min_columns: u32,
        legend_steps: usize,
        (has_prev, has_next): (bool, bool),
    ) -> Self {
        let columns = week_columns_for_year(year, min_columns);
        Self {
            year,
            columns,
            cells: days.iter().map(|d| HeatmapCell::from_day(d, scale)).collect(),
            week_labels: week_labels(columns),
            legend: scale.legend(legend_steps),
            has_prev,
            has_next,
            year_total: days.iter().map(|d| d.total).sum(),
        }
    }

    pub fn cell_at(&self, week: u32, row: u32) -> Option<&HeatmapCell> {
        self.cells.iter().find(|c| c.week == week && c.row == row)
    }
}

/// Tooltip content for one day.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DayDetail {
    pub date: NaiveDate,
    pub day_name: String,
    pub date_label: String,
    pub revenue: f64,
    pub revenue_label: String,
    pub orders: usize,
    pub avg_quantity_label: String,
    pub avg_price_label: String,
    pub peak_hour: Option<u32>,
    pub hourly: Vec<HourlyBucket>,
}

impl DayDetail {
    pub fn from_day(day: &DayAggregate) -> Self {
        let hourly = hourly_revenue(&day.records);
        Self {
            date: day.date,
            day_name: day.date.format("%A").to_string(),
            date_label: format_day(day.date),
            revenue: day.total,
            revenue_label: format_money(day.total),
            orders: day.order_count(),
            avg_quantity_label: format!("{:.1}", day.mean_quantity()),
            avg_price_label: format_money(day.mean_unit_price()),
            peak_hour: peak_hour(&hourly),
            hourly,
        }
    }
}

/// `$15.50`, or `-$3.20` for negative amounts.
pub fn format_money(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded < 0.0 {
        format!("-${:.2}", -rounded)
    } else {
        format!("${:.2}", rounded.abs())
    }
}

/// `25.6.2022`
pub fn format_day(date: NaiveDate) -> String {
    date.format("%-d.%-m.%Y").to_string()
}
