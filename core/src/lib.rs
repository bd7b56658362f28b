pub mod calendar;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use calendar::{date_at, day_of_week_row, week_index_within_year, week_labels, WEEKDAY_LABELS, WEEK_COLUMNS};
pub use config::HeatmapConfig;
pub use error::{ConfigError, CoreError, LoadError, ParseError};
pub use model::day::{DayAggregate, Dataset};
pub use model::transaction::{RawTransactionRow, TransactionRecord};
pub use repository::{CsvTransactionSource, LoadReport, RowFailure, TransactionSource};
pub use service::aggregation::{aggregate_daily, hourly_revenue, HourlyBucket, HOURLY_BUCKETS};
pub use service::color::{ColorScale, LegendEntry, Rgb};
pub use service::dto::{format_money, DayDetail, HeatmapCell, YearView};
pub use service::navigation::{select_year, Direction, NavigationState};
pub use usecase::heatmap::{HeatmapController, HeatmapSession, Lifecycle};
