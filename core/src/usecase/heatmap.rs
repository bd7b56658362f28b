use chrono::NaiveDate;

use crate::config::HeatmapConfig;
use crate::error::{CoreError, LoadError};
use crate::model::day::{DayAggregate, Dataset};
use crate::repository::{LoadReport, RowFailure, TransactionSource};
use crate::service::aggregation::{aggregate_daily, intraday_revenue};
use crate::service::color::ColorScale;
use crate::service::dto::{DayDetail, YearView};
use crate::service::navigation::{select_year, Direction, NavigationState};

/// Load state of the heatmap. Queries are only answered once `Ready`.
#[derive(Debug)]
pub enum Lifecycle {
    Uninitialized,
    Loading,
    Ready(HeatmapSession),
    Failed(LoadError),
}

impl Lifecycle {
    pub fn name(&self) -> &'static str {
        match self {
            Lifecycle::Uninitialized => "uninitialized",
            Lifecycle::Loading => "loading",
            Lifecycle::Ready(_) => "ready",
            Lifecycle::Failed(_) => "failed",
        }
    }
}

/// Owns the configuration and whatever has been loaded so far.
pub struct HeatmapController {
    config: HeatmapConfig,
    lifecycle: Lifecycle,
}

impl HeatmapController {
    pub fn new(config: HeatmapConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Reads the whole source and builds the dataset and color scale.
    ///
    /// Blocks until done; nothing is queryable in between. On failure the
    /// error is kept in [`Lifecycle::Failed`] and a later call may retry.
    pub fn load<S: TransactionSource>(&mut self, source: &S) -> Result<&HeatmapSession, CoreError> {
        self.lifecycle = Lifecycle::Loading;
        self.lifecycle = match source.load() {
            Ok(report) => Lifecycle::Ready(HeatmapSession::build(report, self.config.clone())),
            Err(err) => {
                tracing::error!(%err, "could not load transactions");
                Lifecycle::Failed(err)
            }
        };
        self.session()
    }

    /// The load error, if the last load failed.
    pub fn failure(&self) -> Option<&LoadError> {
        match &self.lifecycle {
            Lifecycle::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn session(&self) -> Result<&HeatmapSession, CoreError> {
        match &self.lifecycle {
            Lifecycle::Ready(session) => Ok(session),
            other => Err(CoreError::NotReady(other.name())),
        }
    }

    pub fn session_mut(&mut self) -> Result<&mut HeatmapSession, CoreError> {
        match &mut self.lifecycle {
            Lifecycle::Ready(session) => Ok(session),
            other => Err(CoreError::NotReady(other.name())),
        }
    }

    /// Consumes the controller and returns its loaded session.
    pub fn into_session(self) -> Result<HeatmapSession, CoreError> {
        match self.lifecycle {
            Lifecycle::Ready(session) => Ok(session),
            other => Err(CoreError::NotReady(other.name())),
        }
    }
}

/// A loaded dataset together with its fixed color scale and the year being
/// shown.
#[derive(Debug)]
pub struct HeatmapSession {
    config: HeatmapConfig,
    dataset: Dataset,
    scale: ColorScale,
    navigation: NavigationState,
    failures: Vec<RowFailure>,
}

impl HeatmapSession {
    pub fn build(report: LoadReport, config: HeatmapConfig) -> Self {
        let LoadReport { records, failures } = report;
        let dataset = aggregate_daily(records);
        let scale = ColorScale::from_dataset(&dataset, config.color_low, config.color_high);
        let navigation = NavigationState::new(config.default_year, config.min_year, config.max_year);

        if !failures.is_empty() {
            tracing::info!(skipped = failures.len(), "some transaction rows were skipped");
        }
        if scale.is_degenerate() {
            tracing::warn!("no positive daily revenue, every day gets the same color");
        }
        tracing::info!(
            days = dataset.len(),
            years = ?dataset.years(),
            max_total = scale.domain().1,
            "dataset ready"
        );

        Self {
            config,
            dataset,
            scale,
            navigation,
            failures,
        }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn failures(&self) -> &[RowFailure] {
        &self.failures
    }

    pub fn current_year(&self) -> i32 {
        self.navigation.current_year()
    }

    pub fn advance(&mut self, direction: Direction) -> bool {
        self.navigation.advance(direction)
    }

    pub fn year_days(&self) -> Vec<&DayAggregate> {
        select_year(&self.dataset, self.current_year())
    }

    pub fn year_view(&self) -> YearView {
        self.view_of(self.current_year())
    }

    /// View of any year, whether or not it is inside the navigation range.
    pub fn view_of(&self, year: i32) -> YearView {
        let days = select_year(&self.dataset, year);
        let (min, max) = self.navigation.bounds();
        YearView::build(
            year,
            &days,
            &self.scale,
            self.config.week_columns,
            self.config.legend_steps,
            (year > min, year < max),
        )
    }

    /// Tooltip data for `date`, `None` when nothing was sold that day.
    pub fn day_detail(&self, date: NaiveDate) -> Option<DayDetail> {
        self.dataset.get(date).map(DayDetail::from_day)
    }

    /// Sparkline values for `date` at the configured resolution.
    pub fn sparkline(&self, date: NaiveDate) -> Vec<f64> {
        let records = self.dataset.get(date).map(|d| d.records.as_slice()).unwrap_or(&[]);
        intraday_revenue(records, self.config.hourly_buckets)
    }
}
