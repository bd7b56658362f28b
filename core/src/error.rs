use std::path::PathBuf;

/// Why a single transaction row was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The invoice date is not in `YYYY-MM-DD HH:MM` form.
    #[error("invalid timestamp \"{0}\", expected YYYY-MM-DD HH:MM")]
    InvalidTimestamp(String),

    /// Quantity, unit price or discount is empty, not a number, or not finite.
    #[error("invalid number \"{value}\" in column {field}")]
    InvalidNumber { field: &'static str, value: String },

    /// Every number parsed, but their product overflows.
    #[error("revenue of {quantity} x {unit_price} with discount {discount} is not finite")]
    RevenueOverflow {
        quantity: String,
        unit_price: String,
        discount: String,
    },

    /// The CSV record could not be read into the expected columns.
    #[error("malformed row: {0}")]
    MalformedRow(String),
}

/// Failure to read the transaction log as a whole. Fatal to startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column {0} is missing from the CSV header")]
    MissingColumn(&'static str),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("min_year {min} is after max_year {max}")]
    InvertedYearRange { min: i32, max: i32 },

    #[error("default_year {year} is outside {min}..={max}")]
    DefaultYearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("hourly_buckets must be between 1 and 1440, got {0}")]
    InvalidBucketCount(usize),

    #[error("week_columns must be at least 1")]
    NoWeekColumns,

    #[error("legend_steps must be at least 2, got {0}")]
    InvalidLegendSteps(usize),

    #[error("invalid color \"{0}\", expected #rrggbb")]
    InvalidColor(String),
}

/// Errors from querying the heatmap controller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// Queries are only allowed once the dataset has finished loading.
    #[error("dataset is not ready (state: {0})")]
    NotReady(&'static str),
}
