use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::calendar::WEEK_COLUMNS;
use crate::error::ConfigError;
use crate::service::aggregation::HOURLY_BUCKETS;
use crate::service::color::Rgb;

pub const DEFAULT_MIN_YEAR: i32 = 2020;
pub const DEFAULT_MAX_YEAR: i32 = 2025;
pub const DEFAULT_YEAR: i32 = 2022;
pub const DEFAULT_COLOR_LOW: Rgb = Rgb::new(0x1c, 0x1c, 0x1c);
pub const DEFAULT_COLOR_HIGH: Rgb = Rgb::new(0x2f, 0xff, 0x00);
pub const DEFAULT_LEGEND_STEPS: usize = 5;

const CONFIG_DIR_NAME: &str = ".revcal";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HeatmapConfig {
    pub min_year: i32,
    pub max_year: i32,
    pub default_year: i32,
    /// Slots the sparkline splits a day into. 24 gives one per hour.
    pub hourly_buckets: usize,
    pub week_columns: u32,
    pub color_low: Rgb,
    pub color_high: Rgb,
    pub legend_steps: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            default_year: DEFAULT_YEAR,
            hourly_buckets: HOURLY_BUCKETS,
            week_columns: WEEK_COLUMNS,
            color_low: DEFAULT_COLOR_LOW,
            color_high: DEFAULT_COLOR_HIGH,
            legend_steps: DEFAULT_LEGEND_STEPS,
        }
    }
}

impl HeatmapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_year > self.max_year {
            return Err(ConfigError::InvertedYearRange {
                min: self.min_year,
                max: self.max_year,
            });
        }
        if !(self.min_year..=self.max_year).contains(&self.default_year) {
            return Err(ConfigError::DefaultYearOutOfRange {
                year: self.default_year,
                min: self.min_year,
                max: self.max_year,
            });
        }
        if !(1..=1440).contains(&self.hourly_buckets) {
            return Err(ConfigError::InvalidBucketCount(self.hourly_buckets));
        }
        if self.week_columns == 0 {
            return Err(ConfigError::NoWeekColumns);
        }
        if self.legend_steps < 2 {
            return Err(ConfigError::InvalidLegendSteps(self.legend_steps));
        }
        Ok(())
    }

    /// Reads a JSON config file. Missing fields fall back to the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config: HeatmapConfig = serde_json::from_str(&content)
            .with_context(|| format!("Could not parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads `path` if given, else `~/.revcal/config.json` when it exists,
    /// else the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }
}

/// `~/.revcal`, where the config file and the TUI log live.
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME))
}

pub fn default_config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = HeatmapConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.hourly_buckets, 24);
        assert_eq!(config.week_columns, 53);
        assert_eq!(config.color_low.to_string(), "#1c1c1c");
        assert_eq!(config.color_high.to_string(), "#2fff00");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = HeatmapConfig { min_year: 2026, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvertedYearRange { .. })));

        let config = HeatmapConfig { default_year: 2019, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::DefaultYearOutOfRange { .. })));

        let config = HeatmapConfig { hourly_buckets: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::InvalidBucketCount(0)));

        let config = HeatmapConfig { week_columns: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::NoWeekColumns));

        let config = HeatmapConfig { legend_steps: 1, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::InvalidLegendSteps(1)));
    }

    #[test]
    fn test_from_file_fills_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{ "max_year": 2030, "color_high": "#ff0000" }}"##).unwrap();

        let config = HeatmapConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_year, 2030);
        assert_eq!(config.min_year, DEFAULT_MIN_YEAR);
        assert_eq!(config.color_high, Rgb::new(255, 0, 0));
        assert_eq!(config.color_low, DEFAULT_COLOR_LOW);
    }

    #[test]
    fn test_from_file_rejects_bad_color() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "color_low": "green" }}"#).unwrap();

        assert!(HeatmapConfig::from_file(file.path()).is_err());
    }
}
