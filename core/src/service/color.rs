use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::day::Dataset;

/// 8-bit RGB color, written as `#rrggbb`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation per channel, `t` in `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(channel(self.r, other.r), channel(self.g, other.g), channel(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// A sample of the scale for drawing a legend.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    pub value: f64,
    pub color: Rgb,
}

/// Continuous value-to-color mapping over a fixed domain.
///
/// The domain comes from the whole dataset, not the displayed year, so
/// colors stay comparable across years. Values outside the domain clamp to
/// the nearest endpoint color.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    domain_min: f64,
    domain_max: f64,
    color_low: Rgb,
    color_high: Rgb,
}

impl ColorScale {
    pub fn new(domain_min: f64, domain_max: f64, color_low: Rgb, color_high: Rgb) -> Self {
        Self {
            domain_min,
            domain_max,
            color_low,
            color_high,
        }
    }

    /// Scale over `[0, max daily total]` of the dataset.
    pub fn from_dataset(dataset: &Dataset, color_low: Rgb, color_high: Rgb) -> Self {
        let max = dataset.global_max_total().unwrap_or(0.0);
        Self::new(0.0, max, color_low, color_high)
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    pub fn endpoints(&self) -> (Rgb, Rgb) {
        (self.color_low, self.color_high)
    }

    /// True when the domain has no finite width, i.e. an empty dataset, no
    /// positive revenue, or a daily total that overflowed. Everything maps
    /// to the low color then.
    pub fn is_degenerate(&self) -> bool {
        let width = self.domain_max - self.domain_min;
        !(width > 0.0 && width.is_finite())
    }

    pub fn map(&self, value: f64) -> Rgb {
        if self.is_degenerate() || value.is_nan() {
            return self.color_low;
        }
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.color_low.lerp(self.color_high, t)
    }

    /// `steps` values spread evenly from the domain minimum to its maximum.
    pub fn legend(&self, steps: usize) -> Vec<LegendEntry> {
        let steps = steps.max(2);
        (0..steps)
            .map(|i| {
                let value = self.domain_min
                    + (self.domain_max - self.domain_min) * i as f64 / (steps - 1) as f64;
                LegendEntry {
                    value,
                    color: self.map(value),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::day::DayAggregate;
    use crate::model::transaction::TransactionRecord;
    use crate::time::parse_invoice_timestamp;

    const BLACK: Rgb = Rgb::new(0, 0, 0);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    fn single_day_dataset(total: f64) -> Dataset {
        let ts = parse_invoice_timestamp("2022-06-25 09:00").unwrap();
        Dataset::new(vec![DayAggregate::new(
            ts.date(),
            vec![TransactionRecord::new(ts, 1.0, total, 0.0)],
        )])
    }

    #[test]
    fn test_parse_and_display_hex() {
        let color: Rgb = "#1c1c1c".parse().unwrap();
        assert_eq!(color, Rgb::new(28, 28, 28));
        assert_eq!("#2FFF00".parse::<Rgb>().unwrap(), Rgb::new(47, 255, 0));
        assert_eq!(Rgb::new(47, 255, 0).to_string(), "#2fff00");

        assert!("1c1c1c".parse::<Rgb>().is_err());
        assert!("#1c1c".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
        assert!("#+f+f+f".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_endpoints_and_midpoint() {
        let scale = ColorScale::from_dataset(&single_day_dataset(100.0), BLACK, WHITE);
        assert_eq!(scale.domain(), (0.0, 100.0));
        assert_eq!(scale.map(0.0), BLACK);
        assert_eq!(scale.map(100.0), WHITE);
        assert_eq!(scale.map(50.0), BLACK.lerp(WHITE, 0.5));
        assert_eq!(scale.map(50.0), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_map_is_monotonic() {
        let low = Rgb::new(0x1c, 0x1c, 0x1c);
        let high = Rgb::new(0x2f, 0xff, 0x00);
        let scale = ColorScale::new(0.0, 1000.0, low, high);

        let mut previous = scale.map(0.0);
        for i in 1..=100 {
            let color = scale.map(i as f64 * 10.0);
            assert!(color.r >= previous.r);
            assert!(color.g >= previous.g);
            assert!(color.b <= previous.b);
            previous = color;
        }
        assert_eq!(previous, high);
    }

    #[test]
    fn test_out_of_domain_values_clamp() {
        let scale = ColorScale::new(0.0, 100.0, BLACK, WHITE);
        assert_eq!(scale.map(-40.0), BLACK);
        assert_eq!(scale.map(250.0), WHITE);
    }

    #[test]
    fn test_degenerate_domain_maps_to_low_color() {
        let empty = ColorScale::from_dataset(&Dataset::default(), BLACK, WHITE);
        assert!(empty.is_degenerate());
        assert_eq!(empty.map(0.0), BLACK);
        assert_eq!(empty.map(10.0), BLACK);

        let zero = ColorScale::from_dataset(&single_day_dataset(0.0), BLACK, WHITE);
        assert!(zero.is_degenerate());
        assert_eq!(zero.map(0.0), BLACK);

        let overflowed = ColorScale::new(0.0, f64::INFINITY, BLACK, WHITE);
        assert!(overflowed.is_degenerate());
        assert_eq!(overflowed.map(f64::INFINITY), BLACK);
        assert_eq!(overflowed.map(20.0), BLACK);
    }

    #[test]
    fn test_legend_samples() {
        let scale = ColorScale::new(0.0, 200.0, BLACK, WHITE);
        let legend = scale.legend(5);
        let values: Vec<f64> = legend.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
        assert_eq!(legend[0].color, BLACK);
        assert_eq!(legend[4].color, WHITE);
    }
}
