//! Output structures: value bands and year-indexed series for charting

use serde::{Deserialize, Serialize};

/// Low/high pair of dollar amounts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBand {
    pub low: f64,
    pub high: f64,
}

impl ValueBand {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Band around a point value, e.g. `around(target, 0.8, 1.2)`
    pub fn around(value: f64, low_factor: f64, high_factor: f64) -> Self {
        Self::new(value * low_factor, value * high_factor)
    }

    /// Endpoint-wise product, low with low and high with high
    pub fn scale(&self, low_factor: f64, high_factor: f64) -> Self {
        Self::new(self.low * low_factor, self.high * high_factor)
    }

    /// Endpoint-wise sum
    pub fn add(&self, other: &ValueBand) -> Self {
        Self::new(self.low + other.low, self.high + other.high)
    }

    /// Endpoint-wise difference
    pub fn sub(&self, other: &ValueBand) -> Self {
        Self::new(self.low - other.low, self.high - other.high)
    }
}

/// One point of a time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: u32,
    pub value: f64,
}

/// Named year-indexed series, year 0 through the horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Build from values indexed by year starting at 0
    pub fn from_values(label: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(year, value)| SeriesPoint { year: year as u32, value })
            .collect();
        Self { label: label.into(), points }
    }

    /// Build by evaluating `f` for each year in 0..=horizon
    pub fn from_fn(label: impl Into<String>, horizon_years: u32, f: impl Fn(u32) -> f64) -> Self {
        Self::from_values(label, (0..=horizon_years).map(f))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn value_at(&self, year: u32) -> Option<f64> {
        self.points.get(year as usize).map(|p| p.value)
    }

    pub fn final_value(&self) -> f64 {
        self.points.last().map(|p| p.value).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_pairwise_ops() {
        let contrib = ValueBand::around(150_000.0, 0.8, 1.2);
        assert_eq!(contrib, ValueBand::new(120_000.0, 180_000.0));

        let savings = contrib.scale(0.5, 0.5);
        assert_eq!(contrib.sub(&savings), ValueBand::new(60_000.0, 90_000.0));
        assert_eq!(contrib.add(&savings), ValueBand::new(180_000.0, 270_000.0));
    }

    #[test]
    fn test_series_indexing() {
        let s = TimeSeries::from_fn("Cost", 5, |y| y as f64 * 10.0);
        assert_eq!(s.len(), 6);
        assert_eq!(s.points[0], SeriesPoint { year: 0, value: 0.0 });
        assert_eq!(s.value_at(3), Some(30.0));
        assert_eq!(s.value_at(6), None);
        assert_eq!(s.final_value(), 50.0);
    }

    #[test]
    fn test_empty_series_final_value() {
        let s = TimeSeries::from_values("Empty", Vec::new());
        assert!(s.is_empty());
        assert_eq!(s.final_value(), 0.0);
    }
}
