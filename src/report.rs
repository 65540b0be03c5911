//! Report envelope, time-series CSV export, and display formatting

use std::io::Write;
use std::path::Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::projection::{CalculationResult, CalculatorMode, TimeSeries};

/// A calculation result stamped for export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationReport {
    pub generated_at: DateTime<Utc>,
    pub calculator: CalculatorMode,
    pub result: CalculationResult,
}

impl CalculationReport {
    pub fn new(result: CalculationResult) -> Self {
        Self {
            generated_at: Utc::now(),
            calculator: result.mode(),
            result,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Write series side by side: one `year` column then one column per series
pub fn write_series<W: Write>(writer: W, series: &[&TimeSeries]) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header = vec!["year".to_string()];
    header.extend(series.iter().map(|s| s.label.clone()));
    out.write_record(&header)?;

    let rows = series.iter().map(|s| s.len()).max().unwrap_or(0);
    for year in 0..rows {
        let mut record = vec![year.to_string()];
        record.extend(series.iter().map(|s| {
            s.value_at(year as u32)
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default()
        }));
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}

pub fn write_series_file(path: &Path, series: &[&TimeSeries]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_series(file, series)
}

/// US-dollar amount with thousands separators, e.g. `$1,234,568`
pub fn format_currency(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(f) => format!("{}${}.{}", sign, grouped, f),
        None => format!("{}${}", sign, grouped),
    }
}

/// Value already in percent units, e.g. `format_percent(3.0, 1)` gives `3.0%`
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

pub fn format_multiplier(value: f64, decimals: usize) -> String {
    format!("{:.*}x", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{AssumptionSet, Preset};
    use crate::projection::calculate;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0, 0), "$0");
        assert_eq!(format_currency(999.0, 0), "$999");
        assert_eq!(format_currency(1_000.0, 0), "$1,000");
        assert_eq!(format_currency(2_172_984.37, 0), "$2,172,984");
        assert_eq!(format_currency(2_172_984.37, 2), "$2,172,984.37");
        assert_eq!(format_currency(-74_400.0, 0), "-$74,400");
        assert_eq!(format_currency(-0.2, 0), "$0");
    }

    #[test]
    fn test_format_percent_and_multiplier() {
        assert_eq!(format_percent(3.0, 1), "3.0%");
        assert_eq!(format_multiplier(2.6, 1), "2.6x");
        assert_eq!(format_multiplier(0.0, 1), "0.0x");
    }

    #[test]
    fn test_write_series_csv() {
        let a = TimeSeries::from_fn("Cost", 2, |y| y as f64 * 100.0);
        let b = TimeSeries::from_fn("Value", 2, |y| y as f64 * 150.5);

        let mut out = Vec::new();
        write_series(&mut out, &[&a, &b]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "year,Cost,Value\n0,0.00,0.00\n1,100.00,150.50\n2,200.00,301.00\n"
        );
    }

    #[test]
    fn test_report_round_trip_shape() {
        let result = calculate(&AssumptionSet::Master(Preset::Strong.assumptions())).unwrap();
        let report = CalculationReport::new(result);
        assert_eq!(report.calculator, CalculatorMode::Master);

        let json = report.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["calculator"], "master");
        assert_eq!(value["result"]["mode"], "master");
        assert!(value["generated_at"].is_string());
    }
}
