//! Load named dashboard presets from a CSV file
//!
//! Rates in the file are whole-number percentages, matching how they are
//! entered on the calculators. An empty strategy cell disables that strategy.

use std::io::Read;
use std::path::Path;
use std::fs::File;
use csv::Reader;
use log::debug;
use crate::error::LoadError;
use super::{MasterAssumptions, StrategyFunding};

/// Raw CSV row matching the preset file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    sde: f64,
    tax_rate_pct: f64,
    horizon_years: u32,
    expected_return_pct: f64,
    exit_multiple: f64,
    reinvestment_efficiency: f64,
    db_contribution: Option<f64>,
    captive_premium: Option<f64>,
    serp_funding: Option<f64>,
    advisory_fee: Option<f64>,
    setup_cost: Option<f64>,
    third_party_cost: Option<f64>,
}

fn funding(amount: Option<f64>) -> StrategyFunding {
    match amount {
        Some(amount) => StrategyFunding::enabled(amount),
        None => StrategyFunding::disabled(),
    }
}

impl CsvRow {
    fn into_named(self) -> Result<(String, MasterAssumptions), LoadError> {
        let assumptions = MasterAssumptions {
            sde: self.sde,
            tax_rate: self.tax_rate_pct / 100.0,
            horizon_years: self.horizon_years,
            expected_return: self.expected_return_pct / 100.0,
            exit_multiple: self.exit_multiple,
            reinvestment_efficiency: self.reinvestment_efficiency,
            db_contribution: funding(self.db_contribution),
            captive_premium: funding(self.captive_premium),
            serp_funding: funding(self.serp_funding),
            advisory_fee: self.advisory_fee.unwrap_or(0.0),
            setup_cost: self.setup_cost.unwrap_or(0.0),
            third_party_cost: self.third_party_cost.unwrap_or(0.0),
        };

        assumptions.validate().map_err(|source| LoadError::Invalid {
            name: self.name.clone(),
            source,
        })?;

        Ok((self.name, assumptions))
    }
}

/// Read presets from any CSV source
pub fn read_presets<R: Read>(source: R) -> Result<Vec<(String, MasterAssumptions)>, LoadError> {
    let mut reader = Reader::from_reader(source);
    let mut presets = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        presets.push(row.into_named()?);
    }

    Ok(presets)
}

/// Load presets from a CSV file on disk
pub fn load_presets(path: &Path) -> Result<Vec<(String, MasterAssumptions)>, LoadError> {
    let file = File::open(path)?;
    let presets = read_presets(file)?;
    debug!("Loaded {} presets from {}", presets.len(), path.display());
    Ok(presets)
}
