//! Scenario runner for batch dashboard projections
//!
//! Holds a table of named presets, then runs them, sweeps a preset across
//! return assumptions, or evaluates arbitrary batches in parallel.

use std::path::Path;
use log::info;
use rayon::prelude::*;
use crate::assumptions::{loader, AssumptionSet, MasterAssumptions, Preset};
use crate::error::{EngineError, LoadError};
use crate::projection::{calculate, project_master, CalculationResult, MasterResult};

/// Pre-loaded preset table for batch runs
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let base = runner.run_preset("base")?;
/// let sweep = runner.sweep_returns("base", &[0.04, 0.06, 0.08])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    presets: Vec<(String, MasterAssumptions)>,
}

impl ScenarioRunner {
    /// Runner with the built-in conservative / base / strong presets
    pub fn new() -> Self {
        Self {
            presets: Preset::ALL
                .iter()
                .map(|p| (p.name().to_string(), p.assumptions()))
                .collect(),
        }
    }

    /// Runner with presets loaded from a CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self::with_presets(loader::load_presets(path)?))
    }

    pub fn with_presets(presets: Vec<(String, MasterAssumptions)>) -> Self {
        Self { presets }
    }

    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|(name, _)| name.as_str())
    }

    pub fn preset(&self, name: &str) -> Option<&MasterAssumptions> {
        self.presets
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, a)| a)
    }

    fn require(&self, name: &str) -> Result<&MasterAssumptions, EngineError> {
        self.preset(name)
            .ok_or_else(|| EngineError::InvalidRequest(format!("unknown preset '{}'", name)))
    }

    /// Run a single named preset
    pub fn run_preset(&self, name: &str) -> Result<MasterResult, EngineError> {
        let assumptions = self.require(name)?;
        assumptions.validate()?;
        Ok(project_master(assumptions))
    }

    /// Run every preset, in table order
    pub fn run_all(&self) -> Vec<(String, MasterResult)> {
        info!("Running {} presets", self.presets.len());
        self.presets
            .par_iter()
            .map(|(name, a)| (name.clone(), project_master(a)))
            .collect()
    }

    /// Re-run a preset at each expected return
    pub fn sweep_returns(&self, name: &str, returns: &[f64]) -> Result<Vec<MasterResult>, EngineError> {
        let base = self.require(name)?;
        info!("Sweeping preset '{}' across {} returns", name, returns.len());

        returns
            .par_iter()
            .map(|&expected_return| -> Result<MasterResult, EngineError> {
                let assumptions = MasterAssumptions {
                    expected_return,
                    ..base.clone()
                };
                assumptions.validate()?;
                Ok(project_master(&assumptions))
            })
            .collect()
    }

    /// Evaluate independent assumption sets; each succeeds or fails on its own
    pub fn run_batch(&self, sets: &[AssumptionSet]) -> Vec<Result<CalculationResult, EngineError>> {
        sets.par_iter().map(calculate).collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets() {
        let runner = ScenarioRunner::new();
        let names: Vec<_> = runner.preset_names().collect();
        assert_eq!(names, vec!["conservative", "base", "strong"]);

        let results = runner.run_all();
        assert_eq!(results.len(), 3);
        assert_eq!(results[1].0, "base");
        // Higher assumptions produce more net value
        assert!(results[2].1.net_value_created > results[0].1.net_value_created);
    }

    #[test]
    fn test_run_preset_matches_direct_projection() {
        let runner = ScenarioRunner::new();
        let via_runner = runner.run_preset("Base").unwrap();
        assert_eq!(via_runner, project_master(&Preset::Base.assumptions()));
        assert!(runner.run_preset("aggressive").is_err());
    }

    #[test]
    fn test_sweep_returns_is_monotonic() {
        let runner = ScenarioRunner::new();
        let results = runner.sweep_returns("base", &[0.04, 0.06, 0.08, 0.10]).unwrap();

        assert_eq!(results.len(), 4);
        for pair in results.windows(2) {
            assert!(pair[1].retirement_accumulation > pair[0].retirement_accumulation);
        }
        // Tax savings do not depend on the return
        assert_eq!(results[0].total_tax_savings, results[3].total_tax_savings);
    }

    #[test]
    fn test_sweep_rejects_non_finite_return() {
        let runner = ScenarioRunner::new();
        let err = runner.sweep_returns("base", &[0.05, f64::NAN]).unwrap_err();
        assert_eq!(err, EngineError::NonNumeric { field: "expected_return" });
    }

    #[test]
    fn test_batch_keeps_failures_separate() {
        let runner = ScenarioRunner::new();
        let mut bad = Preset::Base.assumptions();
        bad.horizon_years = 0;

        let results = runner.run_batch(&[
            AssumptionSet::Master(Preset::Base.assumptions()),
            AssumptionSet::Master(bad),
        ]);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(EngineError::OutOfRange { field: "horizon_years", .. })
        ));
    }
}
