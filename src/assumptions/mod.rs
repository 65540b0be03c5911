//! Calculator assumptions, presets, and the input pre-checks run before projection
//!
//! Every assumption set holds rates as fractions (0.38, not 38). Conversion from
//! caller percentages happens at the request boundary in `projection::engine`.

mod plans;
mod retention;
mod dashboard;
pub mod presets;
pub mod loader;

pub use plans::{
    DefinedBenefitAssumptions, TeamSize, EmployeeLoad,
    ReserveAssumptions, ClaimsScenario,
};
pub use retention::{RetentionAssumptions, LeverageAssumptions, TaxStatus};
pub use dashboard::{MasterAssumptions, StrategyFunding};
pub use presets::Preset;

use serde::{Deserialize, Serialize};
use crate::error::EngineError;

/// Longest horizon, vesting period, or loan start accepted by `validate()`
pub const MAX_HORIZON_YEARS: u32 = 100;

/// One calculator's full set of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AssumptionSet {
    DefinedBenefit(DefinedBenefitAssumptions),
    #[serde(rename = "reserve_831b")]
    Reserve(ReserveAssumptions),
    Retention(RetentionAssumptions),
    Master(MasterAssumptions),
}

impl AssumptionSet {
    /// Pre-check every field; the first violation aborts the calculation
    pub fn validate(&self) -> Result<(), EngineError> {
        match self {
            AssumptionSet::DefinedBenefit(a) => a.validate(),
            AssumptionSet::Reserve(a) => a.validate(),
            AssumptionSet::Retention(a) => a.validate(),
            AssumptionSet::Master(a) => a.validate(),
        }
    }
}

// Shared field checks

pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::NonNumeric { field })
    }
}

/// Fractional rate within [0, 1]
pub(crate) fn check_fraction(field: &'static str, value: f64) -> Result<(), EngineError> {
    check_finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(EngineError::OutOfRange {
            field,
            reason: "must be between 0% and 100%",
        });
    }
    Ok(())
}

pub(crate) fn check_years(field: &'static str, years: u32) -> Result<(), EngineError> {
    if years == 0 {
        return Err(EngineError::OutOfRange {
            field,
            reason: "must be at least 1 year",
        });
    }
    if years > MAX_HORIZON_YEARS {
        return Err(EngineError::OutOfRange {
            field,
            reason: "must be at most 100 years",
        });
    }
    Ok(())
}

pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), EngineError> {
    check_finite(field, value)?;
    if value <= 0.0 {
        return Err(EngineError::OutOfRange {
            field,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}
