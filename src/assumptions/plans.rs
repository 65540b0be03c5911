//! Defined Benefit and 831(b) captive reserve assumptions

use serde::{Deserialize, Serialize};
use crate::error::EngineError;
use super::{check_finite, check_fraction, check_positive, check_years};

/// Size of the team covered alongside the owner in a DB plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSize {
    /// Owner only, no employee cost overlay
    #[default]
    Solo,
    Small,
    Larger,
}

impl TeamSize {
    /// Employee cost multiplier, None for a solo plan
    pub fn multiplier(self) -> Option<f64> {
        match self {
            TeamSize::Solo => None,
            TeamSize::Small => Some(1.2),
            TeamSize::Larger => Some(1.8),
        }
    }
}

/// Employee contribution load tier, as a fraction of the owner's contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeLoad {
    Low,
    #[default]
    Medium,
    High,
}

impl EmployeeLoad {
    /// (low, high) load band
    pub fn band(self) -> (f64, f64) {
        match self {
            EmployeeLoad::Low => (0.10, 0.15),
            EmployeeLoad::Medium => (0.20, 0.30),
            EmployeeLoad::High => (0.35, 0.45),
        }
    }
}

/// Inputs for the Defined Benefit accelerator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinedBenefitAssumptions {
    /// Owner age (informational, not used in the projection)
    pub age: f64,
    /// Owner income (informational)
    pub income: f64,
    /// Target annual contribution
    pub target_contribution: f64,
    /// Marginal tax rate (fraction)
    pub tax_rate: f64,
    /// Accumulation horizon in years
    pub horizon_years: u32,
    /// Annual return on plan assets (fraction)
    pub return_rate: f64,
    #[serde(default)]
    pub team_size: TeamSize,
    #[serde(default)]
    pub employee_load: EmployeeLoad,
}

impl DefinedBenefitAssumptions {
    pub fn validate(&self) -> Result<(), EngineError> {
        check_finite("age", self.age)?;
        check_finite("income", self.income)?;
        check_finite("target_contribution", self.target_contribution)?;
        check_fraction("tax_rate", self.tax_rate)?;
        check_years("horizon_years", self.horizon_years)?;
        check_finite("return_rate", self.return_rate)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn example() -> Self {
        Self {
            age: 52.0,
            income: 600_000.0,
            target_contribution: 150_000.0,
            tax_rate: 0.38,
            horizon_years: 10,
            return_rate: 0.08,
            team_size: TeamSize::Solo,
            employee_load: EmployeeLoad::Medium,
        }
    }
}

/// Expected claims as a share of premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimsScenario {
    #[default]
    None,
    Low,
    Medium,
}

impl ClaimsScenario {
    pub fn claims_fraction(self) -> f64 {
        match self {
            ClaimsScenario::None => 0.0,
            ClaimsScenario::Low => 0.10,
            ClaimsScenario::Medium => 0.25,
        }
    }
}

/// Inputs for the 831(b) captive reserve calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveAssumptions {
    /// Annual premium paid to the captive
    pub premium: f64,
    /// Annual captive administration cost
    pub admin_cost: f64,
    /// Annual return on reserves (fraction)
    pub return_rate: f64,
    pub horizon_years: u32,
    #[serde(default)]
    pub claims: ClaimsScenario,
    /// Marginal tax rate (fraction)
    pub tax_rate: f64,
    /// Practice overhead per month, used for shock coverage
    pub monthly_overhead: f64,
    /// Share of premium treated as deductible (fraction, default 1.0)
    #[serde(default = "full_deductibility")]
    pub deductible_fraction: f64,
}

fn full_deductibility() -> f64 {
    1.0
}

impl ReserveAssumptions {
    pub fn validate(&self) -> Result<(), EngineError> {
        check_finite("premium", self.premium)?;
        check_finite("admin_cost", self.admin_cost)?;
        check_finite("return_rate", self.return_rate)?;
        check_years("horizon_years", self.horizon_years)?;
        check_fraction("tax_rate", self.tax_rate)?;
        check_positive("monthly_overhead", self.monthly_overhead)?;
        check_fraction("deductible_fraction", self.deductible_fraction)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn example() -> Self {
        Self {
            premium: 250_000.0,
            admin_cost: 25_000.0,
            return_rate: 0.05,
            horizon_years: 10,
            claims: ClaimsScenario::Medium,
            tax_rate: 0.38,
            monthly_overhead: 80_000.0,
            deductible_fraction: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_multipliers() {
        assert_eq!(TeamSize::Solo.multiplier(), None);
        assert_eq!(TeamSize::Small.multiplier(), Some(1.2));
        assert_eq!(TeamSize::Larger.multiplier(), Some(1.8));
    }

    #[test]
    fn test_claims_fractions() {
        assert_eq!(ClaimsScenario::None.claims_fraction(), 0.0);
        assert_eq!(ClaimsScenario::Low.claims_fraction(), 0.10);
        assert_eq!(ClaimsScenario::Medium.claims_fraction(), 0.25);
    }

    #[test]
    fn test_optional_fields_default_when_absent() {
        let json = r#"{
            "premium": 250000, "admin_cost": 25000, "return_rate": 0.05,
            "horizon_years": 10, "tax_rate": 0.38, "monthly_overhead": 50000
        }"#;
        let a: ReserveAssumptions = serde_json::from_str(json).unwrap();
        assert_eq!(a.claims, ClaimsScenario::None);
        assert_eq!(a.deductible_fraction, 1.0);
    }

    #[test]
    fn test_reserve_requires_positive_overhead() {
        let mut a = ReserveAssumptions::example();
        a.monthly_overhead = 0.0;
        assert!(matches!(
            a.validate(),
            Err(EngineError::OutOfRange { field: "monthly_overhead", .. })
        ));
    }

    #[test]
    fn test_db_rejects_nan_target() {
        let mut a = DefinedBenefitAssumptions::example();
        a.target_contribution = f64::NAN;
        assert_eq!(
            a.validate(),
            Err(EngineError::NonNumeric { field: "target_contribution" })
        );
    }
}
