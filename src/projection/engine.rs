//! Request boundary and dispatch for the four calculators
//!
//! Callers send a flat set of named fields tagged with a `mode`. Rates arrive
//! as whole-number percentages and are converted to fractions here; the typed
//! assumption set is then pre-checked in full before any projection runs.

use log::debug;
use serde::{Deserialize, Serialize};
use crate::assumptions::{
    AssumptionSet, ClaimsScenario, DefinedBenefitAssumptions, EmployeeLoad,
    LeverageAssumptions, MasterAssumptions, ReserveAssumptions, RetentionAssumptions,
    StrategyFunding, TaxStatus, TeamSize,
};
use crate::error::EngineError;
use super::defined_benefit::{project_defined_benefit, DefinedBenefitResult};
use super::master::{project_master, MasterResult};
use super::reserve::{project_reserve, ReserveResult};
use super::retention::{project_retention, RetentionResult};
use super::series::TimeSeries;

/// Which calculator to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorMode {
    DefinedBenefit,
    #[serde(rename = "reserve_831b")]
    Reserve,
    Retention,
    Master,
}

impl CalculatorMode {
    pub fn name(self) -> &'static str {
        match self {
            CalculatorMode::DefinedBenefit => "defined_benefit",
            CalculatorMode::Reserve => "reserve_831b",
            CalculatorMode::Retention => "retention",
            CalculatorMode::Master => "master",
        }
    }
}

fn pct(value: f64) -> f64 {
    value / 100.0
}

fn default_hundred() -> f64 { 100.0 }
fn default_first_year() -> u32 { 1 }
fn default_enabled() -> bool { true }

/// Defined Benefit fields as entered
#[derive(Debug, Clone, Deserialize)]
pub struct DefinedBenefitRequest {
    pub age: f64,
    pub income: f64,
    pub target_contribution: f64,
    pub tax_rate_pct: f64,
    pub horizon_years: u32,
    pub return_rate_pct: f64,
    #[serde(default)]
    pub team_size: TeamSize,
    #[serde(default)]
    pub employee_load: EmployeeLoad,
}

/// 831(b) fields as entered
#[derive(Debug, Clone, Deserialize)]
pub struct ReserveRequest {
    pub premium: f64,
    pub admin_cost: f64,
    pub return_rate_pct: f64,
    pub horizon_years: u32,
    #[serde(default)]
    pub claims: ClaimsScenario,
    pub tax_rate_pct: f64,
    pub monthly_overhead: f64,
    #[serde(default = "default_hundred")]
    pub deductible_pct: f64,
}

/// SERP fields as entered
#[derive(Debug, Clone, Deserialize)]
pub struct RetentionRequest {
    pub compensation: f64,
    pub replacement_multiple: f64,
    pub profit_at_risk: f64,
    pub annual_funding: f64,
    pub vesting_years: u32,
    pub departure_reduction_pct: f64,
    /// Present only when leverage is enabled
    #[serde(default)]
    pub leverage: Option<LeverageRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeverageRequest {
    pub cash_value: f64,
    pub loan_rate_pct: f64,
    #[serde(default)]
    pub policy_drag_pct: f64,
    pub expected_return_pct: f64,
    #[serde(default)]
    pub tax_status: TaxStatus,
    #[serde(default = "default_first_year")]
    pub loan_start_year: u32,
    pub horizon_years: u32,
}

/// Master dashboard fields as entered
#[derive(Debug, Clone, Deserialize)]
pub struct MasterRequest {
    pub sde: f64,
    pub tax_rate_pct: f64,
    pub horizon_years: u32,
    pub expected_return_pct: f64,
    pub exit_multiple: f64,
    pub reinvestment_efficiency: f64,
    #[serde(default = "default_enabled")]
    pub db_enabled: bool,
    #[serde(default)]
    pub db_contribution: f64,
    #[serde(default = "default_enabled")]
    pub captive_enabled: bool,
    #[serde(default)]
    pub captive_premium: f64,
    #[serde(default = "default_enabled")]
    pub serp_enabled: bool,
    #[serde(default)]
    pub serp_funding: f64,
    #[serde(default)]
    pub advisory_fee: f64,
    #[serde(default)]
    pub setup_cost: f64,
    #[serde(default)]
    pub third_party_cost: f64,
}

/// A calculation request tagged by `mode`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationRequest {
    DefinedBenefit(DefinedBenefitRequest),
    #[serde(rename = "reserve_831b")]
    Reserve(ReserveRequest),
    Retention(RetentionRequest),
    Master(MasterRequest),
}

impl CalculationRequest {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, EngineError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn mode(&self) -> CalculatorMode {
        match self {
            CalculationRequest::DefinedBenefit(_) => CalculatorMode::DefinedBenefit,
            CalculationRequest::Reserve(_) => CalculatorMode::Reserve,
            CalculationRequest::Retention(_) => CalculatorMode::Retention,
            CalculationRequest::Master(_) => CalculatorMode::Master,
        }
    }

    /// Convert caller units to the engine's fractional assumption set
    pub fn into_assumptions(self) -> AssumptionSet {
        match self {
            CalculationRequest::DefinedBenefit(r) => {
                AssumptionSet::DefinedBenefit(DefinedBenefitAssumptions {
                    age: r.age,
                    income: r.income,
                    target_contribution: r.target_contribution,
                    tax_rate: pct(r.tax_rate_pct),
                    horizon_years: r.horizon_years,
                    return_rate: pct(r.return_rate_pct),
                    team_size: r.team_size,
                    employee_load: r.employee_load,
                })
            }
            CalculationRequest::Reserve(r) => AssumptionSet::Reserve(ReserveAssumptions {
                premium: r.premium,
                admin_cost: r.admin_cost,
                return_rate: pct(r.return_rate_pct),
                horizon_years: r.horizon_years,
                claims: r.claims,
                tax_rate: pct(r.tax_rate_pct),
                monthly_overhead: r.monthly_overhead,
                deductible_fraction: pct(r.deductible_pct),
            }),
            CalculationRequest::Retention(r) => AssumptionSet::Retention(RetentionAssumptions {
                compensation: r.compensation,
                replacement_multiple: r.replacement_multiple,
                profit_at_risk: r.profit_at_risk,
                annual_funding: r.annual_funding,
                vesting_years: r.vesting_years,
                departure_reduction: pct(r.departure_reduction_pct),
                leverage: r.leverage.map(|l| LeverageAssumptions {
                    cash_value: l.cash_value,
                    loan_rate: pct(l.loan_rate_pct),
                    policy_drag: pct(l.policy_drag_pct),
                    expected_return: pct(l.expected_return_pct),
                    tax_status: l.tax_status,
                    loan_start_year: l.loan_start_year,
                    horizon_years: l.horizon_years,
                }),
            }),
            CalculationRequest::Master(r) => AssumptionSet::Master(MasterAssumptions {
                sde: r.sde,
                tax_rate: pct(r.tax_rate_pct),
                horizon_years: r.horizon_years,
                expected_return: pct(r.expected_return_pct),
                exit_multiple: r.exit_multiple,
                reinvestment_efficiency: r.reinvestment_efficiency,
                db_contribution: StrategyFunding { enabled: r.db_enabled, amount: r.db_contribution },
                captive_premium: StrategyFunding { enabled: r.captive_enabled, amount: r.captive_premium },
                serp_funding: StrategyFunding { enabled: r.serp_enabled, amount: r.serp_funding },
                advisory_fee: r.advisory_fee,
                setup_cost: r.setup_cost,
                third_party_cost: r.third_party_cost,
            }),
        }
    }
}

/// Result of any calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationResult {
    DefinedBenefit(DefinedBenefitResult),
    #[serde(rename = "reserve_831b")]
    Reserve(ReserveResult),
    Retention(RetentionResult),
    Master(MasterResult),
}

impl CalculationResult {
    pub fn mode(&self) -> CalculatorMode {
        match self {
            CalculationResult::DefinedBenefit(_) => CalculatorMode::DefinedBenefit,
            CalculationResult::Reserve(_) => CalculatorMode::Reserve,
            CalculationResult::Retention(_) => CalculatorMode::Retention,
            CalculationResult::Master(_) => CalculatorMode::Master,
        }
    }

    /// Every time series in the result, in display order
    pub fn series(&self) -> Vec<&TimeSeries> {
        match self {
            CalculationResult::DefinedBenefit(r) => vec![&r.balance_series],
            CalculationResult::Reserve(r) => vec![&r.pool_series],
            CalculationResult::Retention(r) => vec![&r.cost_series, &r.value_protected_series],
            CalculationResult::Master(r) => r.scenarios.iter().collect(),
        }
    }
}

/// Validate then run the calculator for this assumption set
pub fn calculate(assumptions: &AssumptionSet) -> Result<CalculationResult, EngineError> {
    assumptions.validate()?;

    let result = match assumptions {
        AssumptionSet::DefinedBenefit(a) => CalculationResult::DefinedBenefit(project_defined_benefit(a)),
        AssumptionSet::Reserve(a) => CalculationResult::Reserve(project_reserve(a)),
        AssumptionSet::Retention(a) => CalculationResult::Retention(project_retention(a)),
        AssumptionSet::Master(a) => CalculationResult::Master(project_master(a)),
    };

    debug!("Calculated {}", result.mode().name());
    Ok(result)
}

pub fn calculate_request(request: CalculationRequest) -> Result<CalculationResult, EngineError> {
    calculate(&request.into_assumptions())
}

/// Parse, validate and run a JSON request
pub fn calculate_json(json: &str) -> Result<CalculationResult, EngineError> {
    calculate_request(CalculationRequest::from_json(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_db_request_converts_percentages() {
        let json = r#"{
            "mode": "defined_benefit",
            "age": 52, "income": 600000, "target_contribution": 150000,
            "tax_rate_pct": 38, "horizon_years": 10, "return_rate_pct": 8
        }"#;
        let set = CalculationRequest::from_json(json).unwrap().into_assumptions();
        let AssumptionSet::DefinedBenefit(a) = set else {
            panic!("expected DB assumptions");
        };
        assert_relative_eq!(a.tax_rate, 0.38, max_relative = 1e-9);
        assert_relative_eq!(a.return_rate, 0.08, max_relative = 1e-9);
        assert_eq!(a.team_size, TeamSize::Solo);
        assert_eq!(a.employee_load, EmployeeLoad::Medium);
    }

    #[test]
    fn test_db_end_to_end() {
        let json = r#"{
            "mode": "defined_benefit",
            "age": 52, "income": 600000, "target_contribution": 150000,
            "tax_rate_pct": 38, "horizon_years": 10, "return_rate_pct": 8,
            "team_size": "small", "employee_load": "low"
        }"#;
        let CalculationResult::DefinedBenefit(r) = calculate_json(json).unwrap() else {
            panic!("expected DB result");
        };
        assert_relative_eq!(r.tax_savings.low, 45_600.0, max_relative = 1e-12);
        assert_relative_eq!(r.accumulation, 2_172_984.37, max_relative = 1e-8);
        assert!(r.employee_cost.is_some());
    }

    #[test]
    fn test_missing_field_aborts() {
        let json = r#"{"mode": "defined_benefit", "age": 52, "income": 600000,
                       "tax_rate_pct": 38, "horizon_years": 10, "return_rate_pct": 8}"#;
        let err = calculate_json(json).unwrap_err();
        match err {
            EngineError::InvalidRequest(msg) => assert!(msg.contains("target_contribution")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_field_aborts() {
        let json = r#"{"mode": "reserve_831b", "premium": "lots", "admin_cost": 25000,
                       "return_rate_pct": 5, "horizon_years": 10, "tax_rate_pct": 38,
                       "monthly_overhead": 50000}"#;
        assert!(matches!(calculate_json(json), Err(EngineError::InvalidRequest(_))));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let json = r#"{"mode": "annuity", "premium": 1}"#;
        assert!(matches!(calculate_json(json), Err(EngineError::InvalidRequest(_))));
    }

    #[test]
    fn test_domain_violation_aborts() {
        let json = r#"{"mode": "reserve_831b", "premium": 250000, "admin_cost": 25000,
                       "return_rate_pct": 5, "horizon_years": 10, "tax_rate_pct": 38,
                       "monthly_overhead": 0}"#;
        assert_eq!(
            calculate_json(json).unwrap_err(),
            EngineError::OutOfRange {
                field: "monthly_overhead",
                reason: "must be greater than zero",
            }
        );
    }

    #[test]
    fn test_reserve_defaults_and_pool() {
        let json = r#"{"mode": "reserve_831b", "premium": 250000, "admin_cost": 25000,
                       "return_rate_pct": 5, "horizon_years": 10, "claims": "medium",
                       "tax_rate_pct": 38, "monthly_overhead": 80000}"#;
        let result = calculate_json(json).unwrap();
        assert_eq!(result.mode(), CalculatorMode::Reserve);
        let CalculationResult::Reserve(r) = result else { unreachable!() };
        assert_relative_eq!(r.tax_effect, 95_000.0, max_relative = 1e-12);
        assert_relative_eq!(r.reserve_pool, 2_146_102.91, max_relative = 1e-8);
    }

    #[test]
    fn test_retention_with_leverage() {
        let json = r#"{"mode": "retention", "compensation": 150000, "replacement_multiple": 3,
                       "profit_at_risk": 200000, "annual_funding": 25000, "vesting_years": 10,
                       "departure_reduction_pct": 50,
                       "leverage": {"cash_value": 500000, "loan_rate_pct": 5,
                                    "expected_return_pct": 8, "horizon_years": 10,
                                    "tax_status": "taxable"}}"#;
        let result = calculate_json(json).unwrap();
        assert_eq!(result.series().len(), 2);
        let CalculationResult::Retention(r) = result else { unreachable!() };
        let leverage = r.leverage.unwrap();
        assert_relative_eq!(leverage.net_return, 0.064, max_relative = 1e-12);
        assert_eq!(leverage.active_years, 10);
    }

    #[test]
    fn test_leverage_horizon_overflow_rejected() {
        let json = r#"{"mode": "retention", "compensation": 150000, "replacement_multiple": 3,
                       "profit_at_risk": 200000, "annual_funding": 25000, "vesting_years": 10,
                       "departure_reduction_pct": 50,
                       "leverage": {"cash_value": 500000, "loan_rate_pct": 5,
                                    "expected_return_pct": 8, "horizon_years": 4294967295}}"#;
        assert!(matches!(
            calculate_json(json),
            Err(EngineError::OutOfRange { field: "leverage_horizon_years", .. })
        ));
    }

    #[test]
    fn test_master_toggles_default_on() {
        let json = r#"{"mode": "master", "sde": 500000, "tax_rate_pct": 38, "horizon_years": 10,
                       "expected_return_pct": 8, "exit_multiple": 3.5,
                       "reinvestment_efficiency": 0.75, "db_contribution": 150000,
                       "captive_premium": 250000, "serp_funding": 25000}"#;
        let set = CalculationRequest::from_json(json).unwrap().into_assumptions();
        assert_eq!(set, AssumptionSet::Master(crate::assumptions::Preset::Base.assumptions()));

        let result = calculate(&set).unwrap();
        assert_eq!(result.series().len(), 3);
    }

    #[test]
    fn test_result_serializes_with_mode_tag() {
        let json = r#"{"mode": "master", "sde": 500000, "tax_rate_pct": 38, "horizon_years": 5,
                       "expected_return_pct": 8, "exit_multiple": 3.5,
                       "reinvestment_efficiency": 0.75, "db_enabled": false,
                       "captive_enabled": false, "serp_enabled": false}"#;
        let result = calculate_json(json).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["mode"], "master");
        assert_eq!(value["multiplier"], 0.0);
    }
}
