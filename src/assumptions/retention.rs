//! SERP retention and policy-loan leverage assumptions

use serde::{Deserialize, Serialize};
use crate::error::EngineError;
use super::{check_finite, check_fraction, check_positive, check_years};

/// Tax treatment of policy growth in the leverage sub-model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxStatus {
    #[default]
    TaxFree,
    Taxable,
}

/// Inputs for the SERP retention ROI calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionAssumptions {
    /// Key employee annual compensation
    pub compensation: f64,
    /// Replacement cost as a multiple of compensation
    pub replacement_multiple: f64,
    /// Profit lost if the employee departs
    pub profit_at_risk: f64,
    /// Annual SERP funding
    pub annual_funding: f64,
    pub vesting_years: u32,
    /// Reduction in departure probability (fraction)
    pub departure_reduction: f64,
    /// Optional policy-loan leverage overlay
    #[serde(default)]
    pub leverage: Option<LeverageAssumptions>,
}

impl RetentionAssumptions {
    pub fn validate(&self) -> Result<(), EngineError> {
        check_finite("compensation", self.compensation)?;
        check_finite("replacement_multiple", self.replacement_multiple)?;
        check_finite("profit_at_risk", self.profit_at_risk)?;
        check_positive("annual_funding", self.annual_funding)?;
        check_years("vesting_years", self.vesting_years)?;
        check_fraction("departure_reduction", self.departure_reduction)?;
        if let Some(leverage) = &self.leverage {
            leverage.validate()?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn example() -> Self {
        Self {
            compensation: 150_000.0,
            replacement_multiple: 3.0,
            profit_at_risk: 200_000.0,
            annual_funding: 25_000.0,
            vesting_years: 10,
            departure_reduction: 0.5,
            leverage: None,
        }
    }
}

/// Borrow against policy cash value and invest the proceeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageAssumptions {
    /// Cash value borrowed against
    pub cash_value: f64,
    /// Annual policy loan rate (fraction)
    pub loan_rate: f64,
    /// Annual drag from policy charges (fraction)
    #[serde(default)]
    pub policy_drag: f64,
    /// Expected annual return on the borrowed capital (fraction)
    pub expected_return: f64,
    #[serde(default)]
    pub tax_status: TaxStatus,
    /// First year the loan is outstanding (1-indexed)
    #[serde(default = "first_year")]
    pub loan_start_year: u32,
    /// Last year of the leverage horizon
    pub horizon_years: u32,
}

fn first_year() -> u32 {
    1
}

impl LeverageAssumptions {
    pub fn validate(&self) -> Result<(), EngineError> {
        check_finite("cash_value", self.cash_value)?;
        check_finite("loan_rate", self.loan_rate)?;
        check_finite("policy_drag", self.policy_drag)?;
        check_finite("expected_return", self.expected_return)?;
        check_years("loan_start_year", self.loan_start_year)?;
        check_years("leverage_horizon_years", self.horizon_years)?;
        Ok(())
    }

    /// Years the loan is outstanding within the horizon, inclusive of the start year
    pub fn active_years(&self) -> u32 {
        self.horizon_years
            .saturating_add(1)
            .saturating_sub(self.loan_start_year)
    }

    #[cfg(test)]
    pub(crate) fn example() -> Self {
        Self {
            cash_value: 500_000.0,
            loan_rate: 0.05,
            policy_drag: 0.0,
            expected_return: 0.08,
            tax_status: TaxStatus::TaxFree,
            loan_start_year: 1,
            horizon_years: 10,
        }
    }
}
