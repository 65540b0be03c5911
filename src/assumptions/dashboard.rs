//! Master dashboard assumptions

use serde::{Deserialize, Serialize};
use crate::error::EngineError;
use super::{check_finite, check_fraction, check_years};

/// A strategy toggle gating its funding amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyFunding {
    pub enabled: bool,
    pub amount: f64,
}

impl StrategyFunding {
    pub fn enabled(amount: f64) -> Self {
        Self { enabled: true, amount }
    }

    pub fn disabled() -> Self {
        Self { enabled: false, amount: 0.0 }
    }

    /// Amount that flows into the calculation (zero when disabled)
    pub fn effective(&self) -> f64 {
        if self.enabled {
            self.amount
        } else {
            0.0
        }
    }
}

/// Inputs for the composite dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterAssumptions {
    /// Seller's discretionary earnings
    pub sde: f64,
    /// Marginal tax rate (fraction)
    pub tax_rate: f64,
    pub horizon_years: u32,
    /// Expected annual return on strategy assets (fraction)
    pub expected_return: f64,
    /// Exit valuation multiple applied to incremental SDE
    pub exit_multiple: f64,
    /// Share of freed cash reinvested productively (0-1)
    pub reinvestment_efficiency: f64,
    pub db_contribution: StrategyFunding,
    pub captive_premium: StrategyFunding,
    pub serp_funding: StrategyFunding,
    /// Annual advisory fee
    #[serde(default)]
    pub advisory_fee: f64,
    /// One-time setup cost
    #[serde(default)]
    pub setup_cost: f64,
    /// Annual third-party (actuary, TPA, captive manager) cost
    #[serde(default)]
    pub third_party_cost: f64,
}

impl MasterAssumptions {
    pub fn validate(&self) -> Result<(), EngineError> {
        check_finite("sde", self.sde)?;
        check_fraction("tax_rate", self.tax_rate)?;
        check_years("horizon_years", self.horizon_years)?;
        check_finite("expected_return", self.expected_return)?;
        check_finite("exit_multiple", self.exit_multiple)?;
        check_finite("reinvestment_efficiency", self.reinvestment_efficiency)?;
        check_finite("db_contribution", self.db_contribution.amount)?;
        check_finite("captive_premium", self.captive_premium.amount)?;
        check_finite("serp_funding", self.serp_funding.amount)?;
        check_finite("advisory_fee", self.advisory_fee)?;
        check_finite("setup_cost", self.setup_cost)?;
        check_finite("third_party_cost", self.third_party_cost)?;
        Ok(())
    }

    /// True when no strategy contributes
    pub fn all_strategies_disabled(&self) -> bool {
        !self.db_contribution.enabled && !self.captive_premium.enabled && !self.serp_funding.enabled
    }
}
