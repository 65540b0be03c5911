//! 831(b) captive reserve and tax-efficiency projection

use log::debug;
use serde::{Deserialize, Serialize};
use crate::assumptions::ReserveAssumptions;
use super::annuity::annuity_due_balances;
use super::series::TimeSeries;

/// How many months of overhead the reserve pool would carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum ShockCoverage {
    /// 12 months or more
    Extended { months: i64 },
    /// 6 to 11 months
    Moderate { months: i64 },
    /// Fewer than 6 months
    Thin { months: i64 },
}

impl ShockCoverage {
    pub fn from_months(months: i64) -> Self {
        if months >= 12 {
            ShockCoverage::Extended { months }
        } else if months >= 6 {
            ShockCoverage::Moderate { months }
        } else {
            ShockCoverage::Thin { months }
        }
    }

    pub fn months(&self) -> i64 {
        match *self {
            ShockCoverage::Extended { months }
            | ShockCoverage::Moderate { months }
            | ShockCoverage::Thin { months } => months,
        }
    }

    /// Display text. Extended and moderate share wording; the tier carries the distinction.
    pub fn message(&self) -> String {
        match self {
            ShockCoverage::Extended { months } | ShockCoverage::Moderate { months } => {
                format!("Reserve pool covers ~{} months of overhead", months)
            }
            ShockCoverage::Thin { .. } => {
                "Consider increasing reserves for stronger protection".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveResult {
    /// Claims expected each year
    pub annual_claims: f64,
    /// Tax value of the deductible share of premium
    pub tax_effect: f64,
    /// Year-1 flow into reserves after admin and claims
    pub net_reserve: f64,
    /// Pool after the horizon with flows at the start of each year
    pub reserve_pool: f64,
    pub shock_coverage: ShockCoverage,
    pub pool_series: TimeSeries,
}

pub fn project_reserve(a: &ReserveAssumptions) -> ReserveResult {
    let annual_claims = a.premium * a.claims.claims_fraction();
    let tax_effect = a.premium * a.deductible_fraction * a.tax_rate;
    let net_reserve = a.premium - a.admin_cost - annual_claims;

    let balances = annuity_due_balances(net_reserve, a.return_rate, a.horizon_years);
    let reserve_pool = balances.last().copied().unwrap_or(0.0);

    let months = (reserve_pool / a.monthly_overhead).floor() as i64;
    let shock_coverage = ShockCoverage::from_months(months);

    debug!(
        "831(b): net_reserve={:.2} pool={:.2} months_covered={}",
        net_reserve, reserve_pool, months
    );

    ReserveResult {
        annual_claims,
        tax_effect,
        net_reserve,
        reserve_pool,
        shock_coverage,
        pool_series: TimeSeries::from_values("Reserve Pool Growth", balances),
    }
}
