//! Defined Benefit plan accelerator
//!
//! Contributions are shown as a fixed ±20% band around the target. Tax savings
//! and net cost are paired with their own band endpoint (low with low, high with
//! high); accumulation and the balance series use the point target.

use log::debug;
use serde::{Deserialize, Serialize};
use crate::assumptions::DefinedBenefitAssumptions;
use super::annuity::{annuity_due_balances, future_value};
use super::series::{TimeSeries, ValueBand};

/// Lower edge of the contribution band as a fraction of target
pub const CONTRIBUTION_BAND_LOW: f64 = 0.8;
/// Upper edge of the contribution band as a fraction of target
pub const CONTRIBUTION_BAND_HIGH: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinedBenefitResult {
    pub contribution: ValueBand,
    pub tax_savings: ValueBand,
    pub net_cost: ValueBand,
    /// Future value of the target contribution over the horizon
    pub accumulation: f64,
    /// None for a solo plan
    pub employee_cost: Option<ValueBand>,
    /// Contribution plus employee cost
    pub total_cost: ValueBand,
    /// Balance by year with the target contributed at the start of each year
    pub balance_series: TimeSeries,
}

pub fn project_defined_benefit(a: &DefinedBenefitAssumptions) -> DefinedBenefitResult {
    let contribution = ValueBand::around(
        a.target_contribution,
        CONTRIBUTION_BAND_LOW,
        CONTRIBUTION_BAND_HIGH,
    );
    let tax_savings = contribution.scale(a.tax_rate, a.tax_rate);
    let net_cost = contribution.sub(&tax_savings);

    let accumulation = future_value(a.target_contribution, a.return_rate, a.horizon_years);

    let employee_cost = a.team_size.multiplier().map(|multiplier| {
        let (load_low, load_high) = a.employee_load.band();
        contribution.scale(load_low * multiplier, load_high * multiplier)
    });
    let total_cost = match &employee_cost {
        Some(employees) => contribution.add(employees),
        None => contribution,
    };

    let balance_series = TimeSeries::from_values(
        "Projected Accumulation",
        annuity_due_balances(a.target_contribution, a.return_rate, a.horizon_years),
    );

    debug!(
        "DB: target={:.2} horizon={} accumulation={:.2} team={:?}",
        a.target_contribution, a.horizon_years, accumulation, a.team_size
    );

    DefinedBenefitResult {
        contribution,
        tax_savings,
        net_cost,
        accumulation,
        employee_cost,
        total_cost,
        balance_series,
    }
}
