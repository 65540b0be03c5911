//! Composite dashboard combining DB, 831(b) and SERP strategies
//!
//! The headline multiplier is net value created divided by total tax savings.
//! Several terms use fixed illustrative constants rather than the dedicated
//! calculators' inputs; they are named below.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use crate::assumptions::MasterAssumptions;
use super::annuity::{annuity_due_value, future_value};
use super::retention::cost_of_loss;
use super::series::TimeSeries;

/// Annual captive administration cost assumed by the dashboard
pub const CAPTIVE_ADMIN_COST: f64 = 25_000.0;
/// Share of premium left after claims and costs
pub const CAPTIVE_NET_SHARE: f64 = 0.9;
/// Return applied to captive reserves
pub const CAPTIVE_RESERVE_RETURN: f64 = 0.05;

/// Key employee profile behind the illustrative retention figure
pub const RETENTION_COMPENSATION: f64 = 150_000.0;
pub const RETENTION_REPLACEMENT_MULTIPLE: f64 = 3.0;
pub const RETENTION_PROFIT_AT_RISK: f64 = 200_000.0;
pub const RETENTION_DEPARTURE_REDUCTION: f64 = 0.5;

/// Share of SDE improved through reinvestment
pub const REINVESTMENT_SDE_SHARE: f64 = 0.1;
/// Dampening applied to the exit uplift
pub const EXIT_UPLIFT_DAMPING: f64 = 0.5;

/// Returns for the low and high wealth scenarios
pub const LOW_SCENARIO_RETURN: f64 = 0.05;
pub const HIGH_SCENARIO_RETURN: f64 = 0.12;

/// Low, base (user return) and high wealth series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WealthScenarios {
    pub low: TimeSeries,
    pub base: TimeSeries,
    pub high: TimeSeries,
}

impl WealthScenarios {
    pub fn iter(&self) -> impl Iterator<Item = &TimeSeries> {
        [&self.low, &self.base, &self.high].into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterResult {
    /// DB contribution plus captive premium, times tax rate
    pub annual_tax_savings: f64,
    pub total_tax_savings: f64,
    pub db_accumulation: f64,
    pub serp_accumulation: f64,
    pub retirement_accumulation: f64,
    /// Annual flow into captive reserves
    pub captive_net_reserve: f64,
    pub total_reserves: f64,
    /// Illustrative retention value, independent of the SERP calculator inputs
    pub retention_roi: f64,
    pub incremental_sde: f64,
    pub exit_uplift: f64,
    pub total_costs: f64,
    pub net_value_created: f64,
    pub multiplier: f64,
    pub scenarios: WealthScenarios,
}

/// Net value over tax savings, zero when there are no positive savings
pub fn wow_multiplier(net_value_created: f64, total_tax_savings: f64) -> f64 {
    if total_tax_savings > 0.0 {
        net_value_created / total_tax_savings
    } else {
        0.0
    }
}

pub fn project_master(a: &MasterAssumptions) -> MasterResult {
    let years = a.horizon_years;
    let horizon = years as f64;

    let db = a.db_contribution.effective();
    let premium = a.captive_premium.effective();
    let serp = a.serp_funding.effective();

    if a.all_strategies_disabled() {
        debug!("Master dashboard: every strategy is off, only exit uplift remains");
    }
    if a.advisory_fee == 0.0 {
        warn!("Master dashboard: advisory fee is zero, costs may be understated");
    }

    let annual_tax_savings = (db + premium) * a.tax_rate;
    let total_tax_savings = annual_tax_savings * horizon;

    let db_accumulation = if a.db_contribution.enabled {
        future_value(db, a.expected_return, years)
    } else {
        0.0
    };
    let serp_accumulation = if a.serp_funding.enabled {
        future_value(serp, a.expected_return, years)
    } else {
        0.0
    };
    let retirement_accumulation = db_accumulation + serp_accumulation;

    let (captive_net_reserve, total_reserves) = if a.captive_premium.enabled {
        let net = (premium - CAPTIVE_ADMIN_COST) * CAPTIVE_NET_SHARE;
        (net, future_value(net, CAPTIVE_RESERVE_RETURN, years))
    } else {
        (0.0, 0.0)
    };

    let retention_roi = if a.serp_funding.enabled {
        cost_of_loss(
            RETENTION_COMPENSATION,
            RETENTION_REPLACEMENT_MULTIPLE,
            RETENTION_PROFIT_AT_RISK,
        ) * RETENTION_DEPARTURE_REDUCTION
    } else {
        0.0
    };

    let incremental_sde = a.sde * a.reinvestment_efficiency * REINVESTMENT_SDE_SHARE;
    let exit_uplift = incremental_sde * a.exit_multiple * horizon * EXIT_UPLIFT_DAMPING;

    let total_costs = a.setup_cost + (a.advisory_fee + a.third_party_cost) * horizon;
    let net_value_created = retirement_accumulation + total_reserves + exit_uplift - total_costs;
    let multiplier = wow_multiplier(net_value_created, total_tax_savings);

    let scenarios = wealth_scenarios(db + serp, captive_net_reserve, a.expected_return, years);

    debug!(
        "Master: tax_savings={:.2} net_value={:.2} multiplier={:.3}",
        total_tax_savings, net_value_created, multiplier
    );

    MasterResult {
        annual_tax_savings,
        total_tax_savings,
        db_accumulation,
        serp_accumulation,
        retirement_accumulation,
        captive_net_reserve,
        total_reserves,
        retention_roi,
        incremental_sde,
        exit_uplift,
        total_costs,
        net_value_created,
        multiplier,
        scenarios,
    }
}

/// Wealth by year under the three return scenarios
///
/// Each year compounds the combined DB + SERP contribution at the scenario
/// return and adds the captive reserve term `net_reserve * year * 1.05`.
pub fn wealth_scenarios(
    annual_contribution: f64,
    captive_net_reserve: f64,
    base_return: f64,
    years: u32,
) -> WealthScenarios {
    let series = |label: String, rate: f64| {
        TimeSeries::from_fn(label, years, |year| {
            annuity_due_value(annual_contribution, rate, year)
                + captive_net_reserve * year as f64 * (1.0 + CAPTIVE_RESERVE_RETURN)
        })
    };

    WealthScenarios {
        low: series(scenario_label("Low", LOW_SCENARIO_RETURN), LOW_SCENARIO_RETURN),
        base: series(scenario_label("Base", base_return), base_return),
        high: series(scenario_label("High", HIGH_SCENARIO_RETURN), HIGH_SCENARIO_RETURN),
    }
}

fn scenario_label(name: &str, rate: f64) -> String {
    format!("{} Scenario ({}%)", name, (rate * 100.0 * 100.0).round() / 100.0)
}
