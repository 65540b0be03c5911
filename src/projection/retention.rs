//! SERP retention ROI with an optional policy-loan leverage overlay

use log::debug;
use serde::{Deserialize, Serialize};
use crate::assumptions::{LeverageAssumptions, RetentionAssumptions, TaxStatus};
use super::series::TimeSeries;

/// Share of net return kept when policy growth is taxable
pub const TAXABLE_RETURN_RETENTION: f64 = 0.8;

/// Cost of one departure against total SERP investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "band", rename_all = "snake_case")]
pub enum BreakevenOutlook {
    /// Multiple of 2 or more
    PaysForItself { multiple: f64 },
    /// Multiple between 1 and 2
    BreaksEven { multiple: f64 },
    /// Multiple below 1
    Shortfall { multiple: f64 },
}

impl BreakevenOutlook {
    pub fn from_multiple(multiple: f64) -> Self {
        if multiple >= 2.0 {
            BreakevenOutlook::PaysForItself { multiple }
        } else if multiple >= 1.0 {
            BreakevenOutlook::BreaksEven { multiple }
        } else {
            BreakevenOutlook::Shortfall { multiple }
        }
    }

    pub fn multiple(&self) -> f64 {
        match *self {
            BreakevenOutlook::PaysForItself { multiple }
            | BreakevenOutlook::BreaksEven { multiple }
            | BreakevenOutlook::Shortfall { multiple } => multiple,
        }
    }

    pub fn message(&self) -> String {
        match self {
            BreakevenOutlook::PaysForItself { multiple } => format!(
                "SERP pays for itself if it prevents just 1 departure ({:.1}x value)",
                multiple
            ),
            BreakevenOutlook::BreaksEven { .. } => {
                "SERP breaks even with 1 prevented departure".to_string()
            }
            BreakevenOutlook::Shortfall { .. } => {
                "Consider adjusting SERP funding or vesting schedule".to_string()
            }
        }
    }
}

/// Qualitative rating of value protected per dollar invested
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityRating {
    Weak,
    Fair,
    Good,
    Strong,
    Excellent,
}

impl ContinuityRating {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 2.0 {
            ContinuityRating::Excellent
        } else if ratio >= 1.5 {
            ContinuityRating::Strong
        } else if ratio >= 1.0 {
            ContinuityRating::Good
        } else if ratio >= 0.5 {
            ContinuityRating::Fair
        } else {
            ContinuityRating::Weak
        }
    }

    /// Star count, 1 (weak) to 5 (excellent)
    pub fn stars(self) -> u8 {
        self as u8 + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            ContinuityRating::Excellent => "Excellent",
            ContinuityRating::Strong => "Strong",
            ContinuityRating::Good => "Good",
            ContinuityRating::Fair => "Fair",
            ContinuityRating::Weak => "Weak - Reconsider",
        }
    }
}

/// Outcome of borrowing against policy cash value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageResult {
    pub borrowed_capital: f64,
    /// Return after policy drag and any tax haircut
    pub net_return: f64,
    pub active_years: u32,
    /// Interest for one year of the loan
    pub annual_interest: f64,
    /// Interest over all active years (the loan cost)
    pub total_interest: f64,
    pub future_value: f64,
    /// Future value less principal and total interest
    pub net_gain: f64,
    /// Net return less loan rate
    pub spread: f64,
    /// Value protected plus net gain
    pub total_value_created: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionResult {
    pub cost_of_loss: f64,
    pub total_investment: f64,
    pub value_protected: f64,
    pub breakeven: BreakevenOutlook,
    /// Value protected per dollar invested
    pub continuity_ratio: f64,
    pub continuity: ContinuityRating,
    pub leverage: Option<LeverageResult>,
    pub cost_series: TimeSeries,
    pub value_protected_series: TimeSeries,
}

/// Replacement cost plus profit at risk
pub fn cost_of_loss(compensation: f64, replacement_multiple: f64, profit_at_risk: f64) -> f64 {
    compensation * replacement_multiple + profit_at_risk
}

pub fn project_retention(a: &RetentionAssumptions) -> RetentionResult {
    let cost_of_loss = cost_of_loss(a.compensation, a.replacement_multiple, a.profit_at_risk);
    let total_investment = a.annual_funding * a.vesting_years as f64;
    let value_protected = cost_of_loss * a.departure_reduction;

    let breakeven = BreakevenOutlook::from_multiple(cost_of_loss / total_investment);
    let continuity_ratio = value_protected / total_investment;
    let continuity = ContinuityRating::from_ratio(continuity_ratio);

    let leverage = a
        .leverage
        .as_ref()
        .map(|l| project_leverage(l, value_protected));

    let vesting = a.vesting_years;
    let cost_series = TimeSeries::from_fn("SERP Cost (Cumulative)", vesting, |year| {
        a.annual_funding * year as f64
    });
    // Value protected vests linearly over the vesting period
    let value_protected_series = TimeSeries::from_fn("Value Protected (Cumulative)", vesting, |year| {
        value_protected * (year as f64 / vesting as f64)
    });

    debug!(
        "SERP: cost_of_loss={:.2} investment={:.2} ratio={:.3} leverage={}",
        cost_of_loss,
        total_investment,
        continuity_ratio,
        leverage.is_some()
    );

    RetentionResult {
        cost_of_loss,
        total_investment,
        value_protected,
        breakeven,
        continuity_ratio,
        continuity,
        leverage,
        cost_series,
        value_protected_series,
    }
}

/// Leverage overlay; `value_protected` feeds the combined total
pub fn project_leverage(l: &LeverageAssumptions, value_protected: f64) -> LeverageResult {
    let mut net_return = l.expected_return - l.policy_drag;
    if l.tax_status == TaxStatus::Taxable {
        net_return *= TAXABLE_RETURN_RETENTION;
    }

    let active_years = l.active_years();
    let future_value = l.cash_value * (1.0 + net_return).powi(active_years as i32);
    let annual_interest = l.cash_value * l.loan_rate;
    let total_interest = annual_interest * active_years as f64;
    let net_gain = future_value - l.cash_value - total_interest;

    LeverageResult {
        borrowed_capital: l.cash_value,
        net_return,
        active_years,
        annual_interest,
        total_interest,
        future_value,
        net_gain,
        spread: net_return - l.loan_rate,
        total_value_created: value_protected + net_gain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_core_figures() {
        let result = project_retention(&RetentionAssumptions::example());

        // 150k * 3 + 200k
        assert_eq!(result.cost_of_loss, 650_000.0);
        assert_eq!(result.total_investment, 250_000.0);
        assert_eq!(result.value_protected, 325_000.0);
        assert_relative_eq!(result.breakeven.multiple(), 2.6, max_relative = 1e-9);
        assert!(matches!(result.breakeven, BreakevenOutlook::PaysForItself { .. }));
        assert_relative_eq!(result.continuity_ratio, 1.3, max_relative = 1e-9);
        assert_eq!(result.continuity, ContinuityRating::Good);
        assert!(result.leverage.is_none());
    }

    #[test]
    fn test_breakeven_bands() {
        assert!(matches!(BreakevenOutlook::from_multiple(2.0), BreakevenOutlook::PaysForItself { .. }));
        assert!(matches!(BreakevenOutlook::from_multiple(1.99), BreakevenOutlook::BreaksEven { .. }));
        assert!(matches!(BreakevenOutlook::from_multiple(1.0), BreakevenOutlook::BreaksEven { .. }));
        assert!(matches!(BreakevenOutlook::from_multiple(0.99), BreakevenOutlook::Shortfall { .. }));

        assert_eq!(
            BreakevenOutlook::from_multiple(2.6).message(),
            "SERP pays for itself if it prevents just 1 departure (2.6x value)"
        );
    }

    #[test]
    fn test_continuity_tiers() {
        assert_eq!(ContinuityRating::from_ratio(2.0), ContinuityRating::Excellent);
        assert_eq!(ContinuityRating::from_ratio(1.5), ContinuityRating::Strong);
        assert_eq!(ContinuityRating::from_ratio(1.0), ContinuityRating::Good);
        assert_eq!(ContinuityRating::from_ratio(0.5), ContinuityRating::Fair);
        assert_eq!(ContinuityRating::from_ratio(0.49), ContinuityRating::Weak);

        assert_eq!(ContinuityRating::Excellent.stars(), 5);
        assert_eq!(ContinuityRating::Weak.stars(), 1);
        assert!(ContinuityRating::Strong > ContinuityRating::Fair);
    }

    #[test]
    fn test_series_vest_linearly() {
        let a = RetentionAssumptions::example();
        let result = project_retention(&a);

        assert_eq!(result.cost_series.len(), 11);
        assert_eq!(result.value_protected_series.len(), 11);
        assert_eq!(result.cost_series.value_at(4), Some(100_000.0));
        assert_relative_eq!(result.value_protected_series.value_at(5).unwrap(), 162_500.0, max_relative = 1e-12);
        assert_eq!(result.value_protected_series.value_at(0), Some(0.0));
        assert_relative_eq!(result.value_protected_series.final_value(), result.value_protected, max_relative = 1e-9);
    }

    #[test]
    fn test_leverage_tax_free() {
        let l = LeverageAssumptions::example();
        let result = project_leverage(&l, 325_000.0);

        let fv = 500_000.0 * 1.08_f64.powi(10);
        assert_eq!(result.active_years, 10);
        assert_relative_eq!(result.future_value, fv, max_relative = 1e-12);
        assert_relative_eq!(result.annual_interest, 25_000.0, max_relative = 1e-9);
        assert_relative_eq!(result.total_interest, 250_000.0, max_relative = 1e-9);
        assert_relative_eq!(result.net_gain, fv - 500_000.0 - 250_000.0, max_relative = 1e-12);
        assert_abs_diff_eq!(result.spread, 0.03, epsilon = 1e-12);
        assert_relative_eq!(result.total_value_created, 325_000.0 + result.net_gain, max_relative = 1e-9);
    }

    #[test]
    fn test_leverage_drag_tax_and_start_year() {
        let l = LeverageAssumptions {
            policy_drag: 0.01,
            tax_status: TaxStatus::Taxable,
            loan_start_year: 4,
            ..LeverageAssumptions::example()
        };
        let result = project_leverage(&l, 0.0);

        // (8% - 1%) * 0.8
        assert_abs_diff_eq!(result.net_return, 0.056, epsilon = 1e-12);
        assert_eq!(result.active_years, 7);
        assert_relative_eq!(result.future_value, 500_000.0 * 1.056_f64.powi(7), max_relative = 1e-12);
        assert_relative_eq!(result.total_interest, 175_000.0, max_relative = 1e-9);
        assert_abs_diff_eq!(result.spread, 0.006, epsilon = 1e-12);
    }

    #[test]
    fn test_leverage_after_horizon_is_inert() {
        let l = LeverageAssumptions {
            loan_start_year: 12,
            ..LeverageAssumptions::example()
        };
        let result = project_leverage(&l, 100.0);

        assert_eq!(result.active_years, 0);
        assert_eq!(result.future_value, 500_000.0);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.net_gain, 0.0);
        assert_eq!(result.total_value_created, 100.0);
    }

    #[test]
    fn test_leverage_wired_through_retention() {
        let mut a = RetentionAssumptions::example();
        a.leverage = Some(LeverageAssumptions::example());
        let result = project_retention(&a);
        let leverage = result.leverage.unwrap();
        assert_relative_eq!(
            leverage.total_value_created,
            result.value_protected + leverage.net_gain,
            max_relative = 1e-9
        );
    }
}
