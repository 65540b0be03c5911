//! Named dashboard presets for a typical practice owner

use serde::{Deserialize, Serialize};
use super::{MasterAssumptions, StrategyFunding};

/// Horizon used by every preset
pub const PRESET_HORIZON_YEARS: u32 = 10;

/// Conservative / base / strong starting points for the master dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Conservative,
    Base,
    Strong,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Conservative, Preset::Base, Preset::Strong];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Conservative => "conservative",
            Preset::Base => "base",
            Preset::Strong => "strong",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Fixed assumption set for this preset, all strategies enabled, no costs
    pub fn assumptions(self) -> MasterAssumptions {
        let (sde, tax_rate, expected_return, exit_multiple, reinvestment_efficiency, db, premium, serp) =
            match self {
                Preset::Conservative => (500_000.0, 0.32, 0.05, 2.5, 0.60, 120_000.0, 200_000.0, 20_000.0),
                Preset::Base => (500_000.0, 0.38, 0.08, 3.5, 0.75, 150_000.0, 250_000.0, 25_000.0),
                Preset::Strong => (500_000.0, 0.44, 0.12, 5.0, 0.90, 200_000.0, 300_000.0, 35_000.0),
            };

        MasterAssumptions {
            sde,
            tax_rate,
            horizon_years: PRESET_HORIZON_YEARS,
            expected_return,
            exit_multiple,
            reinvestment_efficiency,
            db_contribution: StrategyFunding::enabled(db),
            captive_premium: StrategyFunding::enabled(premium),
            serp_funding: StrategyFunding::enabled(serp),
            advisory_fee: 0.0,
            setup_cost: 0.0,
            third_party_cost: 0.0,
        }
    }
}
