//! Projection engine: compounding primitives, the four calculators, and dispatch

mod annuity;
mod series;
mod defined_benefit;
mod reserve;
mod retention;
mod master;
mod engine;

pub use annuity::{future_value, present_value, annuity_due_balances, annuity_due_value};
pub use series::{TimeSeries, SeriesPoint, ValueBand};
pub use defined_benefit::{project_defined_benefit, DefinedBenefitResult};
pub use reserve::{project_reserve, ReserveResult, ShockCoverage};
pub use retention::{
    project_retention, project_leverage, cost_of_loss,
    RetentionResult, LeverageResult, BreakevenOutlook, ContinuityRating,
};
pub use master::{project_master, wealth_scenarios, wow_multiplier, MasterResult, WealthScenarios};
pub use engine::{
    calculate, calculate_request, calculate_json,
    CalculatorMode, CalculationRequest, CalculationResult,
    DefinedBenefitRequest, ReserveRequest, RetentionRequest, LeverageRequest, MasterRequest,
};
