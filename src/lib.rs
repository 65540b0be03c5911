//! Advisory Projections - projection engine for retirement and tax-efficiency calculators
//!
//! This library provides:
//! - Shared compounding primitives (future value, present value, annuity-due balances)
//! - Defined Benefit plan accelerator with employee cost overlay
//! - 831(b) captive reserve and shock-coverage modeling
//! - SERP retention ROI with a policy-loan leverage overlay
//! - Composite dashboard ("WOW multiplier") with low/base/high wealth scenarios
//!
//! Every calculation is a pure function from an assumption set to a result.

pub mod error;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{EngineError, LoadError};
pub use assumptions::{AssumptionSet, Preset};
pub use projection::{calculate, calculate_json, CalculationRequest, CalculationResult, CalculatorMode, TimeSeries};
pub use scenario::ScenarioRunner;
pub use report::CalculationReport;
