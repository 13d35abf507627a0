//! Scenario evaluation: choice model, WTP aggregation, cost-benefit
//! expansion and sensitivity perturbation

mod choice;
mod engine;
mod sensitivity;
mod wtp;

pub use choice::{ChoiceModel, Endorsement, UtilityBreakdown, UtilityTerm, UTILITY_CLAMP};
pub use engine::{CostBenefitEngine, ScenarioResult};
pub use sensitivity::{SensitivityEvaluator, SensitivityOverrides, UptakeBand};
pub use wtp::WtpCalculator;
