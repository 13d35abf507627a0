//! Scenario evaluation engine for the LonelyLess decision aid
//!
//! Converts a fitted discrete-choice-experiment (DCE) preference model into
//! policy outputs for a configurable loneliness-support programme: predicted
//! uptake via a binary logit, willingness-to-pay benefits, direct and
//! opportunity costs, net benefit and benefit-cost ratio, plus sensitivity
//! perturbation and an in-memory store of saved scenarios.
//!
//! The engine is pure and synchronous; all presentation (formatting, charts,
//! exports) lives in the consuming UI layer and communicates through the
//! serde-serialisable [`ScenarioInput`] / [`ScenarioResult`] contract.

pub mod error;
pub mod evaluation;
pub mod model;
pub mod scenario;

pub use error::{EngineError, EngineResult};
pub use evaluation::{
    CostBenefitEngine, ScenarioResult, SensitivityEvaluator, SensitivityOverrides,
};
pub use model::ModelConfig;
pub use scenario::{ScenarioInput, ScenarioStore};
