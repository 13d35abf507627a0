//! Scenario inputs and the saved-scenario store

pub mod input;
mod store;

pub use input::{CostAdjustment, Horizon, Population, ScenarioInput};
pub use store::{SavedScenario, ScenarioStore};
