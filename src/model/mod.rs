//! Fitted model configuration: attribute catalog, regional cost table, and
//! choice-model constants
//!
//! Everything here is calibration data injected into the engine at
//! construction time, so a new DCE wave is a data change rather than a code
//! change.

mod catalog;
pub mod loader;
mod regions;

pub use catalog::{AttributeCatalog, AttributeLevel, Dimension};
pub use regions::RegionalCostAdjuster;

use crate::error::{EngineError, EngineResult};

/// Default opportunity cost applied on top of direct costs when enabled (20%)
pub const DEFAULT_OPPORTUNITY_COST_RATE: f64 = 0.20;

/// Alternative-specific constants and the cost coefficient of the logit model
#[derive(Debug, Clone)]
pub struct ChoiceParams {
    /// ASC of the programme alternative
    pub asc_programme: f64,
    /// ASC of the opt-out alternative
    pub asc_optout: f64,
    /// Marginal utility of cost per session; strictly negative
    pub cost_coef: f64,
}

impl ChoiceParams {
    /// Constants from the fitted LonelyLess mixed logit
    pub fn default_lonelyless() -> Self {
        Self {
            asc_programme: -0.112,
            asc_optout: 0.131,
            cost_coef: -0.036,
        }
    }
}

/// Complete calibration surface consumed by the evaluation engine
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub catalog: AttributeCatalog,
    pub regions: RegionalCostAdjuster,
    pub choice: ChoiceParams,
    /// Opportunity cost as a fraction of direct cost
    pub opportunity_rate: f64,
}

impl ModelConfig {
    /// Assemble a configuration, checking structural requirements
    pub fn new(
        catalog: AttributeCatalog,
        regions: RegionalCostAdjuster,
        choice: ChoiceParams,
        opportunity_rate: f64,
    ) -> EngineResult<Self> {
        if !choice.cost_coef.is_finite() || choice.cost_coef >= 0.0 {
            return Err(EngineError::configuration(format!(
                "cost coefficient {} must be strictly negative",
                choice.cost_coef
            )));
        }
        if !opportunity_rate.is_finite() || opportunity_rate < 0.0 {
            return Err(EngineError::configuration(format!(
                "opportunity rate {} must be finite and non-negative",
                opportunity_rate
            )));
        }
        Ok(Self {
            catalog,
            regions,
            choice,
            opportunity_rate,
        })
    }

    /// Fitted LonelyLess wave with the default Australian region table
    pub fn default_lonelyless() -> Self {
        Self {
            catalog: AttributeCatalog::default_lonelyless(),
            regions: RegionalCostAdjuster::default_australia(),
            choice: ChoiceParams::default_lonelyless(),
            opportunity_rate: DEFAULT_OPPORTUNITY_COST_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_cost_coef_rejected() {
        let choice = ChoiceParams {
            cost_coef: 0.036,
            ..ChoiceParams::default_lonelyless()
        };
        let result = ModelConfig::new(
            AttributeCatalog::default_lonelyless(),
            RegionalCostAdjuster::default_australia(),
            choice,
            DEFAULT_OPPORTUNITY_COST_RATE,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let cfg = ModelConfig::default_lonelyless();
        let rebuilt = ModelConfig::new(
            cfg.catalog.clone(),
            cfg.regions.clone(),
            cfg.choice.clone(),
            cfg.opportunity_rate,
        );
        assert!(rebuilt.is_ok());
    }
}
