//! Binary logit choice model
//!
//! Predicts the probability that a member of the target population endorses
//! the configured programme over opting out. The programme alternative's
//! utility is linear in the selected attribute coefficients and the
//! effective per-session cost; the opt-out alternative carries only its
//! alternative-specific constant.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::model::{AttributeCatalog, ChoiceParams, Dimension};
use crate::scenario::ScenarioInput;

/// Utility differences beyond this magnitude resolve to probability 0 or 1
/// rather than risking exp() overflow
pub const UTILITY_CLAMP: f64 = 35.0;

/// One attribute's contribution to programme utility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityTerm {
    pub dimension: Dimension,
    pub level_key: String,
    pub utility: f64,
}

/// Decomposition of both alternatives' utilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityBreakdown {
    pub asc_programme: f64,
    pub attribute_terms: Vec<UtilityTerm>,
    /// Sum of the attribute terms (zero for an all-baseline scenario)
    pub attribute_total: f64,
    pub cost_term: f64,
    pub u_programme: f64,
    pub u_optout: f64,
}

/// Endorsement probabilities with their utility decomposition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endorsement {
    pub endorse_prob: f64,
    pub optout_prob: f64,
    pub utility: UtilityBreakdown,
}

/// Logit model over a catalog and fitted choice constants
#[derive(Debug, Clone, Copy)]
pub struct ChoiceModel<'a> {
    catalog: &'a AttributeCatalog,
    params: &'a ChoiceParams,
}

impl<'a> ChoiceModel<'a> {
    pub fn new(catalog: &'a AttributeCatalog, params: &'a ChoiceParams) -> Self {
        Self { catalog, params }
    }

    /// Endorsement probability for a scenario at a given effective cost
    ///
    /// Fails on any unrecognized attribute level; baseline selections are
    /// explicit catalog entries, never a fallback.
    pub fn endorsement(
        &self,
        input: &ScenarioInput,
        effective_cost: f64,
    ) -> EngineResult<Endorsement> {
        let mut attribute_terms = Vec::with_capacity(5);
        let mut attribute_total = 0.0;
        for (dimension, key) in input.selected_levels() {
            let level = self.catalog.level(dimension, key)?;
            attribute_total += level.utility_coef;
            attribute_terms.push(UtilityTerm {
                dimension,
                level_key: level.level_key.clone(),
                utility: level.utility_coef,
            });
        }

        let cost_term = self.params.cost_coef * effective_cost;
        let u_programme = self.params.asc_programme + attribute_total + cost_term;
        let u_optout = self.params.asc_optout;

        let endorse_prob = logistic(u_programme - u_optout);

        Ok(Endorsement {
            endorse_prob,
            optout_prob: 1.0 - endorse_prob,
            utility: UtilityBreakdown {
                asc_programme: self.params.asc_programme,
                attribute_terms,
                attribute_total,
                cost_term,
                u_programme,
                u_optout,
            },
        })
    }
}

/// Two-alternative logit on the utility difference
///
/// Clamping the difference keeps extreme utilities at exact 0/1 instead of
/// overflowing exp() into NaN.
fn logistic(utility_diff: f64) -> f64 {
    if utility_diff > UTILITY_CLAMP {
        1.0
    } else if utility_diff < -UTILITY_CLAMP {
        0.0
    } else {
        1.0 / (1.0 + (-utility_diff).exp())
    }
}
