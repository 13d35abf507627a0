//! Scenario-level willingness to pay
//!
//! Sums the published per-level WTP point estimates across the selected
//! attributes. The catalog's point estimates are the single source of truth;
//! WTP is not re-derived from utility coefficients and the cost coefficient,
//! which keeps the monetised benefits aligned with the published DCE wave.

use crate::error::EngineResult;
use crate::model::AttributeCatalog;
use crate::scenario::ScenarioInput;

/// WTP aggregation over a catalog
#[derive(Debug, Clone, Copy)]
pub struct WtpCalculator<'a> {
    catalog: &'a AttributeCatalog,
}

impl<'a> WtpCalculator<'a> {
    pub fn new(catalog: &'a AttributeCatalog) -> Self {
        Self { catalog }
    }

    /// WTP in AUD per participant per session
    ///
    /// Signed: attribute mixes that are net-disliked relative to baseline
    /// yield negative totals, and those propagate unmodified into benefit
    /// aggregates.
    pub fn wtp_per_session(&self, input: &ScenarioInput) -> EngineResult<f64> {
        let mut total = 0.0;
        for (dimension, key) in input.selected_levels() {
            total += self.catalog.level(dimension, key)?.wtp_coef;
        }
        Ok(total)
    }
}
