//! Sensitivity analysis over an already-computed result
//!
//! Perturbation is pure function composition on the primitives stored in a
//! [`ScenarioResult`]: the base scenario and every variant are guaranteed to
//! share identical non-overridden inputs because nothing is recomputed from
//! raw form state and the choice model is never re-invoked.

use serde::{Deserialize, Serialize};

use super::engine::{aggregate, AggregationBasis, CostBenefitEngine, ScenarioResult};
use crate::error::{EngineError, EngineResult};
use crate::scenario::ScenarioInput;

/// Overrides applied on top of a base result
///
/// Every field defaults to "no change"; an all-default override returns a
/// numerically identical result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensitivityOverrides {
    /// Multiplier on the effective cost per session (e.g. 1.25 for +25%)
    #[serde(default)]
    pub cost_multiplier: Option<f64>,
    /// Replace the model-derived uptake with a direct value, clamped to [0,1]
    #[serde(default)]
    pub uptake_override: Option<f64>,
    /// Scaling factor on WTP per session
    #[serde(default)]
    pub wtp_scale: Option<f64>,
    /// Additional scaling factor on cost per session
    #[serde(default)]
    pub cost_scale: Option<f64>,
    /// Annual discount rate applied uniformly to cost and benefit flows
    /// over the horizon
    #[serde(default)]
    pub discount_rate: Option<f64>,
}

/// Uptake under a symmetric cost band, for tornado-style charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptakeBand {
    pub lower_cost_uptake: f64,
    pub base_uptake: f64,
    pub higher_cost_uptake: f64,
}

/// Re-runs the aggregation steps of the engine under perturbed primitives
pub struct SensitivityEvaluator;

impl SensitivityEvaluator {
    /// Derive a perturbed result from a base result
    ///
    /// The base is untouched; the returned record reflects the overridden
    /// uptake / cost / WTP primitives pushed through the same aggregation
    /// steps the engine uses.
    pub fn perturb(
        base: &ScenarioResult,
        overrides: &SensitivityOverrides,
    ) -> EngineResult<ScenarioResult> {
        validate_factor("cost_multiplier", overrides.cost_multiplier)?;
        validate_factor("wtp_scale", overrides.wtp_scale)?;
        validate_factor("cost_scale", overrides.cost_scale)?;
        if let Some(rate) = overrides.discount_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(EngineError::Validation {
                    field: "discount_rate",
                    value: rate,
                    reason: "discount rate must be finite and non-negative",
                });
            }
        }

        let endorse_prob = match overrides.uptake_override {
            Some(uptake) if uptake.is_finite() => uptake.clamp(0.0, 1.0),
            Some(uptake) => {
                return Err(EngineError::Validation {
                    field: "uptake_override",
                    value: uptake,
                    reason: "uptake override must be finite",
                })
            }
            None => base.endorse_prob,
        };

        let effective_cost_per_session = base.effective_cost_per_session
            * overrides.cost_multiplier.unwrap_or(1.0)
            * overrides.cost_scale.unwrap_or(1.0);
        let wtp_per_session = base.wtp_per_session * overrides.wtp_scale.unwrap_or(1.0);
        let discount_factor = match overrides.discount_rate {
            Some(rate) => discount_factor(rate, base.horizon_months),
            None => 1.0,
        };

        let aggregates = aggregate(&AggregationBasis {
            endorse_prob,
            wtp_per_session,
            effective_cost_per_session,
            total_participants: base.total_participants,
            sessions_per_participant: base.sessions_per_participant,
            opportunity_rate: base.opportunity_rate_applied,
            discount_factor,
        });

        Ok(ScenarioResult {
            endorse_prob,
            optout_prob: 1.0 - endorse_prob,
            utility: base.utility.clone(),
            wtp_per_session,
            effective_cost_per_session,
            total_participants: base.total_participants,
            endorsed_participants: aggregates.endorsed_participants,
            total_sessions: aggregates.total_sessions,
            direct_cost: aggregates.direct_cost,
            opportunity_cost: aggregates.opportunity_cost,
            total_cost: aggregates.total_cost,
            total_benefit: aggregates.total_benefit,
            net_benefit: aggregates.net_benefit,
            bcr: aggregates.bcr,
            sessions_per_participant: base.sessions_per_participant,
            opportunity_rate_applied: base.opportunity_rate_applied,
            horizon_months: base.horizon_months,
        })
    }

    /// Modeled uptake at cost −band / base / +band
    ///
    /// Unlike [`SensitivityEvaluator::perturb`], this deliberately
    /// re-evaluates the choice model, because the question is how uptake
    /// responds to a cost change.
    pub fn uptake_cost_band(
        engine: &CostBenefitEngine,
        input: &ScenarioInput,
        band: f64,
    ) -> EngineResult<UptakeBand> {
        if !band.is_finite() || band < 0.0 || band >= 1.0 {
            return Err(EngineError::Validation {
                field: "band",
                value: band,
                reason: "cost band must lie in [0, 1)",
            });
        }

        let base = engine.evaluate(input)?;

        let mut lower = input.clone();
        lower.base_cost_per_session = input.base_cost_per_session * (1.0 - band);
        let mut higher = input.clone();
        higher.base_cost_per_session = input.base_cost_per_session * (1.0 + band);

        Ok(UptakeBand {
            lower_cost_uptake: engine.evaluate(&lower)?.endorse_prob,
            base_uptake: base.endorse_prob,
            higher_cost_uptake: engine.evaluate(&higher)?.endorse_prob,
        })
    }
}

/// Mean end-of-month discount factor over the horizon at an annual rate
fn discount_factor(annual_rate: f64, horizon_months: u32) -> f64 {
    if annual_rate == 0.0 || horizon_months == 0 {
        return 1.0;
    }
    let monthly = (1.0 + annual_rate).powf(1.0 / 12.0);
    let total: f64 = (1..=horizon_months)
        .map(|m| monthly.powi(-(m as i32)))
        .sum();
    total / f64::from(horizon_months)
}

fn validate_factor(field: &'static str, factor: Option<f64>) -> EngineResult<()> {
    match factor {
        Some(f) if !f.is_finite() || f < 0.0 => Err(EngineError::Validation {
            field,
            value: f,
            reason: "scaling factor must be finite and non-negative",
        }),
        _ => Ok(()),
    }
}
