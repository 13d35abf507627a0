//! Cost-benefit evaluation over a scenario
//!
//! Expands the unit-level outputs (uptake, WTP per session, effective cost
//! per session) into cohort-level economic aggregates: direct and
//! opportunity costs, total benefit, net benefit and benefit-cost ratio.

use serde::{Deserialize, Serialize};

use super::choice::{ChoiceModel, UtilityBreakdown};
use super::wtp::WtpCalculator;
use crate::error::EngineResult;
use crate::model::ModelConfig;
use crate::scenario::input::{sessions_per_month, CostAdjustment};
use crate::scenario::ScenarioInput;

/// Complete numeric output for one scenario
///
/// All values are unformatted AUD / probabilities; presentation (rounding,
/// currency symbols, percent signs) belongs to the consuming layer. The
/// record also carries the primitives sensitivity analysis needs to re-run
/// the aggregation without recomputing the choice model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub endorse_prob: f64,
    pub optout_prob: f64,
    pub utility: UtilityBreakdown,

    /// AUD per participant per session
    pub wtp_per_session: f64,
    /// AUD per participant per session after regional adjustment
    pub effective_cost_per_session: f64,

    pub total_participants: f64,
    pub endorsed_participants: f64,
    pub total_sessions: f64,

    pub direct_cost: f64,
    pub opportunity_cost: f64,
    pub total_cost: f64,
    pub total_benefit: f64,
    pub net_benefit: f64,
    /// None whenever total cost is not strictly positive
    pub bcr: Option<f64>,

    /// Sessions each endorsed participant attends over the horizon
    pub sessions_per_participant: f64,
    /// Opportunity rate actually applied (zero when excluded)
    pub opportunity_rate_applied: f64,
    pub horizon_months: u32,
}

/// Unit-level primitives feeding the aggregation steps
pub(crate) struct AggregationBasis {
    pub endorse_prob: f64,
    pub wtp_per_session: f64,
    pub effective_cost_per_session: f64,
    pub total_participants: f64,
    pub sessions_per_participant: f64,
    pub opportunity_rate: f64,
    /// Uniform discounting of monetary flows; 1.0 when undiscounted
    pub discount_factor: f64,
}

pub(crate) struct Aggregates {
    pub endorsed_participants: f64,
    pub total_sessions: f64,
    pub direct_cost: f64,
    pub opportunity_cost: f64,
    pub total_cost: f64,
    pub total_benefit: f64,
    pub net_benefit: f64,
    pub bcr: Option<f64>,
}

/// Aggregation steps shared by evaluation and sensitivity perturbation
pub(crate) fn aggregate(basis: &AggregationBasis) -> Aggregates {
    let endorsed_participants = basis.total_participants * basis.endorse_prob;
    let total_sessions = endorsed_participants * basis.sessions_per_participant;

    let direct_cost =
        basis.effective_cost_per_session * total_sessions * basis.discount_factor;
    let opportunity_cost = direct_cost * basis.opportunity_rate;
    let total_cost = direct_cost + opportunity_cost;

    let total_benefit = basis.wtp_per_session * total_sessions * basis.discount_factor;
    let net_benefit = total_benefit - total_cost;
    let bcr = if total_cost > 0.0 {
        Some(total_benefit / total_cost)
    } else {
        None
    };

    Aggregates {
        endorsed_participants,
        total_sessions,
        direct_cost,
        opportunity_cost,
        total_cost,
        total_benefit,
        net_benefit,
        bcr,
    }
}

/// Scenario evaluation engine over an injected model configuration
///
/// Stateless apart from the calibration data; every call to
/// [`CostBenefitEngine::evaluate`] is a pure function of its input.
#[derive(Debug, Clone)]
pub struct CostBenefitEngine {
    config: ModelConfig,
}

impl CostBenefitEngine {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Engine over the fitted LonelyLess wave
    pub fn default_lonelyless() -> Self {
        Self::new(ModelConfig::default_lonelyless())
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Evaluate a scenario into its full result record
    pub fn evaluate(&self, input: &ScenarioInput) -> EngineResult<ScenarioResult> {
        input.validate()?;

        // 1. Regional adjustment only when explicitly requested
        let effective_cost_per_session = match &input.cost_adjustment {
            CostAdjustment::Unadjusted => input.base_cost_per_session,
            CostAdjustment::Region(region) => self
                .config
                .regions
                .adjust(input.base_cost_per_session, region)?,
        };

        // 2-3. Unit-level model outputs
        let choice = ChoiceModel::new(&self.config.catalog, &self.config.choice);
        let endorsement = choice.endorsement(input, effective_cost_per_session)?;
        let wtp_per_session =
            WtpCalculator::new(&self.config.catalog).wtp_per_session(input)?;

        // 4-9. Cohort aggregation
        let horizon_months = input.horizon.months();
        let sessions_per_participant =
            sessions_per_month(&input.frequency)? * f64::from(horizon_months);
        let opportunity_rate = if input.include_opportunity_cost {
            self.config.opportunity_rate
        } else {
            0.0
        };

        let aggregates = aggregate(&AggregationBasis {
            endorse_prob: endorsement.endorse_prob,
            wtp_per_session,
            effective_cost_per_session,
            total_participants: input.population.total(),
            sessions_per_participant,
            opportunity_rate,
            discount_factor: 1.0,
        });

        log::debug!(
            "evaluated scenario '{}': uptake {:.4}, net benefit {:.2}",
            input.name.as_deref().unwrap_or("unnamed"),
            endorsement.endorse_prob,
            aggregates.net_benefit
        );

        Ok(ScenarioResult {
            endorse_prob: endorsement.endorse_prob,
            optout_prob: endorsement.optout_prob,
            utility: endorsement.utility,
            wtp_per_session,
            effective_cost_per_session,
            total_participants: input.population.total(),
            endorsed_participants: aggregates.endorsed_participants,
            total_sessions: aggregates.total_sessions,
            direct_cost: aggregates.direct_cost,
            opportunity_cost: aggregates.opportunity_cost,
            total_cost: aggregates.total_cost,
            total_benefit: aggregates.total_benefit,
            net_benefit: aggregates.net_benefit,
            bcr: aggregates.bcr,
            sessions_per_participant,
            opportunity_rate_applied: opportunity_rate,
            horizon_months,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::input::{Horizon, Population};
    use approx::assert_relative_eq;

    /// Reference scenario: comm / inperson / weekly / 2hrs / local, QLD
    /// costing at $40/session, cohort of 1000, two months (8 sessions)
    fn reference_input() -> ScenarioInput {
        let mut input = ScenarioInput::example();
        input.cost_adjustment = CostAdjustment::Region("QLD".to_string());
        input
    }

    #[test]
    fn test_reference_scenario_aggregates() {
        let engine = CostBenefitEngine::default_lonelyless();
        let result = engine.evaluate(&reference_input()).unwrap();

        let p = (-0.164f64).exp() / ((-0.164f64).exp() + 0.131f64.exp());
        assert_relative_eq!(result.endorse_prob, p, epsilon = 1e-12);
        assert_relative_eq!(result.wtp_per_session, 38.10, epsilon = 1e-9);
        assert_eq!(result.effective_cost_per_session, 40.0);
        assert_eq!(result.sessions_per_participant, 8.0);

        assert_relative_eq!(result.endorsed_participants, 1000.0 * p, epsilon = 1e-6);
        assert_relative_eq!(result.total_sessions, 8000.0 * p, epsilon = 1e-6);
        assert_relative_eq!(result.direct_cost, 40.0 * 8000.0 * p, epsilon = 1e-6);
        assert_relative_eq!(result.opportunity_cost, result.direct_cost * 0.20);
        assert_relative_eq!(
            result.total_cost,
            result.direct_cost * 1.20,
            max_relative = 1e-12
        );
        assert_relative_eq!(result.total_benefit, 38.10 * 8000.0 * p, epsilon = 1e-6);
        assert_relative_eq!(
            result.net_benefit,
            result.total_benefit - result.total_cost
        );

        // BCR reduces to wtp / (cost * 1.2) and is independent of uptake
        assert_relative_eq!(result.bcr.unwrap(), 38.10 / 48.0, epsilon = 1e-12);
        assert!((result.bcr.unwrap() - 0.794).abs() < 1e-3);
        assert!(result.net_benefit < 0.0);
    }

    #[test]
    fn test_regional_adjustment_enters_cost_and_uptake() {
        let engine = CostBenefitEngine::default_lonelyless();
        let qld = engine.evaluate(&reference_input()).unwrap();

        let mut nsw_input = reference_input();
        nsw_input.cost_adjustment = CostAdjustment::Region("NSW".to_string());
        let nsw = engine.evaluate(&nsw_input).unwrap();

        assert_relative_eq!(nsw.effective_cost_per_session, 44.0, epsilon = 1e-12);
        // Costlier region depresses modeled uptake
        assert!(nsw.endorse_prob < qld.endorse_prob);
    }

    #[test]
    fn test_unadjusted_costing_bypasses_region_table() {
        let engine = CostBenefitEngine::default_lonelyless();
        let mut input = reference_input();
        input.cost_adjustment = CostAdjustment::Unadjusted;
        let result = engine.evaluate(&input).unwrap();
        assert_eq!(result.effective_cost_per_session, 40.0);
    }

    #[test]
    fn test_unknown_region_is_error() {
        let engine = CostBenefitEngine::default_lonelyless();
        let mut input = reference_input();
        input.cost_adjustment = CostAdjustment::Region("ZZZ".to_string());
        assert!(engine.evaluate(&input).is_err());
    }

    #[test]
    fn test_opportunity_cost_toggle() {
        let engine = CostBenefitEngine::default_lonelyless();
        let mut input = reference_input();
        input.include_opportunity_cost = false;
        let result = engine.evaluate(&input).unwrap();

        assert_eq!(result.opportunity_cost, 0.0);
        assert_eq!(result.opportunity_rate_applied, 0.0);
        assert_relative_eq!(result.total_cost, result.direct_cost);
    }

    #[test]
    fn test_zero_population_yields_zero_aggregates_and_no_bcr() {
        let engine = CostBenefitEngine::default_lonelyless();
        let mut input = reference_input();
        input.population = Population::Cohort { size: 0.0 };
        let result = engine.evaluate(&input).unwrap();

        assert_eq!(result.endorsed_participants, 0.0);
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.total_benefit, 0.0);
        assert_eq!(result.net_benefit, 0.0);
        assert_eq!(result.bcr, None);
    }

    #[test]
    fn test_group_population_matches_flat_cohort() {
        let engine = CostBenefitEngine::default_lonelyless();
        let flat = engine.evaluate(&reference_input()).unwrap();

        let mut grouped = reference_input();
        grouped.population = Population::Groups {
            participants_per_group: 25.0,
            groups: 40.0,
        };
        let result = engine.evaluate(&grouped).unwrap();
        assert_eq!(result.total_participants, 1000.0);
        assert_relative_eq!(result.net_benefit, flat.net_benefit);
    }

    #[test]
    fn test_negative_inputs_rejected_not_clamped() {
        let engine = CostBenefitEngine::default_lonelyless();

        let mut input = reference_input();
        input.base_cost_per_session = -40.0;
        assert!(engine.evaluate(&input).is_err());

        let mut input = reference_input();
        input.population = Population::Cohort { size: -10.0 };
        assert!(engine.evaluate(&input).is_err());
    }

    #[test]
    fn test_horizon_and_cadence_expansion() {
        let engine = CostBenefitEngine::default_lonelyless();

        let mut input = reference_input();
        input.horizon = Horizon::Years(1);
        let yearly = engine.evaluate(&input).unwrap();
        assert_eq!(yearly.horizon_months, 12);
        assert_eq!(yearly.sessions_per_participant, 48.0);

        input.frequency = "monthly".to_string();
        let monthly = engine.evaluate(&input).unwrap();
        assert_eq!(monthly.sessions_per_participant, 12.0);
    }

    #[test]
    fn test_bcr_weakly_decreases_with_cost() {
        let engine = CostBenefitEngine::default_lonelyless();
        let mut previous = f64::INFINITY;
        for cost in [10.0, 20.0, 40.0, 80.0] {
            let mut input = reference_input();
            input.base_cost_per_session = cost;
            let bcr = engine.evaluate(&input).unwrap().bcr.unwrap();
            assert!(bcr < previous);
            previous = bcr;
        }
    }

    #[test]
    fn test_negative_wtp_propagates_into_net_benefit() {
        let engine = CostBenefitEngine::default_lonelyless();
        let mut input = reference_input();
        input.programme_type = "vr".to_string();
        input.method = "virtual".to_string();
        input.accessibility = "wider".to_string();
        let result = engine.evaluate(&input).unwrap();

        assert!(result.wtp_per_session < 0.0);
        assert!(result.total_benefit < 0.0);
        assert!(result.net_benefit < -result.total_cost + 1e-9);
    }

    #[test]
    fn test_result_json_round_trip() {
        let engine = CostBenefitEngine::default_lonelyless();
        let result = engine.evaluate(&reference_input()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: ScenarioResult = serde_json::from_str(&json).unwrap();
        // Floats must survive to the last ULP; coefficient sums like
        // 1.3880000000000001 are the first to betray a lossy parse
        assert_eq!(
            back.utility.attribute_total.to_bits(),
            result.utility.attribute_total.to_bits()
        );
        assert_eq!(back, result);
    }
}
