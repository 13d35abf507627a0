//! Scenario configuration as supplied by the consuming UI layer
//!
//! A [`ScenarioInput`] is a plain record of one fully-specified programme
//! configuration. The UI validates presence and range before construction;
//! the engine re-validates defensively on every evaluation.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Sessions per month for daily interaction
pub const SESSIONS_PER_MONTH_DAILY: f64 = 30.0;
/// Sessions per month for weekly interaction
pub const SESSIONS_PER_MONTH_WEEKLY: f64 = 4.0;
/// Sessions per month for monthly interaction
pub const SESSIONS_PER_MONTH_MONTHLY: f64 = 1.0;

/// Cadence implied by a frequency level key
///
/// The cadence conversion is deliberately explicit rather than folded into a
/// units constant elsewhere; an unknown frequency key is a configuration
/// error just like any other unrecognized level.
pub fn sessions_per_month(frequency_key: &str) -> EngineResult<f64> {
    match frequency_key {
        "daily" => Ok(SESSIONS_PER_MONTH_DAILY),
        "weekly" => Ok(SESSIONS_PER_MONTH_WEEKLY),
        "monthly" => Ok(SESSIONS_PER_MONTH_MONTHLY),
        other => Err(EngineError::UnknownLevel {
            dimension: crate::model::Dimension::Frequency,
            level: other.to_string(),
        }),
    }
}

/// Regional cost adjustment setting
///
/// Region-blind costing is an explicit choice distinct from any region code,
/// so an unknown code can fail loudly instead of falling back to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostAdjustment {
    /// Use the base cost as-is
    Unadjusted,
    /// Scale the base cost by the region's cost-of-living multiplier
    Region(String),
}

/// Target population, either as a flat cohort or as groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Population {
    Cohort { size: f64 },
    Groups { participants_per_group: f64, groups: f64 },
}

impl Population {
    /// Total participants before uptake is applied
    pub fn total(&self) -> f64 {
        match self {
            Population::Cohort { size } => *size,
            Population::Groups {
                participants_per_group,
                groups,
            } => participants_per_group * groups,
        }
    }

    fn validate(&self) -> EngineResult<()> {
        match self {
            Population::Cohort { size } => check_non_negative("cohort_size", *size),
            Population::Groups {
                participants_per_group,
                groups,
            } => {
                check_non_negative("participants_per_group", *participants_per_group)?;
                check_non_negative("groups", *groups)
            }
        }
    }
}

/// Evaluation horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    Months(u32),
    Years(u32),
}

impl Horizon {
    /// Horizon length in months (years convert explicitly)
    pub fn months(&self) -> u32 {
        match self {
            Horizon::Months(m) => *m,
            Horizon::Years(y) => y * 12,
        }
    }
}

/// One fully-specified programme configuration
///
/// Treated as immutable by the engine: evaluation only ever borrows it, and
/// a changed setting means a new input and a new evaluation. Fields stay
/// public for the UI/deserialization boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Selected level key per attribute dimension
    pub programme_type: String,
    pub method: String,
    pub frequency: String,
    pub duration: String,
    pub accessibility: String,

    /// Base programme cost per participant per session, AUD at the
    /// reference region
    pub base_cost_per_session: f64,
    pub cost_adjustment: CostAdjustment,
    /// Add the configured opportunity cost on top of direct costs
    pub include_opportunity_cost: bool,

    pub population: Population,
    pub horizon: Horizon,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ScenarioInput {
    /// Defensive numeric validation
    ///
    /// Negative or non-finite figures are never clamped; they indicate a
    /// caller bug and must surface as errors. A zero population is legal.
    pub fn validate(&self) -> EngineResult<()> {
        check_non_negative("base_cost_per_session", self.base_cost_per_session)?;
        self.population.validate()?;
        if self.horizon.months() < 1 {
            return Err(EngineError::Validation {
                field: "horizon",
                value: self.horizon.months() as f64,
                reason: "horizon must cover at least one month",
            });
        }
        Ok(())
    }

    /// Selected level key per dimension, in catalog order
    pub fn selected_levels(&self) -> [(crate::model::Dimension, &str); 5] {
        use crate::model::Dimension;
        [
            (Dimension::ProgrammeType, self.programme_type.as_str()),
            (Dimension::Method, self.method.as_str()),
            (Dimension::Frequency, self.frequency.as_str()),
            (Dimension::Duration, self.duration.as_str()),
            (Dimension::Accessibility, self.accessibility.as_str()),
        ]
    }

    /// Illustrative example scenario: community engagement, in-person,
    /// weekly 2-hour sessions in the local area, NSW costing
    pub fn example() -> Self {
        Self {
            programme_type: "comm".to_string(),
            method: "inperson".to_string(),
            frequency: "weekly".to_string(),
            duration: "2hrs".to_string(),
            accessibility: "local".to_string(),
            base_cost_per_session: 40.0,
            cost_adjustment: CostAdjustment::Region("NSW".to_string()),
            include_opportunity_cost: true,
            population: Population::Cohort { size: 1000.0 },
            horizon: Horizon::Months(2),
            name: Some("Example community programme".to_string()),
            notes: None,
        }
    }
}

fn check_non_negative(field: &'static str, value: f64) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(EngineError::Validation {
            field,
            value,
            reason: "value must be finite",
        });
    }
    if value < 0.0 {
        return Err(EngineError::Validation {
            field,
            value,
            reason: "value must not be negative",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_conversion() {
        assert_eq!(sessions_per_month("daily").unwrap(), 30.0);
        assert_eq!(sessions_per_month("weekly").unwrap(), 4.0);
        assert_eq!(sessions_per_month("monthly").unwrap(), 1.0);
        assert!(sessions_per_month("fortnightly").is_err());
    }

    #[test]
    fn test_horizon_year_conversion() {
        assert_eq!(Horizon::Years(2).months(), 24);
        assert_eq!(Horizon::Months(18).months(), 18);
    }

    #[test]
    fn test_population_total() {
        let cohort = Population::Cohort { size: 1000.0 };
        assert_eq!(cohort.total(), 1000.0);

        let groups = Population::Groups {
            participants_per_group: 25.0,
            groups: 40.0,
        };
        assert_eq!(groups.total(), 1000.0);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let mut input = ScenarioInput::example();
        input.base_cost_per_session = -1.0;
        assert!(matches!(
            input.validate(),
            Err(EngineError::Validation { field: "base_cost_per_session", .. })
        ));

        let mut input = ScenarioInput::example();
        input.population = Population::Groups {
            participants_per_group: 25.0,
            groups: -2.0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let mut input = ScenarioInput::example();
        input.horizon = Horizon::Months(0);
        assert!(input.validate().is_err());
        input.horizon = Horizon::Years(0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_zero_population_is_legal() {
        let mut input = ScenarioInput::example();
        input.population = Population::Cohort { size: 0.0 };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_input_json_round_trip() {
        let input = ScenarioInput::example();
        let json = serde_json::to_string(&input).unwrap();
        let back: ScenarioInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }
}
