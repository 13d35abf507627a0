//! Programme attribute catalog
//!
//! Registry of the five programme attribute dimensions with their levels and
//! fitted DCE coefficients. Each dimension has exactly one baseline level
//! contributing zero utility and zero WTP; the baseline is stored explicitly
//! so that selecting it is a recognised choice rather than a fallback.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Programme attribute dimensions elicited in the DCE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ProgrammeType,
    Method,
    Frequency,
    Duration,
    Accessibility,
}

impl Dimension {
    /// All dimensions in catalog order
    pub const ALL: [Dimension; 5] = [
        Dimension::ProgrammeType,
        Dimension::Method,
        Dimension::Frequency,
        Dimension::Duration,
        Dimension::Accessibility,
    ];
}

/// One attribute level with its fitted coefficients
///
/// `utility_coef` enters the logit utility; `wtp_coef` is the AUD-per-session
/// WTP point estimate from the same DCE wave. Baselines carry (0, 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeLevel {
    pub dimension: Dimension,
    pub level_key: String,
    pub utility_coef: f64,
    pub wtp_coef: f64,
    /// True for the reference level of the dimension
    pub baseline: bool,
}

/// Lookup table keyed by (dimension, level key)
#[derive(Debug, Clone)]
pub struct AttributeCatalog {
    levels: Vec<AttributeLevel>,
}

impl AttributeCatalog {
    /// Build a catalog from an explicit level list
    ///
    /// Requires exactly one baseline per dimension and that every baseline
    /// carries zero coefficients.
    pub fn new(levels: Vec<AttributeLevel>) -> EngineResult<Self> {
        for dim in Dimension::ALL {
            let baselines: Vec<&AttributeLevel> = levels
                .iter()
                .filter(|l| l.dimension == dim && l.baseline)
                .collect();
            if baselines.len() != 1 {
                return Err(EngineError::configuration(format!(
                    "dimension {:?} has {} baseline levels, expected exactly 1",
                    dim,
                    baselines.len()
                )));
            }
            let base = baselines[0];
            if base.utility_coef != 0.0 || base.wtp_coef != 0.0 {
                return Err(EngineError::configuration(format!(
                    "baseline level '{}' of {:?} must carry zero coefficients",
                    base.level_key, dim
                )));
            }
        }
        Ok(Self { levels })
    }

    /// Catalog for the fitted LonelyLess DCE wave
    ///
    /// Utility coefficients from the main mixed logit estimates; WTP values
    /// are the published AUD-per-participant-per-session point estimates.
    pub fn default_lonelyless() -> Self {
        let mut levels = Vec::with_capacity(15);

        let mut push = |dim: Dimension, key: &str, util: f64, wtp: f64, baseline: bool| {
            levels.push(AttributeLevel {
                dimension: dim,
                level_key: key.to_string(),
                utility_coef: util,
                wtp_coef: wtp,
                baseline,
            });
        };

        // Programme type (peer support reference)
        push(Dimension::ProgrammeType, "peer", 0.0, 0.0, true);
        push(Dimension::ProgrammeType, "comm", 0.527, 14.47, false);
        push(Dimension::ProgrammeType, "psych", 0.156, 4.28, false);
        push(Dimension::ProgrammeType, "vr", -0.349, -9.58, false);

        // Method of participation (in-person reference)
        push(Dimension::Method, "inperson", 0.0, 0.0, true);
        push(Dimension::Method, "virtual", -0.426, -11.69, false);
        push(Dimension::Method, "hybrid", -0.289, -7.95, false);

        // Frequency of interaction (daily reference)
        push(Dimension::Frequency, "daily", 0.0, 0.0, true);
        push(Dimension::Frequency, "weekly", 0.617, 16.93, false);
        push(Dimension::Frequency, "monthly", 0.336, 9.21, false);

        // Session duration (30-minute reference)
        push(Dimension::Duration, "30min", 0.0, 0.0, true);
        push(Dimension::Duration, "2hrs", 0.185, 5.08, false);
        push(Dimension::Duration, "4hrs", 0.213, 5.85, false);

        // Accessibility / travel distance (at-home reference)
        push(Dimension::Accessibility, "home", 0.0, 0.0, true);
        push(Dimension::Accessibility, "local", 0.059, 1.62, false);
        push(Dimension::Accessibility, "wider", -0.509, -13.99, false);

        Self::new(levels).expect("fitted default catalog satisfies invariants")
    }

    /// Look up a level by dimension and key
    ///
    /// An unrecognized key is a configuration error; the catalog never
    /// substitutes the baseline on a miss.
    pub fn level(&self, dimension: Dimension, level_key: &str) -> EngineResult<&AttributeLevel> {
        self.levels
            .iter()
            .find(|l| l.dimension == dimension && l.level_key == level_key)
            .ok_or_else(|| EngineError::UnknownLevel {
                dimension,
                level: level_key.to_string(),
            })
    }

    /// Baseline level key for a dimension
    pub fn baseline(&self, dimension: Dimension) -> &AttributeLevel {
        // new() guarantees exactly one baseline per dimension
        self.levels
            .iter()
            .find(|l| l.dimension == dimension && l.baseline)
            .expect("catalog invariant: one baseline per dimension")
    }

    /// All levels in catalog order
    pub fn levels(&self) -> &[AttributeLevel] {
        &self.levels
    }
}
