//! Error taxonomy for the scenario evaluation engine
//!
//! Two recoverable-by-the-caller classes: configuration errors (unknown
//! attribute levels or region codes, bad model constants) and validation
//! errors (out-of-domain numeric input). Arithmetic edge cases such as a
//! zero-cost BCR are represented as values, not errors.

use thiserror::Error;

use crate::model::Dimension;

/// Errors raised by model configuration and scenario evaluation
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unrecognized attribute level for a dimension
    #[error("unknown level '{level}' for dimension {dimension:?}")]
    UnknownLevel { dimension: Dimension, level: String },

    /// Unrecognized region code in the cost-of-living table
    #[error("unknown region code '{region}'")]
    UnknownRegion { region: String },

    /// Model constants violate a structural requirement
    #[error("invalid model configuration: {reason}")]
    Configuration { reason: String },

    /// Numeric scenario input outside its legal domain
    #[error("invalid scenario input: {field} = {value} ({reason})")]
    Validation {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl EngineError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        EngineError::Configuration {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the engine
pub type EngineResult<T> = Result<T, EngineError>;
