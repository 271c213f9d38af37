//! Error types for model setup and integration.

use std::fmt;

use thiserror::Error;

/// Which of the two reservoirs a numeric failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubArea {
    /// Runoff sub-area: all rainfall is effective.
    Runoff,
    /// Infiltration sub-area: rainfall is absorbed until saturation.
    Infiltration,
}

impl fmt::Display for SubArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubArea::Runoff => write!(f, "runoff"),
            SubArea::Infiltration => write!(f, "infiltration"),
        }
    }
}

/// Errors raised while validating inputs or integrating the storage equations.
///
/// All variants abort the current run; no partial series is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A parameter is outside its physical domain.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The rainfall record cannot be used to drive the model.
    #[error("invalid rainfall forcing: {0}")]
    InvalidForcing(String),

    /// The Euler step would raise a negative base to a real power,
    /// or produced a non-finite outflow.
    #[error(
        "numeric domain error at step {step} ({area} area): base = {base}, \
         outflow = {outflow}, effective rainfall = {effective_rainfall}"
    )]
    NumericDomain {
        step: usize,
        area: SubArea,
        base: f64,
        outflow: f64,
        effective_rainfall: f64,
    },

    /// A scenario file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A flat array has the wrong number of elements.
    #[error("expected {expected} {what}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl ModelError {
    /// Shorthand for an [`ModelError::InvalidParameter`].
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Check that `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ModelError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(ModelError::invalid(name, value, "must be > 0"));
    }
    Ok(value)
}

/// Check that `value` is finite and non-negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ModelError::invalid(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(ModelError::invalid(name, value, "must be >= 0"));
    }
    Ok(value)
}
