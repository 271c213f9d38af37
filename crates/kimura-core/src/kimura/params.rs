/// Kimura storage-function parameters.
///
/// Each sub-area is a nonlinear reservoir `s = k * q^p` with its own pair:
/// - `k`: storage coefficient (> 0)
/// - `p`: storage exponent (> 0)
///
/// The infiltration sub-area additionally saturates once cumulative rainfall
/// exceeds `rsa` [mm].
use serde::{Deserialize, Serialize};

use super::constants::{N_PARAMS, PARAM_BOUNDS, PARAM_NAMES};
use crate::error::{require_non_negative, require_positive, Result};
use crate::traits::{check_len, ModelParams};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservoirParams {
    pub k: f64,
    pub p: f64,
}

impl ReservoirParams {
    /// Create a validated reservoir parameter pair.
    pub fn new(k: f64, p: f64) -> Result<Self> {
        let k = require_positive("k", k)?;
        let p = require_positive("p", p)?;
        Ok(Self { k, p })
    }

    /// Re-check a pair that may have been built field by field
    /// (e.g. deserialized).
    pub fn validate(&self) -> Result<()> {
        require_positive("k", self.k)?;
        require_positive("p", self.p)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Runoff sub-area reservoir.
    pub runoff: ReservoirParams,
    /// Infiltration sub-area reservoir.
    pub infiltration: ReservoirParams,
    /// Saturation rainfall depth [mm].
    pub rsa: f64,
}

impl Parameters {
    /// Create Parameters with a distinct `(k, p)` per sub-area.
    pub fn new(runoff: ReservoirParams, infiltration: ReservoirParams, rsa: f64) -> Result<Self> {
        let rsa = require_non_negative("rsa", rsa)?;
        Ok(Self {
            runoff,
            infiltration,
            rsa,
        })
    }

    /// Create Parameters where both sub-areas share one `(k, p)` pair.
    pub fn shared(k: f64, p: f64, rsa: f64) -> Result<Self> {
        let reservoir = ReservoirParams::new(k, p)?;
        Self::new(reservoir, reservoir, rsa)
    }

    /// Validate every field.
    pub fn validate(&self) -> Result<()> {
        self.runoff.validate()?;
        self.infiltration.validate()?;
        require_non_negative("rsa", self.rsa)?;
        Ok(())
    }
}

impl ModelParams for Parameters {
    const N_PARAMS: usize = N_PARAMS;
    const PARAM_NAMES: &'static [&'static str] = PARAM_NAMES;
    const PARAM_BOUNDS: &'static [(f64, f64)] = PARAM_BOUNDS;

    fn from_array(arr: &[f64]) -> Result<Self> {
        check_len("parameters", Self::N_PARAMS, arr)?;
        Self::new(
            ReservoirParams::new(arr[0], arr[1])?,
            ReservoirParams::new(arr[2], arr[3])?,
            arr[4],
        )
    }

    fn to_array(&self) -> Vec<f64> {
        vec![
            self.runoff.k,
            self.runoff.p,
            self.infiltration.k,
            self.infiltration.p,
            self.rsa,
        ]
    }
}
