//! Scenario configuration.
//!
//! A scenario bundles everything a run needs besides the rainfall record:
//! the integration step, the reservoir parameters and the catchment
//! description. Scenarios are read from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::discharge::Catchment;
use crate::error::{require_positive, ModelError, Result};
use crate::kimura::params::Parameters;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Integration step [hr].
    pub dt: f64,
    pub parameters: Parameters,
    pub catchment: Catchment,
}

impl Scenario {
    /// Check every field; deserialization alone does not.
    pub fn validate(&self) -> Result<()> {
        require_positive("dt", self.dt)?;
        self.parameters.validate()?;
        self.catchment.validate()
    }

    /// Parse and validate a JSON scenario.
    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(text)
            .map_err(|e| ModelError::InvalidConfig(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read a JSON scenario from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ModelError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }
}
