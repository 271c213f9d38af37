//! Conversion of outflow heights into catchment discharge.
//!
//! Stateless post-processing of a [`Simulation`]: area-weighted combination
//! of the two sub-area heights plus baseflow, then a constant lag shift.

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, ModelError, Result};
use crate::kimura::constants::MM_HR_KM2_PER_M3_S;
use crate::kimura::run::{DischargeHeights, Simulation};

/// Catchment-scale parameters used after integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Catchment {
    /// Catchment area A [km²].
    pub area: f64,
    /// Baseflow Qb [m³/s].
    pub baseflow: f64,
    /// Runoff sub-area fraction f1 [-].
    pub runoff_fraction: f64,
    /// Lag time Tl [hr].
    #[serde(default)]
    pub lag: f64,
}

impl Catchment {
    /// Create validated catchment parameters.
    pub fn new(area: f64, baseflow: f64, runoff_fraction: f64, lag: f64) -> Result<Self> {
        let catchment = Self {
            area,
            baseflow,
            runoff_fraction,
            lag,
        };
        catchment.validate()?;
        Ok(catchment)
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("area", self.area)?;
        require_non_negative("baseflow", self.baseflow)?;
        require_non_negative("lag", self.lag)?;
        let f1 = self.runoff_fraction;
        if !f1.is_finite() || !(0.0..=1.0).contains(&f1) {
            return Err(ModelError::invalid(
                "runoff_fraction",
                f1,
                "must lie in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Discharge at the outlet for a simulation, labelled with lagged time.
    pub fn hydrograph(&self, simulation: &Simulation) -> Result<Hydrograph> {
        let discharge = combine(&simulation.heights, self)?;
        Ok(apply_lag(discharge, simulation.heights.dt, self.lag))
    }
}

/// `Q = (f1 q1 + (1 - f1) q2) A / 3.6 + Qb` [m³/s], elementwise.
pub fn combine(heights: &DischargeHeights, catchment: &Catchment) -> Result<Vec<f64>> {
    catchment.validate()?;
    if heights.runoff.len() != heights.infiltration.len() {
        return Err(ModelError::LengthMismatch {
            what: "infiltration heights",
            expected: heights.runoff.len(),
            actual: heights.infiltration.len(),
        });
    }

    let f1 = catchment.runoff_fraction;
    let scale = catchment.area / MM_HR_KM2_PER_M3_S;
    Ok(heights
        .runoff
        .iter()
        .zip(&heights.infiltration)
        .map(|(q1, q2)| (f1 * q1 + (1.0 - f1) * q2) * scale + catchment.baseflow)
        .collect())
}

/// Discharge series with the time at which each value is observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hydrograph {
    pub time: Vec<f64>,
    pub discharge: Vec<f64>,
}

impl Hydrograph {
    pub fn len(&self) -> usize {
        self.discharge.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discharge.is_empty()
    }

    /// Step-held discharge observed at `t`, or `None` before the first
    /// labelled instant.
    pub fn discharge_at(&self, t: f64) -> Option<f64> {
        let idx = self.time.partition_point(|&x| x <= t);
        if idx == 0 {
            None
        } else {
            Some(self.discharge[idx - 1])
        }
    }
}

/// Relabel a discharge series computed on `0, dt, 2dt, ...` so that sample
/// `n` is observed at `n dt + lag`. Values are not modified.
pub fn apply_lag(discharge: Vec<f64>, dt: f64, lag: f64) -> Hydrograph {
    let time = (0..discharge.len()).map(|n| n as f64 * dt + lag).collect();
    Hydrograph { time, discharge }
}
