/// Kimura model state variables.
///
/// Mutable state threaded through the step loop of one run:
/// - `runoff_height`: q1, outflow height of the runoff sub-area [mm/hr]
/// - `infiltration_height`: q2, outflow height of the infiltration sub-area [mm/hr]
/// - `cumulative_rainfall`: rainfall depth applied so far [mm]
/// - `saturated`: infiltration sub-area saturated; never resets within a run
use super::constants::STATE_SIZE;
use super::params::Parameters;
use crate::error::{ModelError, Result};
use crate::traits::{check_len, ModelState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub runoff_height: f64,
    pub infiltration_height: f64,
    pub cumulative_rainfall: f64,
    pub saturated: bool,
}

impl State {
    /// Create the initial state: dry reservoirs, nothing accumulated.
    ///
    /// Parameters do not influence the initial state; the argument keeps
    /// the signature uniform with other models.
    pub fn initialize(_params: &Parameters) -> Self {
        Self::dry()
    }

    /// Empty reservoirs, no accumulated rainfall, unsaturated.
    pub fn dry() -> Self {
        Self {
            runoff_height: 0.0,
            infiltration_height: 0.0,
            cumulative_rainfall: 0.0,
            saturated: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::dry()
    }
}

impl ModelState for State {
    fn to_vec(&self) -> Vec<f64> {
        vec![
            self.runoff_height,
            self.infiltration_height,
            self.cumulative_rainfall,
            if self.saturated { 1.0 } else { 0.0 },
        ]
    }

    fn from_slice(arr: &[f64]) -> Result<Self> {
        check_len("state elements", STATE_SIZE, arr)?;
        for (name, &v) in ["runoff_height", "infiltration_height", "cumulative_rainfall"]
            .iter()
            .zip(arr)
        {
            if !v.is_finite() || v < 0.0 {
                return Err(ModelError::invalid(*name, v, "must be finite and >= 0"));
            }
        }
        let saturated = match arr[3] {
            f if f == 0.0 => false,
            f if f == 1.0 => true,
            f => return Err(ModelError::invalid("saturated", f, "must be 0 or 1")),
        };
        Ok(Self {
            runoff_height: arr[0],
            infiltration_height: arr[1],
            cumulative_rainfall: arr[2],
            saturated,
        })
    }

    fn array_len(&self) -> usize {
        STATE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_dry() {
        let p = Parameters::shared(10.0, 0.6, 20.0).unwrap();
        let s = State::initialize(&p);
        assert_eq!(s, State::default());
        assert_eq!(s.runoff_height, 0.0);
        assert!(!s.saturated);
    }

    #[test]
    fn to_vec_from_slice_roundtrip() {
        let s = State {
            runoff_height: 3.0,
            infiltration_height: 1.5,
            cumulative_rainfall: 42.0,
            saturated: true,
        };
        let v = s.to_vec();
        assert_eq!(v.len(), s.array_len());
        assert_eq!(State::from_slice(&v).unwrap(), s);
    }

    #[test]
    fn from_slice_wrong_length() {
        assert!(State::from_slice(&[1.0]).is_err());
        assert!(State::from_slice(&[1.0, 2.0, 3.0, 0.0, 5.0]).is_err());
    }

    #[test]
    fn from_slice_rejects_bad_flag_and_negative_height() {
        assert!(State::from_slice(&[1.0, 1.0, 1.0, 0.5]).is_err());
        assert!(State::from_slice(&[-1.0, 1.0, 1.0, 0.0]).is_err());
    }
}
