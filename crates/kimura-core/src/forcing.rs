/// Rainfall forcing and its step-hold sampling onto the model grid.
///
/// Rainfall is reported as a rate over the preceding reporting interval, so
/// the rate applied at grid instant `t` is the most recent sample at or
/// before `t` (zero-order hold, right-continuous at sample instants).
use serde::{Deserialize, Serialize};

use crate::error::{require_positive, ModelError, Result};

/// Largest model grid `simulate` will allocate.
pub const MAX_GRID_LEN: usize = 1 << 27;

/// One row of a rainfall record, as read from CSV or JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainfallRecord {
    /// Timestamp [hr].
    pub time: f64,
    /// Rainfall intensity [mm/hr].
    pub rainfall: f64,
}

/// Validated, immutable rainfall record.
///
/// Timestamps are finite and strictly increasing; intensities are finite
/// and non-negative. The record is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallSeries {
    time: Vec<f64>,
    intensity: Vec<f64>,
}

impl RainfallSeries {
    /// Create a new RainfallSeries with validation.
    pub fn new(time: Vec<f64>, intensity: Vec<f64>) -> Result<Self> {
        if time.is_empty() {
            return Err(ModelError::InvalidForcing(
                "rainfall record is empty".to_string(),
            ));
        }
        if time.len() != intensity.len() {
            return Err(ModelError::InvalidForcing(format!(
                "time length {} does not match rainfall length {}",
                time.len(),
                intensity.len()
            )));
        }
        if let Some(i) = time.iter().position(|t| !t.is_finite()) {
            return Err(ModelError::InvalidForcing(format!(
                "timestamp {i} is not finite"
            )));
        }
        if let Some(i) = time.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ModelError::InvalidForcing(format!(
                "timestamps must be strictly increasing (samples {} and {})",
                i,
                i + 1
            )));
        }
        if let Some(i) = intensity.iter().position(|r| !r.is_finite() || *r < 0.0) {
            return Err(ModelError::InvalidForcing(format!(
                "rainfall at sample {i} must be finite and >= 0, got {}",
                intensity[i]
            )));
        }
        Ok(Self { time, intensity })
    }

    /// Build a series from deserialized rows.
    pub fn from_records(records: &[RainfallRecord]) -> Result<Self> {
        let time = records.iter().map(|r| r.time).collect();
        let intensity = records.iter().map(|r| r.rainfall).collect();
        Self::new(time, intensity)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always `false`: construction rejects empty records.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    /// Timestamp of the last sample; it bounds the model grid.
    pub fn last_time(&self) -> f64 {
        self.time[self.time.len() - 1]
    }

    /// Step-held rainfall rate at `t`, or `None` before the first sample.
    ///
    /// Binary search; use [`RainfallSampler`] when querying in time order.
    pub fn value_at(&self, t: f64) -> Option<f64> {
        let idx = self.time.partition_point(|&x| x <= t);
        if idx == 0 {
            None
        } else {
            Some(self.intensity[idx - 1])
        }
    }

    /// Monotone cursor over this series.
    pub fn sampler(&self) -> RainfallSampler<'_> {
        RainfallSampler {
            series: self,
            cursor: 0,
        }
    }

    /// Number of grid points `floor(last_time / dt)`.
    ///
    /// Fails when the grid would exceed [`MAX_GRID_LEN`] points.
    pub fn grid_len(&self, dt: f64) -> Result<usize> {
        let dt = require_positive("dt", dt)?;
        let ratio = (self.last_time() / dt).floor();
        if !ratio.is_finite() || ratio > MAX_GRID_LEN as f64 {
            return Err(ModelError::invalid(
                "dt",
                dt,
                "too small for the record length",
            ));
        }
        if ratio <= 0.0 {
            Ok(0)
        } else {
            Ok(ratio as usize)
        }
    }

    /// Rainfall rate at each instant `n * dt` for `n` in `0..n_steps`.
    pub fn sample_grid(&self, dt: f64, n_steps: usize) -> Result<Vec<f64>> {
        let dt = require_positive("dt", dt)?;
        if n_steps > MAX_GRID_LEN {
            return Err(ModelError::InvalidForcing(format!(
                "{n_steps} grid steps exceed the limit of {MAX_GRID_LEN}"
            )));
        }
        let mut sampler = self.sampler();
        let mut out = Vec::with_capacity(n_steps);
        for n in 0..n_steps {
            let t = dt * n as f64;
            let r = sampler.sample(t).ok_or_else(|| {
                ModelError::InvalidForcing(format!(
                    "no rainfall sample at or before t = {t} (record starts at {})",
                    self.time[0]
                ))
            })?;
            out.push(r);
        }
        Ok(out)
    }
}

/// Check one rainfall rate on the model grid.
pub(crate) fn check_rate(n: usize, rate: f64) -> Result<f64> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ModelError::InvalidForcing(format!(
            "rainfall at step {n} must be finite and >= 0, got {rate}"
        )));
    }
    Ok(rate)
}

/// Step-hold lookup with a cursor that only moves forward.
///
/// Queries must come in non-decreasing time order; each sample is passed
/// over at most once across a whole run.
#[derive(Debug, Clone)]
pub struct RainfallSampler<'a> {
    series: &'a RainfallSeries,
    cursor: usize,
}

impl RainfallSampler<'_> {
    /// Step-held rainfall rate at `t`, or `None` before the first sample.
    pub fn sample(&mut self, t: f64) -> Option<f64> {
        let time = &self.series.time;
        while self.cursor + 1 < time.len() && time[self.cursor + 1] <= t {
            self.cursor += 1;
        }
        if time[self.cursor] <= t {
            Some(self.series.intensity[self.cursor])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> RainfallSeries {
        RainfallSeries::new(vec![0.0, 1.0, 2.5, 4.0], vec![5.0, 8.0, 0.0, 3.0]).unwrap()
    }

    // -- Validation --

    #[test]
    fn rejects_empty_record() {
        let err = RainfallSeries::new(vec![], vec![]).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = RainfallSeries::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn rejects_non_increasing_timestamps() {
        assert!(RainfallSeries::new(vec![0.0, 1.0, 1.0], vec![1.0; 3]).is_err());
        assert!(RainfallSeries::new(vec![0.0, 2.0, 1.0], vec![1.0; 3]).is_err());
    }

    #[test]
    fn rejects_negative_or_nan_rainfall() {
        assert!(RainfallSeries::new(vec![0.0, 1.0], vec![1.0, -0.1]).is_err());
        assert!(RainfallSeries::new(vec![0.0, 1.0], vec![f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn check_rate_rejects_negative_and_non_finite() {
        assert_eq!(check_rate(0, 0.0).unwrap(), 0.0);
        assert_eq!(check_rate(3, 12.5).unwrap(), 12.5);
        let err = check_rate(2, -4.0).unwrap_err();
        assert!(matches!(err, ModelError::InvalidForcing(_)));
        assert!(err.to_string().contains("step 2"));
        assert!(check_rate(0, f64::NAN).is_err());
        assert!(check_rate(0, f64::INFINITY).is_err());
    }

    #[test]
    fn from_records_keeps_order() {
        let rows = [
            RainfallRecord { time: 0.0, rainfall: 2.0 },
            RainfallRecord { time: 1.0, rainfall: 4.0 },
        ];
        let s = RainfallSeries::from_records(&rows).unwrap();
        assert_eq!(s.time(), &[0.0, 1.0]);
        assert_eq!(s.intensity(), &[2.0, 4.0]);
    }

    // -- Step-hold lookup --

    #[test]
    fn value_at_holds_previous_sample() {
        let s = series();
        assert_eq!(s.value_at(0.0), Some(5.0));
        assert_eq!(s.value_at(0.7), Some(5.0));
        assert_eq!(s.value_at(3.9), Some(0.0));
        assert_eq!(s.value_at(10.0), Some(3.0));
    }

    #[test]
    fn value_at_is_right_continuous() {
        let s = series();
        assert_eq!(s.value_at(1.0), Some(8.0));
        assert_eq!(s.value_at(1.0 + 1e-9), Some(8.0));
        assert_eq!(s.value_at(1.0 - 1e-9), Some(5.0));
    }

    #[test]
    fn value_before_first_sample_is_none() {
        let s = RainfallSeries::new(vec![0.5, 1.0], vec![1.0, 2.0]).unwrap();
        assert_eq!(s.value_at(0.0), None);
    }

    #[test]
    fn sampler_matches_binary_search() {
        let s = series();
        let mut sampler = s.sampler();
        for i in 0..50 {
            let t = i as f64 * 0.1;
            assert_eq!(sampler.sample(t), s.value_at(t), "t = {t}");
        }
    }

    // -- Grid --

    #[test]
    fn grid_len_floors() {
        let s = series();
        assert_eq!(s.grid_len(1.0).unwrap(), 4);
        assert_eq!(s.grid_len(1.5).unwrap(), 2);
        assert_eq!(s.grid_len(5.0).unwrap(), 0);
        assert!(s.grid_len(0.0).is_err());
    }

    #[test]
    fn grid_len_rejects_tiny_dt() {
        let s = series();
        let err = s.grid_len(1e-300).unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameter { name: "dt", .. }));
        assert!(err.to_string().contains("too small"));
        assert!(s.grid_len(f64::MIN_POSITIVE).is_err());
    }

    #[test]
    fn sample_grid_rejects_oversized_request() {
        let s = series();
        assert!(matches!(
            s.sample_grid(1.0, usize::MAX),
            Err(ModelError::InvalidForcing(_))
        ));
    }

    #[test]
    fn sample_grid_steps_on_boundaries() {
        let s = series();
        let grid = s.sample_grid(0.5, 8).unwrap();
        assert_eq!(grid, vec![5.0, 5.0, 8.0, 8.0, 8.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn sample_grid_rejects_late_record() {
        let s = RainfallSeries::new(vec![0.5, 2.0], vec![1.0, 2.0]).unwrap();
        let err = s.sample_grid(1.0, 2).unwrap_err();
        assert!(matches!(err, ModelError::InvalidForcing(_)));
    }
}
