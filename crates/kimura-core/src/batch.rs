//! Independent evaluation of many parameter sets over one rainfall record.
//!
//! Runs share no state, so they are spread over the rayon thread pool.
//! Results keep the order of the parameter sets.

use log::debug;
use rayon::prelude::*;

use crate::error::Result;
use crate::forcing::RainfallSeries;
use crate::kimura::params::Parameters;
use crate::kimura::run::{simulate, Simulation};
use crate::traits::ModelParams;

/// Simulate every parameter set against the same rainfall.
///
/// A failing scenario does not affect the others.
pub fn run_batch(
    rainfall: &RainfallSeries,
    dt: f64,
    parameter_sets: &[Parameters],
) -> Vec<Result<Simulation>> {
    debug!("running batch of {} scenarios", parameter_sets.len());
    parameter_sets
        .par_iter()
        .map(|params| simulate(params, rainfall, dt))
        .collect()
}

/// `n` parameter sets spread evenly over [`ModelParams::PARAM_BOUNDS`].
///
/// Set `i` sits at fraction `(i + 0.5) / n` of every range, so all sets lie
/// strictly inside the bounds.
pub fn bounds_sweep(n: usize) -> Result<Vec<Parameters>> {
    (0..n)
        .map(|i| {
            let u = (i as f64 + 0.5) / n as f64;
            let arr: Vec<f64> = Parameters::PARAM_BOUNDS
                .iter()
                .map(|&(lo, hi)| lo + u * (hi - lo))
                .collect();
            Parameters::from_array(&arr)
        })
        .collect()
}

/// Peak runoff-area height of each scenario, `None` for failed runs.
pub fn peak_runoff_heights(results: &[Result<Simulation>]) -> Vec<Option<f64>> {
    results
        .iter()
        .map(|r| {
            r.as_ref().ok().map(|sim| {
                sim.heights
                    .runoff
                    .iter()
                    .copied()
                    .fold(0.0, f64::max)
            })
        })
        .collect()
}
