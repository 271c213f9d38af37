/// Kimura model orchestration functions.
///
/// - `step()`: advance both sub-areas by one explicit Euler step
/// - `run()`: execute over rainfall already sampled on the model grid
/// - `simulate()`: sample a rainfall record and integrate it
use log::{debug, info, warn};

use super::fluxes::{Fluxes, FluxesTimeseries};
use super::params::{Parameters, ReservoirParams};
use super::processes;
use super::state::State;
use crate::error::{require_positive, ModelError, Result, SubArea};
use crate::forcing::{check_rate, RainfallSeries};
use crate::traits::HydrologicalModel;

/// Two aligned outflow-height series on the grid `0, dt, 2dt, ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct DischargeHeights {
    pub dt: f64,
    /// q1 [mm/hr], starting at 0.
    pub runoff: Vec<f64>,
    /// q2 [mm/hr], starting at 0.
    pub infiltration: Vec<f64>,
}

impl DischargeHeights {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.runoff.len()
    }

    /// Returns `true` if the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.runoff.is_empty()
    }

    /// Grid instants `i * dt`.
    pub fn time(&self) -> Vec<f64> {
        (0..self.len()).map(|i| i as f64 * self.dt).collect()
    }
}

/// Result of a full simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub heights: DischargeHeights,
    /// Per-step fluxes, one entry per applied step (`heights.len() - 1`).
    pub fluxes: FluxesTimeseries,
    /// Step at which the infiltration sub-area saturated, if it did.
    pub saturation_step: Option<usize>,
}

/// Advance one reservoir by one Euler step.
fn reservoir_step(
    n: usize,
    area: SubArea,
    outflow: f64,
    effective_rainfall: f64,
    reservoir: &ReservoirParams,
    dt: f64,
) -> Result<f64> {
    let base = processes::storage_base(outflow, effective_rainfall, dt / reservoir.k, reservoir.p);
    processes::outflow_from_base(base, reservoir.p).ok_or_else(|| {
        warn!(
            "{area} reservoir left the real domain at step {n}: base = {base}, outflow = {outflow}"
        );
        ModelError::NumericDomain {
            step: n,
            area,
            base,
            outflow,
            effective_rainfall,
        }
    })
}

/// Execute step `n` of the Kimura model.
///
/// `rainfall` is the step-held rate at `n * dt`. Both sub-areas use it: the
/// runoff area directly, the infiltration area through the saturation rule.
/// A negative or non-finite rate is an [`ModelError::InvalidForcing`].
/// Parameters are assumed validated (see [`run`]).
pub fn step(
    n: usize,
    state: &State,
    params: &Parameters,
    rainfall: f64,
    dt: f64,
) -> Result<(State, Fluxes)> {
    let rainfall = check_rate(n, rainfall)?;

    // Runoff sub-area
    let re1 = rainfall;
    let q1 = reservoir_step(n, SubArea::Runoff, state.runoff_height, re1, &params.runoff, dt)?;

    // Infiltration sub-area
    let (cumulative, re2, saturated) = processes::infiltration_effective_rainfall(
        re1,
        state.cumulative_rainfall,
        state.saturated,
        params.rsa,
        dt,
    );
    if saturated && !state.saturated {
        info!("infiltration area saturated at step {n} (cumulative rainfall {cumulative} mm)");
    }
    let q2 = reservoir_step(
        n,
        SubArea::Infiltration,
        state.infiltration_height,
        re2,
        &params.infiltration,
        dt,
    )?;

    let new_state = State {
        runoff_height: q1,
        infiltration_height: q2,
        cumulative_rainfall: cumulative,
        saturated,
    };

    let fluxes = Fluxes {
        time: n as f64 * dt,
        rainfall,
        cumulative_rainfall: cumulative,
        runoff_effective_rainfall: re1,
        infiltration_effective_rainfall: re2,
        runoff_height: q1,
        infiltration_height: q2,
        runoff_storage: processes::storage(q1, params.runoff.k, params.runoff.p),
        infiltration_storage: processes::storage(
            q2,
            params.infiltration.k,
            params.infiltration.p,
        ),
    };

    Ok((new_state, fluxes))
}

/// Marker type binding the Kimura model to [`HydrologicalModel`].
#[derive(Debug, Clone, Copy)]
pub struct Kimura;

/// Validated parameters and step size for one run.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub params: Parameters,
    pub dt: f64,
}

impl HydrologicalModel for Kimura {
    type Params = Parameters;
    type State = State;
    type Forcing = f64;
    type Fluxes = Fluxes;
    type FluxesTimeseries = FluxesTimeseries;
    type Context = Context;

    fn prepare(params: &Parameters, dt: f64) -> Result<Context> {
        params.validate()?;
        let dt = require_positive("dt", dt)?;
        Ok(Context {
            params: *params,
            dt,
        })
    }

    fn validate_forcing(rainfall: &[f64]) -> Result<()> {
        for (n, &r) in rainfall.iter().enumerate() {
            check_rate(n, r)?;
        }
        Ok(())
    }

    fn initialize_state(params: &Parameters) -> State {
        State::initialize(params)
    }

    fn step(n: usize, state: &State, rainfall: f64, context: &Context) -> Result<(State, Fluxes)> {
        step(n, state, &context.params, rainfall, context.dt)
    }
}

/// Run the Kimura model over rainfall sampled at `0, dt, 2dt, ...`.
///
/// One step per rainfall value. Parameters, `dt` and every rainfall rate
/// are validated before the first step. If no initial state is provided the reservoirs
/// start dry.
pub fn run(
    params: &Parameters,
    rainfall: &[f64],
    dt: f64,
    initial_state: Option<&State>,
) -> Result<FluxesTimeseries> {
    let (fluxes, _) = Kimura::run(params, rainfall, dt, initial_state)?;
    Ok(fluxes)
}

/// Integrate a rainfall record on the uniform grid of spacing `dt`.
///
/// The grid has `floor(last_time / dt)` points. Both height series start
/// at 0 and step `n` fills point `n + 1`.
pub fn simulate(params: &Parameters, rainfall: &RainfallSeries, dt: f64) -> Result<Simulation> {
    params.validate()?;
    let nmax = rainfall.grid_len(dt)?;
    let n_steps = nmax.saturating_sub(1);
    debug!("simulating {nmax} grid points with dt = {dt}");

    let forcing = rainfall.sample_grid(dt, n_steps)?;
    let fluxes = run(params, &forcing, dt, None)?;

    let mut runoff = Vec::with_capacity(nmax);
    let mut infiltration = Vec::with_capacity(nmax);
    if nmax > 0 {
        runoff.push(0.0);
        infiltration.push(0.0);
        runoff.extend_from_slice(&fluxes.runoff_height);
        infiltration.extend_from_slice(&fluxes.infiltration_height);
    }

    // Cumulative rainfall never decreases, so the first excess is the crossing.
    let saturation_step = fluxes
        .cumulative_rainfall
        .iter()
        .position(|&c| c > params.rsa);

    Ok(Simulation {
        heights: DischargeHeights {
            dt,
            runoff,
            infiltration,
        },
        fluxes,
        saturation_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear_params(rsa: f64) -> Parameters {
        Parameters::shared(1.0, 1.0, rsa).unwrap()
    }

    // -- step() tests --

    #[test]
    fn step_returns_finite_values() {
        let p = Parameters::shared(20.0, 0.6, 30.0).unwrap();
        let (s, f) = step(0, &State::dry(), &p, 12.0, 0.5).unwrap();
        assert!(s.runoff_height.is_finite());
        assert!(s.infiltration_height.is_finite());
        assert!(f.runoff_storage.is_finite());
    }

    #[test]
    fn step_does_not_mutate_input_state() {
        let p = linear_params(15.0);
        let s = State::dry();
        let _ = step(0, &s, &p, 10.0, 1.0).unwrap();
        assert_eq!(s, State::dry());
    }

    #[test]
    fn step_linear_reservoir_reaches_rainfall() {
        // k = p = dt = 1: q' = q + (r - q) = r
        let (s, f) = step(0, &State::dry(), &linear_params(15.0), 10.0, 1.0).unwrap();
        assert_eq!(s.runoff_height, 10.0);
        assert_eq!(s.infiltration_height, 0.0);
        assert_eq!(f.runoff_effective_rainfall, 10.0);
        assert_eq!(f.infiltration_effective_rainfall, 0.0);
        assert_eq!(f.cumulative_rainfall, 10.0);
    }

    #[test]
    fn step_crossing_applies_excess() {
        let s = State {
            runoff_height: 10.0,
            infiltration_height: 0.0,
            cumulative_rainfall: 10.0,
            saturated: false,
        };
        let (s2, f) = step(1, &s, &linear_params(15.0), 10.0, 1.0).unwrap();
        assert!(s2.saturated);
        assert_eq!(f.infiltration_effective_rainfall, 5.0);
        assert_eq!(s2.infiltration_height, 5.0);
        assert_eq!(f.time, 1.0);
    }

    #[test]
    fn step_reports_numeric_domain_with_context() {
        // dt/k = 10 drains far more than the store holds.
        let p = Parameters::shared(0.1, 1.0, 0.0).unwrap();
        let s = State {
            runoff_height: 5.0,
            ..State::dry()
        };
        let err = step(3, &s, &p, 0.0, 1.0).unwrap_err();
        match err {
            ModelError::NumericDomain {
                step,
                area,
                base,
                outflow,
                effective_rainfall,
            } => {
                assert_eq!(step, 3);
                assert_eq!(area, SubArea::Runoff);
                assert_relative_eq!(base, -45.0);
                assert_eq!(outflow, 5.0);
                assert_eq!(effective_rainfall, 0.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn step_rejects_invalid_rainfall() {
        let p = linear_params(15.0);
        for r in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                step(4, &State::dry(), &p, r, 1.0),
                Err(ModelError::InvalidForcing(_))
            ));
        }
    }

    // -- run() tests --

    #[test]
    fn run_output_length_matches_input() {
        let result = run(&linear_params(15.0), &[10.0, 10.0, 0.0], 1.0, None).unwrap();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn run_validates_up_front() {
        let bad = Parameters {
            rsa: -1.0,
            ..linear_params(0.0)
        };
        assert!(matches!(
            run(&bad, &[1.0], 1.0, None),
            Err(ModelError::InvalidParameter { name: "rsa", .. })
        ));
        assert!(matches!(
            run(&linear_params(0.0), &[1.0], 0.0, None),
            Err(ModelError::InvalidParameter { name: "dt", .. })
        ));
    }

    #[test]
    fn run_rejects_negative_rainfall_before_stepping() {
        // Would otherwise surface as a numeric-domain failure at step 2.
        let err = run(&linear_params(15.0), &[10.0, 10.0, -4.0], 1.0, None).unwrap_err();
        assert!(matches!(err, ModelError::InvalidForcing(_)));
        assert!(err.to_string().contains("step 2"));

        // Small enough to integrate silently and shrink cumulative rainfall.
        let p = Parameters::shared(2.0, 1.0, 15.0).unwrap();
        assert!(matches!(
            run(&p, &[10.0, 10.0, -1.0], 1.0, None),
            Err(ModelError::InvalidForcing(_))
        ));
        assert!(matches!(
            Kimura::run(&p, &[1.0, f64::NAN], 1.0, None),
            Err(ModelError::InvalidForcing(_))
        ));
    }

    #[test]
    fn run_custom_initial_state() {
        let p = Parameters::shared(10.0, 0.6, 5.0).unwrap();
        let rain = [4.0; 3];
        let default_result = run(&p, &rain, 1.0, None).unwrap();
        let wet = State {
            runoff_height: 3.0,
            infiltration_height: 3.0,
            cumulative_rainfall: 50.0,
            saturated: true,
        };
        let wet_result = run(&p, &rain, 1.0, Some(&wet)).unwrap();
        assert_ne!(default_result.runoff_height[0], wet_result.runoff_height[0]);
        assert_eq!(wet_result.infiltration_effective_rainfall[0], 4.0);
    }

    #[test]
    fn run_returns_final_state_through_trait() {
        let (ts, state) = Kimura::run(&linear_params(15.0), &[10.0, 10.0], 1.0, None).unwrap();
        assert_eq!(ts.len(), 2);
        assert!(state.saturated);
        assert_eq!(state.cumulative_rainfall, 20.0);
    }

    // -- simulate() tests --

    #[test]
    fn simulate_reference_scenario() {
        let rain = RainfallSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec![10.0; 4]).unwrap();
        let sim = simulate(&linear_params(15.0), &rain, 1.0).unwrap();
        assert_eq!(sim.heights.runoff, vec![0.0, 10.0, 10.0]);
        assert_eq!(sim.heights.infiltration, vec![0.0, 0.0, 5.0]);
        assert_eq!(sim.saturation_step, Some(1));
        assert_eq!(sim.heights.time(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn simulate_short_record_is_empty() {
        let rain = RainfallSeries::new(vec![0.0, 0.5], vec![3.0, 3.0]).unwrap();
        let sim = simulate(&linear_params(1.0), &rain, 1.0).unwrap();
        assert!(sim.heights.is_empty());
        assert!(sim.fluxes.is_empty());
        assert_eq!(sim.saturation_step, None);
    }

    #[test]
    fn simulate_single_point_grid() {
        let rain = RainfallSeries::new(vec![0.0, 1.0], vec![3.0, 3.0]).unwrap();
        let sim = simulate(&linear_params(1.0), &rain, 1.0).unwrap();
        assert_eq!(sim.heights.runoff, vec![0.0]);
        assert_eq!(sim.heights.infiltration, vec![0.0]);
        assert!(sim.fluxes.is_empty());
    }
}
