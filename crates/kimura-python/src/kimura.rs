use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::convert::{checked_slice, contiguous_slice, model_error};

use kimura_core::discharge::{combine, Catchment};
use kimura_core::forcing::RainfallSeries;
use kimura_core::kimura::constants::{N_PARAMS, STATE_SIZE};
use kimura_core::kimura::params::Parameters;
use kimura_core::kimura::run::{self, DischargeHeights};
use kimura_core::kimura::state::State;
use kimura_core::traits::{ModelParams, ModelState};

// ---------------------------------------------------------------------------
// Typed pyclass result objects
// ---------------------------------------------------------------------------

numpy_columns! {
    /// Per-step Kimura fluxes as numpy arrays.
    pub struct KimuraFluxes from kimura_core::kimura::fluxes::FluxesTimeseries {
        time, rainfall, cumulative_rainfall,
        runoff_effective_rainfall, infiltration_effective_rainfall,
        runoff_height, infiltration_height, runoff_storage, infiltration_storage,
    }
}

/// Full simulation: height series on the model grid plus per-step fluxes.
#[pyclass(frozen)]
pub struct KimuraSimulation {
    #[pyo3(get)]
    pub time: Py<PyArray1<f64>>,
    #[pyo3(get)]
    pub runoff: Py<PyArray1<f64>>,
    #[pyo3(get)]
    pub infiltration: Py<PyArray1<f64>>,
    #[pyo3(get)]
    pub fluxes: Py<KimuraFluxes>,
    #[pyo3(get)]
    pub saturation_step: Option<usize>,
}

fn parse_params(params: &PyReadonlyArray1<'_, f64>) -> PyResult<Parameters> {
    let p_slice = checked_slice(params, N_PARAMS, "params")?;
    Parameters::from_array(p_slice).map_err(model_error)
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// Sample a rainfall record onto the grid and integrate both sub-areas.
#[pyfunction]
fn kimura_simulate<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    time: PyReadonlyArray1<'py, f64>,
    rainfall: PyReadonlyArray1<'py, f64>,
    dt: f64,
) -> PyResult<KimuraSimulation> {
    let p = parse_params(&params)?;
    let series = RainfallSeries::new(
        contiguous_slice(&time)?.to_vec(),
        contiguous_slice(&rainfall)?.to_vec(),
    )
    .map_err(model_error)?;

    let sim = run::simulate(&p, &series, dt).map_err(model_error)?;
    let grid = sim.heights.time();

    Ok(KimuraSimulation {
        time: PyArray1::from_vec(py, grid).unbind(),
        runoff: PyArray1::from_vec(py, sim.heights.runoff).unbind(),
        infiltration: PyArray1::from_vec(py, sim.heights.infiltration).unbind(),
        fluxes: Py::new(py, KimuraFluxes::from_timeseries(py, sim.fluxes))?,
        saturation_step: sim.saturation_step,
    })
}

/// Integrate rainfall already sampled at `0, dt, 2dt, ...`.
///
/// Rates must be finite and non-negative.
#[pyfunction]
#[pyo3(signature = (params, rainfall, dt, initial_state=None))]
fn kimura_run<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    rainfall: PyReadonlyArray1<'py, f64>,
    dt: f64,
    initial_state: Option<PyReadonlyArray1<'py, f64>>,
) -> PyResult<KimuraFluxes> {
    let p = parse_params(&params)?;
    let rain_slice = contiguous_slice(&rainfall)?;

    let state = match &initial_state {
        Some(s) => {
            let s_slice = checked_slice(s, STATE_SIZE, "initial_state")?;
            Some(State::from_slice(s_slice).map_err(model_error)?)
        }
        None => None,
    };

    let result = run::run(&p, rain_slice, dt, state.as_ref()).map_err(model_error)?;
    Ok(KimuraFluxes::from_timeseries(py, result))
}

/// Advance one step from an explicit state.
#[pyfunction]
#[pyo3(signature = (state, params, rainfall, dt, n=0))]
fn kimura_step<'py>(
    py: Python<'py>,
    state: PyReadonlyArray1<'py, f64>,
    params: PyReadonlyArray1<'py, f64>,
    rainfall: f64,
    dt: f64,
    n: usize,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyDict>)> {
    let p = parse_params(&params)?;
    let s_slice = checked_slice(&state, STATE_SIZE, "state")?;
    let s = State::from_slice(s_slice).map_err(model_error)?;
    if !(dt.is_finite() && dt > 0.0) {
        return Err(pyo3::exceptions::PyValueError::new_err("dt must be finite and > 0"));
    }

    let (new_state, fluxes) = run::step(n, &s, &p, rainfall, dt).map_err(model_error)?;

    let state_arr = PyArray1::from_vec(py, new_state.to_vec());
    let dict = step_dict!(
        py, fluxes,
        time, rainfall, cumulative_rainfall,
        runoff_effective_rainfall, infiltration_effective_rainfall,
        runoff_height, infiltration_height, runoff_storage, infiltration_storage,
    );
    Ok((state_arr, dict))
}

/// Combine two height series into discharge [m³/s].
#[pyfunction]
fn kimura_discharge<'py>(
    py: Python<'py>,
    runoff: PyReadonlyArray1<'py, f64>,
    infiltration: PyReadonlyArray1<'py, f64>,
    dt: f64,
    area: f64,
    baseflow: f64,
    runoff_fraction: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let heights = DischargeHeights {
        dt,
        runoff: contiguous_slice(&runoff)?.to_vec(),
        infiltration: contiguous_slice(&infiltration)?.to_vec(),
    };
    let catchment = Catchment::new(area, baseflow, runoff_fraction, 0.0).map_err(model_error)?;
    let q = combine(&heights, &catchment).map_err(model_error)?;
    Ok(PyArray1::from_vec(py, q))
}

/// Create the `kimura` submodule and attach it to `parent`.
pub fn register<'py>(parent: &Bound<'py, PyModule>) -> PyResult<Bound<'py, PyModule>> {
    let m = PyModule::new(parent.py(), "kimura")?;
    m.add_function(wrap_pyfunction!(kimura_simulate, &m)?)?;
    m.add_function(wrap_pyfunction!(kimura_run, &m)?)?;
    m.add_function(wrap_pyfunction!(kimura_step, &m)?)?;
    m.add_function(wrap_pyfunction!(kimura_discharge, &m)?)?;
    m.add_class::<KimuraSimulation>()?;
    m.add_class::<KimuraFluxes>()?;
    parent.add_submodule(&m)?;
    Ok(m)
}
