/// Core traits for lumped storage models.
///
/// A model prepares a run context from its parameters, initializes state,
/// and advances one timestep at a time. Every step is fallible: an invalid
/// numeric state aborts the whole run.
use crate::error::{ModelError, Result};

pub trait HydrologicalModel {
    type Params;
    type State: Clone;
    type Forcing: Copy;
    type Fluxes;
    type FluxesTimeseries: FluxesTimeseriesOps<Self::Fluxes>;
    /// Precomputed context derived from params, constant for a given run.
    type Context;

    /// Validate and precompute run-constant data (e.g. `dt / k`).
    fn prepare(params: &Self::Params, dt: f64) -> Result<Self::Context>;

    /// Reject a forcing series before any step runs.
    fn validate_forcing(_forcing: &[Self::Forcing]) -> Result<()> {
        Ok(())
    }

    /// Create the initial state of a run.
    fn initialize_state(params: &Self::Params) -> Self::State;

    /// Execute step `n`: given state, forcing and context,
    /// return the new state and fluxes.
    fn step(
        n: usize,
        state: &Self::State,
        forcing: Self::Forcing,
        context: &Self::Context,
    ) -> Result<(Self::State, Self::Fluxes)>;

    /// Run the model over a forcing timeseries.
    ///
    /// Returns the fluxes of every step together with the final state.
    /// The first failing step aborts the run.
    fn run(
        params: &Self::Params,
        forcing: &[Self::Forcing],
        dt: f64,
        initial_state: Option<&Self::State>,
    ) -> Result<(Self::FluxesTimeseries, Self::State)> {
        let context = Self::prepare(params, dt)?;
        Self::validate_forcing(forcing)?;
        let mut state = match initial_state {
            Some(s) => s.clone(),
            None => Self::initialize_state(params),
        };

        let mut outputs = Self::FluxesTimeseries::with_capacity(forcing.len());

        for (n, &f) in forcing.iter().enumerate() {
            let (new_state, fluxes) = Self::step(n, &state, f, &context)?;
            outputs.push(&fluxes);
            state = new_state;
        }

        Ok((outputs, state))
    }
}

/// Operations required on the timeseries collection type.
pub trait FluxesTimeseriesOps<F> {
    fn with_capacity(n: usize) -> Self;
    fn push(&mut self, f: &F);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// Flat-array view of a parameter set, used by bindings and sweeps.
pub trait ModelParams: Sized {
    const N_PARAMS: usize;
    const PARAM_NAMES: &'static [&'static str];
    const PARAM_BOUNDS: &'static [(f64, f64)];

    fn from_array(arr: &[f64]) -> Result<Self>;
    fn to_array(&self) -> Vec<f64>;
}

/// Flat-array view of a model state.
pub trait ModelState: Sized {
    fn to_vec(&self) -> Vec<f64>;
    fn from_slice(arr: &[f64]) -> Result<Self>;
    fn array_len(&self) -> usize;
}

/// Check a flat array length before unpacking it.
pub(crate) fn check_len(what: &'static str, expected: usize, arr: &[f64]) -> Result<()> {
    if arr.len() != expected {
        return Err(ModelError::LengthMismatch {
            what,
            expected,
            actual: arr.len(),
        });
    }
    Ok(())
}
