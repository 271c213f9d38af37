/// Kimura model flux outputs.
///
/// `Fluxes` holds one applied step `n`: the forcing used over `[n dt, (n+1) dt)`
/// and the reservoir states reached at `(n+1) dt`. The derive generates the
/// column-wise `FluxesTimeseries` returned by `run()`.
use kimura_macros::Fluxes;

use crate::traits::FluxesTimeseriesOps;

#[derive(Debug, Clone, Copy, PartialEq, Fluxes)]
pub struct Fluxes {
    pub time: f64,                            // start of the step [hr]
    pub rainfall: f64,                        // step-held rainfall rate [mm/hr]
    pub cumulative_rainfall: f64,             // depth after this step [mm]
    pub runoff_effective_rainfall: f64,       // re1 [mm/hr]
    pub infiltration_effective_rainfall: f64, // re2 [mm/hr]
    pub runoff_height: f64,                   // q1 at end of step [mm/hr]
    pub infiltration_height: f64,             // q2 at end of step [mm/hr]
    pub runoff_storage: f64,                  // s1 = k1 q1^p1 [mm]
    pub infiltration_storage: f64,            // s2 = k2 q2^p2 [mm]
}

impl FluxesTimeseriesOps<Fluxes> for FluxesTimeseries {
    fn with_capacity(n: usize) -> Self {
        FluxesTimeseries::with_capacity(n)
    }

    fn push(&mut self, f: &Fluxes) {
        FluxesTimeseries::push(self, f)
    }

    fn len(&self) -> usize {
        FluxesTimeseries::len(self)
    }

    fn is_empty(&self) -> bool {
        FluxesTimeseries::is_empty(self)
    }
}
