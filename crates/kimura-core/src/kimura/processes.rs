/// Kimura storage-function process equations.
///
/// Pure functions for a single explicit Euler step of the nonlinear
/// reservoir `ds/dt = re - q`, `s = k q^p`, plus the saturation rule of the
/// infiltration sub-area. Errors are raised by the caller, which knows the
/// step index.

/// Storage depth held by a reservoir with outflow `q`: `s = k q^p` [mm].
#[inline]
pub fn storage(outflow: f64, k: f64, p: f64) -> f64 {
    k * outflow.powf(p)
}

/// Euler base of the power-law update.
///
/// Forward difference of `d(q^p)/dt = (re - q) / k`:
/// `q[n+1]^p = q[n]^p + (dt/k) (re - q[n])`.
#[inline]
pub fn storage_base(outflow: f64, effective_rainfall: f64, dt_over_k: f64, p: f64) -> f64 {
    outflow.powf(p) + dt_over_k * (effective_rainfall - outflow)
}

/// Recover the outflow from the Euler base: `q = base^(1/p)`.
///
/// Returns `None` when the base is negative or the result is not finite.
#[inline]
pub fn outflow_from_base(base: f64, p: f64) -> Option<f64> {
    if base == 0.0 {
        return Some(0.0);
    }
    if !base.is_finite() || base < 0.0 {
        return None;
    }
    let q = base.powf(1.0 / p);
    q.is_finite().then_some(q)
}

/// Effective rainfall of the infiltration sub-area for one step.
///
/// `cumulative` is the rainfall depth accumulated before this step and
/// `rainfall` the runoff-area rate applied during it. Rainfall is absorbed
/// until the accumulated depth exceeds `rsa`; at the crossing step only the
/// excess depth reaches the reservoir, and from then on the full rate does.
///
/// Returns (cumulative, effective_rainfall, saturated):
/// - cumulative: depth after this step [mm]
/// - effective_rainfall: rate reaching the reservoir [mm/hr]
/// - saturated: saturation flag after this step
pub fn infiltration_effective_rainfall(
    rainfall: f64,
    cumulative: f64,
    saturated: bool,
    rsa: f64,
    dt: f64,
) -> (f64, f64, bool) {
    let cumulative = cumulative + dt * rainfall;

    if saturated {
        (cumulative, rainfall, true)
    } else if rsa < cumulative {
        (cumulative, (cumulative - rsa) / dt, true)
    } else {
        (cumulative, 0.0, false)
    }
}
