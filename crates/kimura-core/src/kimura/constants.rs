//! Kimura storage-function constants and model contract.
//!
//! Units follow the usual Japanese flood-runoff convention: rainfall and
//! outflow heights in mm/hr, time in hours, catchment area in km².

// -- Unit conversion --

/// mm/hr over 1 km² expressed in m³/s: `1e-3 m * 1e6 m² / 3600 s = 1 / 3.6`.
pub const MM_HR_KM2_PER_M3_S: f64 = 3.6;

// -- Model contract constants --

/// Parameter names in flat-array order.
pub const PARAM_NAMES: &[&str] = &["k1", "p1", "k2", "p2", "rsa"];

/// Number of parameters in the flat-array form.
pub const N_PARAMS: usize = 5;

/// Number of elements in state array representation:
/// runoff height, infiltration height, cumulative rainfall, saturated flag.
pub const STATE_SIZE: usize = 4;

// -- Parameter bounds --

/// Parameter bounds for sweeps: (min, max).
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// Storage coefficient `k` [mm^(1-p) hr^p].
pub const K_BOUNDS: Bounds = Bounds {
    min: 1.0,
    max: 100.0,
};

/// Storage exponent `p` [-].
pub const P_BOUNDS: Bounds = Bounds { min: 0.1, max: 3.0 };

/// Saturation rainfall `Rsa` [mm].
pub const RSA_BOUNDS: Bounds = Bounds {
    min: 0.0,
    max: 500.0,
};

/// Parameter bounds as (min, max) tuples, in PARAM_NAMES order.
pub const PARAM_BOUNDS: &[(f64, f64)] = &[
    (K_BOUNDS.min, K_BOUNDS.max),     // k1
    (P_BOUNDS.min, P_BOUNDS.max),     // p1
    (K_BOUNDS.min, K_BOUNDS.max),     // k2
    (P_BOUNDS.min, P_BOUNDS.max),     // p2
    (RSA_BOUNDS.min, RSA_BOUNDS.max), // rsa
];
