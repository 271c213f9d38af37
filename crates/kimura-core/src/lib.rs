//! kimura — Kimura's storage-function rainfall-runoff model.
//!
//! A catchment is split into a runoff sub-area and an infiltration sub-area,
//! each a nonlinear reservoir `s = k q^p` integrated with an explicit Euler
//! scheme on a uniform grid. The infiltration sub-area absorbs rainfall until
//! a saturation depth is exceeded. The two outflow heights are combined into
//! discharge with a baseflow offset and shifted by a lag time.
//!
//! ```
//! use kimura_core::forcing::RainfallSeries;
//! use kimura_core::kimura::params::Parameters;
//! use kimura_core::kimura::run::simulate;
//!
//! let rain = RainfallSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec![10.0; 4])?;
//! let params = Parameters::shared(1.0, 1.0, 15.0)?;
//! let sim = simulate(&params, &rain, 1.0)?;
//! assert_eq!(sim.heights.infiltration, vec![0.0, 0.0, 5.0]);
//! # Ok::<(), kimura_core::error::ModelError>(())
//! ```
pub mod batch;
pub mod config;
pub mod discharge;
pub mod error;
pub mod forcing;
pub mod kimura;
pub mod traits;
