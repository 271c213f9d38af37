/// Kimura — nonlinear storage-function method.
///
/// A catchment split into a runoff sub-area and an infiltration sub-area,
/// each a reservoir `s = k q^p` integrated with an explicit Euler scheme.
/// The infiltration sub-area absorbs rainfall until a saturation depth is
/// exceeded.
pub mod constants;
pub mod fluxes;
pub mod params;
pub mod processes;
pub mod run;
pub mod state;
