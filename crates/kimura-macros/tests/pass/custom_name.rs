use kimura_macros::Fluxes;

#[derive(Debug, Clone, Copy, Fluxes)]
#[fluxes(timeseries_name = "ReservoirSeries")]
pub struct ReservoirFluxes {
    pub storage: f64,
    pub outflow: f64,
}

fn main() {
    let f = ReservoirFluxes { storage: 40.0, outflow: 1.5 };
    let mut ts = ReservoirSeries::with_capacity(5);
    ts.push(&f);
    assert_eq!(ts.len(), 1);
    assert_eq!(ReservoirFluxes::field_names(), &["storage", "outflow"]);
}
