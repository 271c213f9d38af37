use kimura_macros::Fluxes;

#[derive(Debug, Clone, Copy, Fluxes)]
pub struct StepFluxes {
    pub rainfall: f64,
    pub effective_rainfall: f64,
    pub outflow: f64,
}

fn main() {
    let f = StepFluxes { rainfall: 10.0, effective_rainfall: 5.0, outflow: 2.5 };
    let mut ts = StepFluxesTimeseries::with_capacity(10);
    assert!(ts.is_empty());
    ts.push(&f);
    assert_eq!(ts.len(), 1);
    assert_eq!(ts.outflow, vec![2.5]);
    assert_eq!(
        StepFluxes::field_names(),
        &["rainfall", "effective_rainfall", "outflow"]
    );
}
