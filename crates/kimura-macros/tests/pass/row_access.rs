use kimura_macros::Fluxes;

#[derive(Debug, Clone, Copy, PartialEq, Fluxes)]
pub struct Heights {
    pub runoff: f64,
    pub infiltration: f64,
}

fn main() {
    let mut ts = HeightsTimeseries::with_capacity(2);
    ts.push(&Heights { runoff: 1.0, infiltration: 0.0 });
    ts.push(&Heights { runoff: 2.0, infiltration: 0.5 });

    assert_eq!(ts.get(1), Some(Heights { runoff: 2.0, infiltration: 0.5 }));
    assert_eq!(ts.get(2), None);

    let columns = ts.columns();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].0, "runoff");
    assert_eq!(columns[1].1, &[0.0, 0.5]);

    let copy = ts.clone();
    assert_eq!(copy, ts);
}
