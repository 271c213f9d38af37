//! Python bindings for the Kimura storage-function model (`kimura._core`).
#[macro_use]
mod macros;
mod convert;
mod kimura;

use pyo3::prelude::*;

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    let sub = kimura::register(m)?;
    // Makes `from kimura._core.kimura import ...` resolve.
    let qualified = format!("{}.{}", m.name()?, sub.name()?);
    m.py()
        .import("sys")?
        .getattr("modules")?
        .set_item(qualified, &sub)?;

    Ok(())
}
