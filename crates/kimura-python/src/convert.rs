use numpy::PyReadonlyArray1;
use pyo3::exceptions::{PyArithmeticError, PyValueError};
use pyo3::prelude::*;

use kimura_core::error::ModelError;

/// Validate that a numpy array is C-contiguous and return its slice.
pub fn contiguous_slice<'py>(arr: &'py PyReadonlyArray1<'py, f64>) -> PyResult<&'py [f64]> {
    arr.as_slice()
        .map_err(|_| PyValueError::new_err("array must be C-contiguous"))
}

/// Validate length + contiguity of a numpy array.
pub fn checked_slice<'py>(
    arr: &'py PyReadonlyArray1<'py, f64>,
    expected_len: usize,
    name: &str,
) -> PyResult<&'py [f64]> {
    let slice = contiguous_slice(arr)?;
    if slice.len() != expected_len {
        return Err(PyValueError::new_err(format!(
            "{} must have {} elements, got {}",
            name,
            expected_len,
            slice.len()
        )));
    }
    Ok(slice)
}

/// Numeric-domain failures surface as `ArithmeticError`, everything else as
/// `ValueError`.
pub fn model_error(err: ModelError) -> PyErr {
    match err {
        ModelError::NumericDomain { .. } => PyArithmeticError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}
