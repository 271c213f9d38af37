/// Declare a frozen `#[pyclass]` holding one numpy array per column of a
/// core timeseries, with `from_timeseries()` moving the columns across.
macro_rules! numpy_columns {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident from $core_type:ty {
            $($column:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[pyo3::pyclass(frozen)]
        $vis struct $name {
            $(
                #[pyo3(get)]
                pub $column: Py<numpy::PyArray1<f64>>,
            )+
        }

        impl $name {
            pub fn from_timeseries(py: pyo3::Python<'_>, ts: $core_type) -> Self {
                Self {
                    $($column: numpy::PyArray1::from_vec(py, ts.$column).unbind(),)+
                }
            }
        }
    };
}

/// Scalar fields of one step as a `PyDict` keyed by field name.
macro_rules! step_dict {
    ($py:expr, $fluxes:expr, $($field:ident),+ $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        $(dict.set_item(stringify!($field), $fluxes.$field)?;)+
        dict
    }};
}
