//! Python-side input conversion helpers for the `_spdc_tomography` module.
//!
//! Every helper accepts numpy arrays first and falls back to nested Python
//! sequences, returning validated Rust containers or a `TypeError` /
//! `ValueError` suitable for raising directly.

#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use numpy::{PyReadonlyArray1, PyReadonlyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::pmf::{Pmf1D, Pmf2D};

/// Convert a 1-D float array or sequence into a validated [`Pmf1D`].
#[cfg(feature = "python-bindings")]
pub fn extract_pmf_1d(raw: &Bound<'_, PyAny>) -> PyResult<Pmf1D> {
    let probs = if let Ok(arr) = raw.extract::<PyReadonlyArray1<f64>>() {
        arr.as_array().to_owned()
    } else {
        let vec: Vec<f64> = raw.extract().map_err(|_| {
            PyTypeError::new_err("expected a 1-D numpy.ndarray or sequence of float64")
        })?;
        Array1::from_vec(vec)
    };
    Ok(Pmf1D::new(probs)?)
}

/// Convert a square 2-D float array (or list of equal-length lists) into a
/// validated [`Pmf2D`] indexed `[[k_s, k_i]]`.
#[cfg(feature = "python-bindings")]
pub fn extract_pmf_2d(raw: &Bound<'_, PyAny>) -> PyResult<Pmf2D> {
    let probs = if let Ok(arr) = raw.extract::<PyReadonlyArray2<f64>>() {
        arr.as_array().to_owned()
    } else {
        let rows: Vec<Vec<f64>> = raw.extract().map_err(|_| {
            PyTypeError::new_err("expected a 2-D numpy.ndarray or nested sequence of float64")
        })?;
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != n_cols) {
            return Err(PyTypeError::new_err("rows of the joint PMF must have equal length"));
        }
        Array2::from_shape_vec((n_rows, n_cols), rows.into_iter().flatten().collect())
            .map_err(|e| PyTypeError::new_err(e.to_string()))?
    };
    Ok(Pmf2D::new(probs)?)
}

/// Convert an integer array or sequence of photon counts into `Vec<usize>`.
#[cfg(feature = "python-bindings")]
pub fn extract_counts(raw: &Bound<'_, PyAny>) -> PyResult<Vec<usize>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<i64>>() {
        return arr
            .as_array()
            .iter()
            .map(|&k| {
                usize::try_from(k)
                    .map_err(|_| PyTypeError::new_err(format!("photon counts must be ≥ 0; got {k}")))
            })
            .collect();
    }
    raw.extract::<Vec<usize>>().map_err(|_| {
        PyTypeError::new_err("expected a 1-D integer numpy.ndarray or sequence of counts ≥ 0")
    })
}
