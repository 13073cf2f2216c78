//! spdc_tomography — photon-number statistics of SPDC light sources.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the forward model, histogram tools and moment inversion to Python
//! via the `_spdc_tomography` extension module (feature `python-bindings`).
//!
//! Key behaviors
//! -------------
//! - [`forward`]: theoretical detected-count PMFs for twin-beam and
//!   degenerate multimode sources with binomial loss and Poisson dark counts.
//! - [`statistics`]: empirical histograms, PMF sampling, and the moment
//!   summaries (`n`, `g2`, `g11`).
//! - [`inverse`]: closed-form two-Schmidt-mode parameter guesses.
//! - [`pmf`]: the validated PMF containers and truncation diagnostics shared
//!   by all of the above.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is pure, synchronous and deterministic; the only
//!   randomness is the caller-supplied RNG in [`statistics::sampling`].
//! - The bindings in this file perform only FFI glue and error mapping; they
//!   assume the invariants documented in the inner modules.
//!
//! Conventions
//! -----------
//! - Photon counts index arrays from 0; joint PMFs are `[[k_s, k_i]]`.
//! - Diagnostics go through the `log` facade; the crate installs no logger.
//! - Errors are rich enums internally and become `ValueError` at the PyO3
//!   boundary.
//!
//! Downstream usage
//! ----------------
//! - Typical round trip:
//!   1. Build a [`forward::TwinBeamConfig`] and call [`forward::twinbeam_pmf`].
//!   2. Draw samples with [`statistics::sample_pmf_2d`] and rebuild a PMF
//!      with [`statistics::gen_hist_2d`] (or use measured counts directly).
//!   3. Call [`inverse::two_schmidt_mode_guess`] and hand the
//!      [`inverse::ParameterGuess`] to a nonlinear fitter.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; the full forward → sample →
//!   histogram → inverse pipeline is covered in
//!   `tests/integration_forward_inverse_pipeline.rs`.

pub mod forward;
pub mod inverse;
pub mod pmf;
pub mod statistics;
pub mod utils;

#[cfg(feature = "python-bindings")]
use std::collections::BTreeMap;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    forward::TwinBeamConfig,
    utils::{extract_counts, extract_pmf_1d, extract_pmf_2d},
};

/// Joint signal/idler PMF of a multimode twin beam.
///
/// Parameters
/// ----------
/// - `mode_means`: `Vec<f64>`
///   Schmidt-mode mean pair numbers.
/// - `cutoff`: `usize`
///   Side length of the returned square array.
/// - `eta_s`, `eta_i`, `noise_s`, `noise_i`: `f64`
///   Efficiencies (default 1) and dark-count means (default 0).
///
/// Returns
/// -------
/// `(pmf, retained_mass, truncated)`
///   `numpy.ndarray` of shape `(cutoff, cutoff)`, the probability mass kept
///   below the cutoff before renormalization, and whether the discarded
///   mass exceeds the truncation tolerance.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (mode_means, cutoff, eta_s = 1.0, eta_i = 1.0, noise_s = 0.0, noise_i = 0.0))]
fn twinbeam_pmf<'py>(
    py: Python<'py>, mode_means: Vec<f64>, cutoff: usize, eta_s: f64, eta_i: f64, noise_s: f64,
    noise_i: f64,
) -> PyResult<(Bound<'py, PyArray2<f64>>, f64, bool)> {
    let config = TwinBeamConfig::new(mode_means, eta_s, eta_i, noise_s, noise_i)?;
    let outcome = forward::twinbeam_pmf(&config, cutoff)?;
    let (pmf, report) = outcome.into_parts();
    Ok((pmf.into_inner().into_pyarray(py), report.retained_mass(), report.is_truncated()))
}

/// Detected-count PMF of a degenerate multimode squeezer (length `nmax`),
/// returned as `(pmf, retained_mass, truncated)` like [`twinbeam_pmf`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (nmax, mode_means, eta = 1.0, n_dark = 0.0))]
fn degenerate_pmf<'py>(
    py: Python<'py>, nmax: usize, mode_means: Vec<f64>, eta: f64, n_dark: f64,
) -> PyResult<(Bound<'py, PyArray1<f64>>, f64, bool)> {
    let outcome = forward::degenerate_pmf(nmax, &mode_means, eta, n_dark)?;
    let (pmf, report) = outcome.into_parts();
    Ok((pmf.into_inner().into_pyarray(py), report.retained_mass(), report.is_truncated()))
}

/// Joint histogram of paired signal/idler counts.
#[cfg(feature = "python-bindings")]
#[pyfunction]
fn gen_hist_2d<'py>(
    py: Python<'py>, signal: &Bound<'py, PyAny>, idler: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let signal = extract_counts(signal)?;
    let idler = extract_counts(idler)?;
    let hist = statistics::gen_hist_2d(&signal, &idler)?;
    Ok(hist.into_inner().into_pyarray(py))
}

/// `{"n": …, "g2": …}` for a single-arm PMF; undefined `g2` is `nan`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
fn marginal_calcs_1d(pmf: &Bound<'_, PyAny>) -> PyResult<BTreeMap<&'static str, f64>> {
    let pmf = extract_pmf_1d(pmf)?;
    Ok(statistics::marginal_calcs_1d(&pmf).to_map())
}

/// `{"n_s", "n_i", "g2_s", "g2_i", "g11"}` for a joint PMF.
#[cfg(feature = "python-bindings")]
#[pyfunction]
fn marginal_calcs_2d(pmf: &Bound<'_, PyAny>) -> PyResult<BTreeMap<&'static str, f64>> {
    let pmf = extract_pmf_2d(pmf)?;
    Ok(statistics::marginal_calcs_2d(&pmf).to_map())
}

/// Two-Schmidt-mode guess as a dict of `eta_s`, `eta_i`, `n_modes`, `sq_0`,
/// `sq_1` plus `valid` (1.0 or 0.0).
///
/// Notes
/// -----
/// - With `strict=True`, an inconsistent (clamped) guess raises
///   `ValueError` listing the issues instead of being returned.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (pmf, strict = false))]
fn two_schmidt_mode_guess(
    pmf: &Bound<'_, PyAny>, strict: bool,
) -> PyResult<BTreeMap<&'static str, f64>> {
    let pmf = extract_pmf_2d(pmf)?;
    let guess = inverse::two_schmidt_mode_guess(&pmf)?;
    if strict && !guess.valid {
        let issues: Vec<String> = guess.issues.iter().map(ToString::to_string).collect();
        return Err(PyValueError::new_err(format!(
            "inconsistent moments for a two-mode source: {}",
            issues.join("; ")
        )));
    }
    let mut map = guess.to_map();
    map.insert("valid", if guess.valid { 1.0 } else { 0.0 });
    Ok(map)
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _spdc_tomography<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let forward_mod = PyModule::new(_py, "forward")?;
    let statistics_mod = PyModule::new(_py, "statistics")?;
    let inverse_mod = PyModule::new(_py, "inverse")?;
    forward_functions(_py, m, &forward_mod)?;
    statistics_functions(_py, m, &statistics_mod)?;
    inverse_functions(_py, m, &inverse_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    let modules = _py.import("sys")?.getattr("modules")?;
    modules.set_item("spdc_tomography.forward", forward_mod)?;
    modules.set_item("spdc_tomography.statistics", statistics_mod)?;
    modules.set_item("spdc_tomography.inverse", inverse_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn forward_functions<'py>(
    _py: Python, root: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(twinbeam_pmf, m)?)?;
    m.add_function(wrap_pyfunction!(degenerate_pmf, m)?)?;
    root.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn statistics_functions<'py>(
    _py: Python, root: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(gen_hist_2d, m)?)?;
    m.add_function(wrap_pyfunction!(marginal_calcs_1d, m)?)?;
    m.add_function(wrap_pyfunction!(marginal_calcs_2d, m)?)?;
    root.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn inverse_functions<'py>(
    _py: Python, root: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(two_schmidt_mode_guess, m)?)?;
    root.add_submodule(m)?;
    Ok(())
}
