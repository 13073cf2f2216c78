//! Multimode SPDC source statistics.
//!
//! Purpose
//! -------
//! Build the pair-number distribution of a source made of independent
//! Schmidt modes. Independent modes add their pair numbers, so the source
//! PMF is the convolution of the per-mode PMFs, computed as a fold over an
//! accumulator that starts at the unit delta (zero pairs with certainty).
//!
//! Key behaviors
//! -------------
//! - Twin-beam modes are thermal: `P(n) = (1/(1+m)) · (m/(1+m))^n`
//!   ([`thermal_pmf`], folded by [`build_pair_pmf`]).
//! - Degenerate modes are single-mode squeezed vacua whose pair number is
//!   negative binomial with shape ½ and `q = m/(1+m)`
//!   ([`squeezed_pair_pmf`], folded by [`build_degenerate_pair_pmf`]).
//! - [`pairs_to_photons`] spreads a pair PMF over total photon number,
//!   placing pair count `j` at index `2j`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A mode of mean 0 contributes the delta at 0, leaving the accumulator
//!   unchanged.
//! - Mode order does not affect the result (convolution is commutative).
//! - All convolutions are truncated at `cutoff`; the caller measures the
//!   retained mass afterwards.
use crate::{
    forward::{
        errors::ForwardResult,
        noise::convolve_truncated,
        validation::{validate_cutoff, validate_mode_means},
    },
    pmf::Pmf1D,
};
use ndarray::{Array1, ArrayView1};

/// Thermal pair-number PMF of one Schmidt mode with mean `mean`, on
/// `0..cutoff`.
pub fn thermal_pmf(mean: f64, cutoff: usize) -> Array1<f64> {
    let ratio = mean / (1.0 + mean);
    let mut probs = Array1::zeros(cutoff);
    let mut term = 1.0 / (1.0 + mean);
    for p in probs.iter_mut() {
        *p = term;
        term *= ratio;
    }
    probs
}

/// Pair-number PMF of a single-mode squeezed vacuum with mean photon number
/// `mean`, on `0..cutoff` pairs.
///
/// Notes
/// -----
/// - `P(j) = sqrt(1 − q) · C(2j, j) / 4^j · q^j` with `q = m / (1 + m)`,
///   evaluated by the recurrence `P(j) = P(j − 1) · q · (2j − 1) / (2j)`.
pub fn squeezed_pair_pmf(mean: f64, cutoff: usize) -> Array1<f64> {
    let q = mean / (1.0 + mean);
    let mut probs = Array1::zeros(cutoff);
    let mut term = (1.0 / (1.0 + mean)).sqrt();
    for (j, p) in probs.iter_mut().enumerate() {
        if j > 0 {
            let j = j as f64;
            term *= q * (2.0 * j - 1.0) / (2.0 * j);
        }
        *p = term;
    }
    probs
}

/// Twin-beam pair PMF: thermal modes folded by truncated convolution.
///
/// Parameters
/// ----------
/// - `mode_means`: `&[f64]`
///   Schmidt-mode means (non-empty, finite, ≥ 0).
/// - `cutoff`: `usize`
///   Number of pair counts kept (`0..cutoff`).
///
/// Errors
/// ------
/// - `ForwardError::EmptyModeSet` / `InvalidModeMean` / `InvalidCutoff`.
///
/// Examples
/// --------
/// ```rust
/// # use spdc_tomography::forward::build_pair_pmf;
/// let pmf = build_pair_pmf(&[0.0, 0.0], 4).unwrap();
/// assert_eq!(pmf.probs().to_vec(), vec![1.0, 0.0, 0.0, 0.0]);
/// ```
pub fn build_pair_pmf(mode_means: &[f64], cutoff: usize) -> ForwardResult<Pmf1D> {
    validate_mode_means(mode_means)?;
    validate_cutoff(cutoff)?;
    Ok(Pmf1D::new(fold_modes(mode_means, cutoff, thermal_pmf))?)
}

/// Degenerate-source pair PMF: squeezed-vacuum modes folded by truncated
/// convolution.
///
/// Errors
/// ------
/// - `ForwardError::EmptyModeSet` / `InvalidModeMean` / `InvalidCutoff`.
pub fn build_degenerate_pair_pmf(mode_means: &[f64], cutoff: usize) -> ForwardResult<Pmf1D> {
    validate_mode_means(mode_means)?;
    validate_cutoff(cutoff)?;
    Ok(Pmf1D::new(fold_modes(mode_means, cutoff, squeezed_pair_pmf))?)
}

/// Place pair count `j` at photon index `2j`, on `0..nmax`. Pairs with
/// `2j ≥ nmax` are dropped.
pub fn pairs_to_photons(pairs: ArrayView1<'_, f64>, nmax: usize) -> Array1<f64> {
    let mut photons = Array1::zeros(nmax);
    for (j, &p) in pairs.iter().enumerate() {
        let n = 2 * j;
        if n >= nmax {
            break;
        }
        photons[n] = p;
    }
    photons
}

/// Fold per-mode PMFs into the accumulator, starting from the unit delta.
pub(crate) fn fold_modes(
    mode_means: &[f64], cutoff: usize, per_mode: fn(f64, usize) -> Array1<f64>,
) -> Array1<f64> {
    let mut acc = Array1::zeros(cutoff);
    if cutoff == 0 {
        return acc;
    }
    acc[0] = 1.0;
    mode_means.iter().filter(|&&m| m > 0.0).fold(acc, |acc, &m| {
        convolve_truncated(acc.view(), per_mode(m, cutoff).view(), cutoff)
    })
}
