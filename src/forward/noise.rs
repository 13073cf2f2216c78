//! Poisson dark-count noise and truncated convolution.
//!
//! Dark counts are modeled as an independent Poisson process added to a
//! detector's photon count after loss. Adding an independent count is a
//! convolution of PMFs; every convolution here is truncated at the cutoff
//! of its inputs, discarding mass that would land beyond it.
//!
//! # Provided items
//! - [`poisson_pmf`]: Poisson PMF on `0..cutoff` (delta at 0 for mean 0).
//! - [`convolve_truncated`]: direct-summation convolution, truncated.
//! - [`noise_matrix`]: lower-triangular Toeplitz matrix `C[k, n] = P(k − n)`.
//! - [`add_dark_counts`], [`add_dark_counts_signal`],
//!   [`add_dark_counts_idler`]: 1D and per-axis 2D noise injection.
use crate::forward::{
    errors::{ForwardError, ForwardResult},
    validation::validate_rate,
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use statrs::distribution::{Discrete, Poisson};

/// Poisson PMF with the given mean on `0..cutoff`.
///
/// A zero mean yields the unit delta at 0, the neutral element of
/// convolution (`statrs` rejects λ = 0, so it is special-cased here).
pub fn poisson_pmf(mean: f64, cutoff: usize) -> ForwardResult<Array1<f64>> {
    validate_rate("noise", mean)?;
    let mut probs = Array1::zeros(cutoff);
    if cutoff == 0 {
        return Ok(probs);
    }
    if mean == 0.0 {
        probs[0] = 1.0;
        return Ok(probs);
    }
    let dist =
        Poisson::new(mean).map_err(|_| ForwardError::NegativeRate { arm: "noise", value: mean })?;
    for (k, p) in probs.iter_mut().enumerate() {
        *p = dist.pmf(k as u64);
    }
    Ok(probs)
}

/// Convolve two PMFs by direct summation, keeping indices `0..cutoff`.
///
/// `out[n] = Σ_{k ≤ n} a[k] · b[n − k]`, with missing entries treated as 0.
/// All terms are products of nonnegative numbers, so the output is
/// nonnegative without clamping.
pub fn convolve_truncated(
    a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>, cutoff: usize,
) -> Array1<f64> {
    let mut out = Array1::zeros(cutoff);
    for (i, &ai) in a.iter().enumerate().take(cutoff) {
        if ai == 0.0 {
            continue;
        }
        for (j, &bj) in b.iter().enumerate().take(cutoff - i) {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// Toeplitz convolution matrix for Poisson noise: `C[k, n] = P(k − n)` for
/// `k ≥ n`, so `C · p` adds dark counts to `p`.
pub fn noise_matrix(mean: f64, cutoff: usize) -> ForwardResult<Array2<f64>> {
    let poisson = poisson_pmf(mean, cutoff)?;
    let mut mat = Array2::zeros((cutoff, cutoff));
    for k in 0..cutoff {
        for n in 0..=k {
            mat[[k, n]] = poisson[k - n];
        }
    }
    Ok(mat)
}

/// Add Poisson dark counts of the given mean to a 1D PMF.
pub fn add_dark_counts(probs: ArrayView1<'_, f64>, mean: f64) -> ForwardResult<Array1<f64>> {
    if mean == 0.0 {
        return Ok(probs.to_owned());
    }
    let poisson = poisson_pmf(mean, probs.len())?;
    Ok(convolve_truncated(probs, poisson.view(), probs.len()))
}

/// Add dark counts to the signal axis (rows) of a joint PMF: `J' = C · J`.
pub fn add_dark_counts_signal(joint: ArrayView2<'_, f64>, mean: f64) -> ForwardResult<Array2<f64>> {
    if mean == 0.0 {
        return Ok(joint.to_owned());
    }
    Ok(noise_matrix(mean, joint.nrows())?.dot(&joint))
}

/// Add dark counts to the idler axis (columns) of a joint PMF: `J' = J · Cᵀ`.
pub fn add_dark_counts_idler(joint: ArrayView2<'_, f64>, mean: f64) -> ForwardResult<Array2<f64>> {
    if mean == 0.0 {
        return Ok(joint.to_owned());
    }
    Ok(joint.dot(&noise_matrix(mean, joint.ncols())?.t()))
}
