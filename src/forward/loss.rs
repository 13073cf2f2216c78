//! Binomial loss channel for photon-number distributions.
//!
//! Purpose
//! -------
//! Model an imperfect detector of efficiency η as independent per-photon
//! survival: `n` incident photons produce `k` detections with probability
//! `C(n, k) η^k (1 − η)^(n − k)`.
//!
//! Key behaviors
//! -------------
//! - [`LossChannel::matrix`] builds the lower-triangular loss matrix
//!   `L[n, k]` for a given cutoff.
//! - [`LossChannel::apply`] maps a 1D PMF through the channel; the joint
//!   variants [`LossChannel::apply_signal`] / [`LossChannel::apply_idler`]
//!   act on one axis of a `[[k_s, k_i]]` array and leave the other untouched,
//!   so per-arm loss introduces no cross-arm correlation.
//! - [`apply_loss`] is the validated entry point on [`Pmf1D`].
//!
//! Invariants & assumptions
//! ------------------------
//! - η ∈ [0, 1], checked in [`LossChannel::new`].
//! - Loss only moves mass to lower indices, so a truncated input keeps its
//!   total mass: each row of `L` sums to one.
//!
//! Conventions
//! -----------
//! - Binomial weights are evaluated in log space via `statrs`'s
//!   `ln_binomial`; η = 0 and η = 1 are handled exactly (collapse to 0 and
//!   identity).
use crate::{
    forward::{errors::ForwardResult, validation::validate_efficiency},
    pmf::Pmf1D,
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use statrs::function::factorial::ln_binomial;

/// LossChannel — binomial attenuation with efficiency η.
///
/// Fields
/// ------
/// - `eta`: `f64`
///   Per-photon survival probability, `0 ≤ η ≤ 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossChannel {
    eta: f64,
}

impl LossChannel {
    /// Validate η and build the channel.
    ///
    /// Errors
    /// ------
    /// - `ForwardError::InvalidEfficiency` when η is outside [0, 1] or not
    ///   finite.
    pub fn new(eta: f64) -> ForwardResult<Self> {
        validate_efficiency("detector", eta)?;
        Ok(LossChannel { eta })
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Loss matrix `L[n, k] = C(n, k) η^k (1 − η)^(n − k)` for `k ≤ n`,
    /// zero above the diagonal, of size `cutoff × cutoff`.
    pub fn matrix(&self, cutoff: usize) -> Array2<f64> {
        let mut mat = Array2::zeros((cutoff, cutoff));
        for n in 0..cutoff {
            for k in 0..=n {
                mat[[n, k]] = binomial_weight(n as u64, k as u64, self.eta);
            }
        }
        mat
    }

    /// `out[k] = Σ_{n ≥ k} probs[n] · L[n, k]`; output length equals input
    /// length.
    pub fn apply(&self, probs: ArrayView1<'_, f64>) -> Array1<f64> {
        if self.eta == 1.0 {
            return probs.to_owned();
        }
        self.matrix(probs.len()).t().dot(&probs)
    }

    /// Apply the channel to the signal axis (rows) of a joint array:
    /// `J' = Lᵀ · J`.
    pub fn apply_signal(&self, joint: ArrayView2<'_, f64>) -> Array2<f64> {
        if self.eta == 1.0 {
            return joint.to_owned();
        }
        self.matrix(joint.nrows()).t().dot(&joint)
    }

    /// Apply the channel to the idler axis (columns) of a joint array:
    /// `J' = J · L`.
    pub fn apply_idler(&self, joint: ArrayView2<'_, f64>) -> Array2<f64> {
        if self.eta == 1.0 {
            return joint.to_owned();
        }
        joint.dot(&self.matrix(joint.ncols()))
    }
}

/// Pass a validated PMF through a binomial loss channel of efficiency η.
///
/// Errors
/// ------
/// - `ForwardError::InvalidEfficiency` for η outside [0, 1].
/// - `ForwardError::Pmf` is unreachable in practice (the transform keeps
///   entries nonnegative) but is propagated rather than unwrapped.
///
/// Examples
/// --------
/// ```rust
/// # use spdc_tomography::{forward::apply_loss, pmf::Pmf1D};
/// let two_photons = Pmf1D::from_vec(vec![0.0, 0.0, 1.0]).unwrap();
/// let out = apply_loss(&two_photons, 0.5).unwrap();
/// let p = out.probs();
/// assert!((p[0] - 0.25).abs() < 1e-12);
/// assert!((p[1] - 0.50).abs() < 1e-12);
/// assert!((p[2] - 0.25).abs() < 1e-12);
/// ```
pub fn apply_loss(pmf: &Pmf1D, eta: f64) -> ForwardResult<Pmf1D> {
    let channel = LossChannel::new(eta)?;
    Ok(Pmf1D::new(channel.apply(pmf.probs()))?)
}

#[inline]
fn binomial_weight(n: u64, k: u64, eta: f64) -> f64 {
    if eta == 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    if eta == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    (ln_binomial(n, k) + k as f64 * eta.ln() + (n - k) as f64 * (-eta).ln_1p()).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::errors::ForwardError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Structural properties of the loss matrix (triangularity, stochastic
    //   rows).
    // - Exact edge cases η = 0 and η = 1.
    // - Mean scaling ⟨k⟩ = η⟨n⟩ and per-arm independence in 2D.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Each row of L is a binomial distribution, so it must sum to one, and
    // entries above the diagonal must vanish.
    //
    // Given
    // -----
    // - η = 0.3, cutoff = 25.
    //
    // Expect
    // ------
    // - Row sums within 1e-12 of one; L[n, k] = 0 for k > n.
    fn loss_matrix_rows_are_binomial_distributions() {
        // Arrange
        let channel = LossChannel::new(0.3).unwrap();

        // Act
        let mat = channel.matrix(25);

        // Assert
        for n in 0..25 {
            assert_abs_diff_eq!(mat.row(n).sum(), 1.0, epsilon = 1e-12);
            for k in (n + 1)..25 {
                assert_eq!(mat[[n, k]], 0.0);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // η = 1 is the identity and η = 0 collapses all mass onto zero photons.
    //
    // Given
    // -----
    // - p = [0.2, 0.3, 0.5].
    //
    // Expect
    // ------
    // - η = 1 returns p unchanged; η = 0 returns [1, 0, 0].
    fn loss_channel_edge_efficiencies_are_exact() {
        // Arrange
        let p = array![0.2, 0.3, 0.5];

        // Act
        let identity = LossChannel::new(1.0).unwrap().apply(p.view());
        let collapsed = LossChannel::new(0.0).unwrap().apply(p.view());

        // Assert
        assert_eq!(identity, p);
        assert_eq!(collapsed, array![1.0, 0.0, 0.0]);
    }

    #[test]
    // Purpose
    // -------
    // Binomial thinning scales the mean by η.
    //
    // Given
    // -----
    // - p uniform on {0, …, 9}, η = 0.4.
    //
    // Expect
    // ------
    // - Output mean equals 0.4 × 4.5 and total mass is preserved.
    fn loss_channel_scales_mean_by_efficiency() {
        // Arrange
        let p = Array1::from_elem(10, 0.1);
        let channel = LossChannel::new(0.4).unwrap();

        // Act
        let out = channel.apply(p.view());
        let mean: f64 = out.iter().enumerate().map(|(k, &pk)| k as f64 * pk).sum();

        // Assert
        assert_abs_diff_eq!(out.sum(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mean, 0.4 * 4.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Signal-axis loss must not touch the idler marginal and vice versa.
    //
    // Given
    // -----
    // - A 3×3 joint array with distinct entries; signal η = 0.5.
    //
    // Expect
    // ------
    // - Column sums (idler marginal) are unchanged after `apply_signal`.
    // - Row sums (signal marginal) equal the 1D channel applied to the
    //   original signal marginal.
    fn loss_channel_signal_axis_leaves_idler_marginal_unchanged() {
        // Arrange
        let joint = array![[0.1, 0.05, 0.05], [0.2, 0.1, 0.0], [0.3, 0.1, 0.1]];
        let channel = LossChannel::new(0.5).unwrap();

        // Act
        let out = channel.apply_signal(joint.view());

        // Assert
        let idler_before = joint.sum_axis(ndarray::Axis(0));
        let idler_after = out.sum_axis(ndarray::Axis(0));
        let signal_expected = channel.apply(joint.sum_axis(ndarray::Axis(1)).view());
        let signal_after = out.sum_axis(ndarray::Axis(1));
        for k in 0..3 {
            assert_abs_diff_eq!(idler_before[k], idler_after[k], epsilon = 1e-12);
            assert_abs_diff_eq!(signal_expected[k], signal_after[k], epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // `apply_loss` rejects efficiencies outside [0, 1] before computing.
    //
    // Given
    // -----
    // - A valid PMF and η = 1.5.
    //
    // Expect
    // ------
    // - `ForwardError::InvalidEfficiency`.
    fn apply_loss_rejects_invalid_efficiency() {
        // Arrange
        let pmf = Pmf1D::from_vec(vec![1.0]).unwrap();

        // Act
        let err = apply_loss(&pmf, 1.5).unwrap_err();

        // Assert
        assert!(matches!(err, ForwardError::InvalidEfficiency { .. }), "{err:?}");
    }
}
