//! Draw synthetic photon-count samples from a PMF.
//!
//! Purpose
//! -------
//! Generate detection records from a theoretical PMF so the histogram and
//! inversion stages can be exercised on finite data.
//!
//! Key behaviors
//! -------------
//! - Inverse-CDF sampling over the flattened PMF with a caller-supplied RNG
//!   (`rand::Rng`), so seeded generators give reproducible draws.
//! - Uniform variates are scaled by the PMF's total mass, so truncated,
//!   unnormalized PMFs are sampled conditionally on staying below the cutoff.
//!
//! Invariants & assumptions
//! ------------------------
//! - The PMF must have positive total mass (`StatsError::ZeroMass`
//!   otherwise).
//! - Returned indices are always `< cutoff`.
use crate::{
    pmf::{Pmf1D, Pmf2D},
    statistics::errors::{StatsError, StatsResult},
};
use rand::Rng;

/// Draw `n_samples` photon counts from a 1D PMF.
pub fn sample_pmf_1d<R: Rng + ?Sized>(
    pmf: &Pmf1D, n_samples: usize, rng: &mut R,
) -> StatsResult<Vec<usize>> {
    let cdf = cumulative(pmf.probs().iter().copied())?;
    Ok((0..n_samples).map(|_| draw(&cdf, rng)).collect())
}

/// Draw `n_samples` joint `(signal, idler)` counts from a 2D PMF.
///
/// Returns
/// -------
/// `StatsResult<(Vec<usize>, Vec<usize>)>`
///   Signal and idler counts, paired by index, ready for
///   [`gen_hist_2d`](crate::statistics::gen_hist_2d).
///
/// Examples
/// --------
/// ```rust
/// # use spdc_tomography::{pmf::Pmf2D, statistics::sample_pmf_2d};
/// # use rand::{rngs::StdRng, SeedableRng};
/// let pmf = Pmf2D::new(ndarray::array![[0.0, 0.0], [0.0, 1.0]]).unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
/// let (s, i) = sample_pmf_2d(&pmf, 3, &mut rng).unwrap();
/// assert_eq!(s, vec![1, 1, 1]);
/// assert_eq!(i, vec![1, 1, 1]);
/// ```
pub fn sample_pmf_2d<R: Rng + ?Sized>(
    pmf: &Pmf2D, n_samples: usize, rng: &mut R,
) -> StatsResult<(Vec<usize>, Vec<usize>)> {
    let side = pmf.cutoff();
    let cdf = cumulative(pmf.probs().iter().copied())?;
    let mut signal = Vec::with_capacity(n_samples);
    let mut idler = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        let flat = draw(&cdf, rng);
        signal.push(flat / side);
        idler.push(flat % side);
    }
    Ok((signal, idler))
}

fn cumulative(probs: impl Iterator<Item = f64>) -> StatsResult<Vec<f64>> {
    let mut total = 0.0;
    let cdf: Vec<f64> = probs
        .map(|p| {
            total += p;
            total
        })
        .collect();
    if total <= 0.0 {
        return Err(StatsError::ZeroMass);
    }
    Ok(cdf)
}

#[inline]
fn draw<R: Rng + ?Sized>(cdf: &[f64], rng: &mut R) -> usize {
    let total = cdf.last().copied().unwrap_or(0.0);
    let u = rng.random::<f64>() * total;
    cdf.partition_point(|&c| c <= u).min(cdf.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    // Purpose
    // -------
    // Zero-probability counts are never drawn and frequencies converge to
    // the PMF.
    //
    // Given
    // -----
    // - p = [0.2, 0.0, 0.8], 20 000 draws, seed 11.
    //
    // Expect
    // ------
    // - Index 1 never drawn; frequency of 2 within 0.02 of 0.8.
    fn sample_pmf_1d_matches_frequencies() {
        // Arrange
        let pmf = Pmf1D::from_vec(vec![0.2, 0.0, 0.8]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        // Act
        let draws = sample_pmf_1d(&pmf, 20_000, &mut rng).unwrap();

        // Assert
        assert!(draws.iter().all(|&k| k != 1 && k < 3));
        let freq_two = draws.iter().filter(|&&k| k == 2).count() as f64 / 20_000.0;
        assert_abs_diff_eq!(freq_two, 0.8, epsilon = 0.02);
    }

    #[test]
    // Purpose
    // -------
    // An all-zero PMF cannot be sampled.
    //
    // Given
    // -----
    // - p = [0, 0].
    //
    // Expect
    // ------
    // - StatsError::ZeroMass.
    fn sample_pmf_1d_rejects_zero_mass() {
        // Arrange
        let pmf = Pmf1D::from_vec(vec![0.0, 0.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        // Act + Assert
        assert_eq!(sample_pmf_1d(&pmf, 5, &mut rng).unwrap_err(), StatsError::ZeroMass);
    }

    #[test]
    // Purpose
    // -------
    // Flat indices decode to (row, column) = (signal, idler).
    //
    // Given
    // -----
    // - All mass at J[0, 2] of a 3×3 PMF.
    //
    // Expect
    // ------
    // - Every draw is (0, 2).
    fn sample_pmf_2d_decodes_signal_rows_and_idler_columns() {
        // Arrange
        let mut probs = ndarray::Array2::zeros((3, 3));
        probs[[0, 2]] = 1.0;
        let pmf = Pmf2D::new(probs).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        // Act
        let (s, i) = sample_pmf_2d(&pmf, 10, &mut rng).unwrap();

        // Assert
        assert!(s.iter().all(|&k| k == 0));
        assert!(i.iter().all(|&k| k == 2));
    }
}
