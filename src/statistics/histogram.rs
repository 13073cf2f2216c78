//! Empirical PMFs from raw photon-count samples.
//!
//! [`gen_hist_2d`] turns paired signal/idler counts into a square joint
//! frequency table sized to the largest observed count on either arm;
//! [`gen_hist_1d`] does the same for a single detector. Both normalize by
//! the sample count.
use crate::{
    pmf::{Pmf1D, Pmf2D},
    statistics::errors::{StatsError, StatsResult},
};
use ndarray::{Array1, Array2};

/// Joint frequency table of paired signal/idler counts.
///
/// Parameters
/// ----------
/// - `signal`, `idler`: `&[usize]`
///   Equal-length photon counts; element `t` of each slice is one joint
///   detection event.
///
/// Returns
/// -------
/// `StatsResult<Pmf2D>`
///   Square PMF of side `max(all counts) + 1`, entries summing to one.
///
/// Errors
/// ------
/// - `StatsError::EmptySamples` for empty input.
/// - `StatsError::LengthMismatch` for unequal lengths.
/// - `StatsError::CountOverflow` when the table size `side²` overflows.
///
/// Examples
/// --------
/// ```rust
/// # use spdc_tomography::statistics::gen_hist_2d;
/// let hist = gen_hist_2d(&[0, 1, 1, 2], &[0, 1, 1, 0]).unwrap();
/// assert_eq!(hist.cutoff(), 3);
/// assert_eq!(hist.probs()[[1, 1]], 0.5);
/// ```
pub fn gen_hist_2d(signal: &[usize], idler: &[usize]) -> StatsResult<Pmf2D> {
    if signal.len() != idler.len() {
        return Err(StatsError::LengthMismatch { signal: signal.len(), idler: idler.len() });
    }
    if signal.is_empty() {
        return Err(StatsError::EmptySamples);
    }
    let max = signal.iter().chain(idler).copied().max().unwrap_or(0);
    let side = table_len(max)?;
    if side.checked_mul(side).is_none() {
        return Err(StatsError::CountOverflow { count: max });
    }
    let mut counts = Array2::<f64>::zeros((side, side));
    for (&s, &i) in signal.iter().zip(idler) {
        counts[[s, i]] += 1.0;
    }
    let total = signal.len() as f64;
    counts.mapv_inplace(|c| c / total);
    Ok(Pmf2D::new(counts)?)
}

/// Frequency table of single-detector counts, length `max(samples) + 1`.
///
/// Errors
/// ------
/// - `StatsError::EmptySamples` for empty input.
/// - `StatsError::CountOverflow` for a count of `usize::MAX`.
pub fn gen_hist_1d(samples: &[usize]) -> StatsResult<Pmf1D> {
    let Some(&max) = samples.iter().max() else {
        return Err(StatsError::EmptySamples);
    };
    let mut counts = Array1::<f64>::zeros(table_len(max)?);
    for &k in samples {
        counts[k] += 1.0;
    }
    let total = samples.len() as f64;
    counts.mapv_inplace(|c| c / total);
    Ok(Pmf1D::new(counts)?)
}

fn table_len(max: usize) -> StatsResult<usize> {
    max.checked_add(1).ok_or(StatsError::CountOverflow { count: max })
}
