//! forward::validation — shared parameter guards for the forward model.
//!
//! Purpose
//! -------
//! Centralize the range checks applied to physical parameters before any
//! PMF is computed, so configuration builders, the loss channel and the
//! solver entry points report identical errors for identical mistakes.
//!
//! Invariants & assumptions
//! ------------------------
//! - Efficiencies: finite, `0 ≤ η ≤ 1`.
//! - Rates and mode means: finite, `≥ 0`.
//! - Cutoffs: `≥ 1`.
//! - Tolerances: finite, `0 < tol < 1`.
//!
//! Conventions
//! -----------
//! - Every guard returns `ForwardResult<()>` and never panics.
//! - Checks are cheap and side-effect free; callers run them eagerly at the
//!   top of public entry points.
use crate::forward::errors::{ForwardError, ForwardResult};

/// Validate a detection efficiency η ∈ [0, 1].
///
/// Errors
/// ------
/// - `ForwardError::InvalidEfficiency { arm, value }` when `eta` is NaN, ±∞,
///   negative, or greater than one.
pub fn validate_efficiency(arm: &'static str, eta: f64) -> ForwardResult<()> {
    if !eta.is_finite() || !(0.0..=1.0).contains(&eta) {
        return Err(ForwardError::InvalidEfficiency { arm, value: eta });
    }
    Ok(())
}

/// Validate a Poisson dark-count rate (finite, ≥ 0).
pub fn validate_rate(arm: &'static str, rate: f64) -> ForwardResult<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ForwardError::NegativeRate { arm, value: rate });
    }
    Ok(())
}

/// Validate a Schmidt-mode set: non-empty, every mean finite and ≥ 0.
///
/// Errors
/// ------
/// - `ForwardError::EmptyModeSet` for an empty slice.
/// - `ForwardError::InvalidModeMean { index, value }` for the first bad mean.
pub fn validate_mode_means(mode_means: &[f64]) -> ForwardResult<()> {
    if mode_means.is_empty() {
        return Err(ForwardError::EmptyModeSet);
    }
    for (index, &value) in mode_means.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(ForwardError::InvalidModeMean { index, value });
        }
    }
    Ok(())
}

/// Validate a photon-number cutoff (≥ 1).
pub fn validate_cutoff(cutoff: usize) -> ForwardResult<()> {
    if cutoff == 0 {
        return Err(ForwardError::InvalidCutoff { value: cutoff });
    }
    Ok(())
}

/// Validate a truncation tolerance in the open interval (0, 1).
pub fn validate_tolerance(tol: f64) -> ForwardResult<()> {
    if !tol.is_finite() || tol <= 0.0 || tol >= 1.0 {
        return Err(ForwardError::InvalidTolerance { value: tol });
    }
    Ok(())
}
