//! Forward solver — theoretical detected-count PMFs.
//!
//! Purpose
//! -------
//! Compose the source model, the binomial loss channel and Poisson dark
//! counts into the full detected-count distribution for the two source
//! geometries.
//!
//! Key behaviors
//! -------------
//! - [`twinbeam_pmf`]: thermal pair PMF → diagonal joint array → per-arm
//!   loss → per-arm dark counts → renormalize. Returns a `cutoff × cutoff`
//!   [`Pmf2D`] with `[[k_s, k_i]]` indexing.
//! - [`degenerate_pmf`] / [`degenerate_pmf_with`]: squeezed pair PMF →
//!   photons at even indices → loss → dark counts. Returns a length-`nmax`
//!   [`Pmf1D`] that is **not** renormalized.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters are validated before any numerical work.
//! - The retained mass is measured before renormalization and reported in
//!   the [`TruncationReport`]; a retained mass below `1 − truncation_tol`
//!   also emits `log::warn!`.
//!
//! Downstream usage
//! ----------------
//! - Feed the PMF into `statistics::marginal_calcs_*` for moments, into
//!   `statistics::sample_pmf_*` for synthetic data, or into the sweep
//!   helpers for parameter scans.
use crate::{
    forward::{
        config::{DegenerateConfig, TwinBeamConfig},
        errors::ForwardResult,
        loss::LossChannel,
        noise::{add_dark_counts, add_dark_counts_idler, add_dark_counts_signal},
        source::{fold_modes, pairs_to_photons, squeezed_pair_pmf, thermal_pmf},
        validation::validate_cutoff,
    },
    pmf::{Pmf1D, Pmf2D, PmfOutcome, TruncationReport},
};
use ndarray::Array2;

/// Joint signal/idler count PMF of a multimode twin-beam source.
///
/// Parameters
/// ----------
/// - `config`: `&TwinBeamConfig`
///   Mode means, per-arm efficiencies and dark-count rates.
/// - `cutoff`: `usize`
///   Counts `0..cutoff` are kept on each axis (≥ 1).
///
/// Returns
/// -------
/// `ForwardResult<PmfOutcome<Pmf2D>>`
///   The renormalized joint PMF and the pre-renormalization mass.
///
/// Errors
/// ------
/// - Any validation error from [`TwinBeamConfig::validate`].
/// - `ForwardError::InvalidCutoff` for `cutoff == 0`.
///
/// Examples
/// --------
/// ```rust
/// # use spdc_tomography::forward::{twinbeam_pmf, TwinBeamConfig};
/// let cfg = TwinBeamConfig::lossless(vec![0.5]).unwrap();
/// let out = twinbeam_pmf(&cfg, 60).unwrap();
/// assert!((out.pmf().total_mass() - 1.0).abs() < 1e-12);
/// assert!(!out.truncation().is_truncated());
/// ```
pub fn twinbeam_pmf(config: &TwinBeamConfig, cutoff: usize) -> ForwardResult<PmfOutcome<Pmf2D>> {
    config.validate()?;
    validate_cutoff(cutoff)?;

    let pairs = fold_modes(&config.mode_means, cutoff, thermal_pmf);
    let joint = Array2::from_diag(&pairs);

    let joint = LossChannel::new(config.eta_s)?.apply_signal(joint.view());
    let joint = LossChannel::new(config.eta_i)?.apply_idler(joint.view());
    let joint = add_dark_counts_signal(joint.view(), config.noise_s)?;
    let mut joint = add_dark_counts_idler(joint.view(), config.noise_i)?;

    let retained = joint.sum();
    let report = TruncationReport::new(retained, config.truncation_tol);
    log_truncation("twin-beam", cutoff, &report);
    if retained > 0.0 {
        joint.mapv_inplace(|p| p / retained);
    }

    Ok(PmfOutcome::new(Pmf2D::new(joint)?, report))
}

/// Total detected-count PMF of a degenerate multimode squeezer.
///
/// Parameters
/// ----------
/// - `nmax`: `usize`
///   Output length; counts `0..nmax` are kept (≥ 1).
/// - `mode_means`: `&[f64]`
///   Mean photon number of each squeezed mode.
/// - `eta`: `f64`
///   Detection efficiency in [0, 1].
/// - `n_dark`: `f64`
///   Mean Poisson dark counts added after loss.
///
/// Errors
/// ------
/// - `ForwardError` for invalid parameters or `nmax == 0`.
///
/// Notes
/// -----
/// - The output is truncated, not renormalized: its total mass equals the
///   retained mass in the returned report.
pub fn degenerate_pmf(
    nmax: usize, mode_means: &[f64], eta: f64, n_dark: f64,
) -> ForwardResult<PmfOutcome<Pmf1D>> {
    let config = DegenerateConfig::new(mode_means.to_vec(), eta, n_dark)?;
    degenerate_pmf_with(&config, nmax)
}

/// [`degenerate_pmf`] driven by a [`DegenerateConfig`] (custom tolerance).
pub fn degenerate_pmf_with(
    config: &DegenerateConfig, nmax: usize,
) -> ForwardResult<PmfOutcome<Pmf1D>> {
    config.validate()?;
    validate_cutoff(nmax)?;

    let pair_cutoff = nmax.div_ceil(2);
    let pairs = fold_modes(&config.mode_means, pair_cutoff, squeezed_pair_pmf);
    let photons = pairs_to_photons(pairs.view(), nmax);

    let photons = LossChannel::new(config.eta)?.apply(photons.view());
    let photons = add_dark_counts(photons.view(), config.n_dark)?;

    let report = TruncationReport::new(photons.sum(), config.truncation_tol);
    log_truncation("degenerate", nmax, &report);

    Ok(PmfOutcome::new(Pmf1D::new(photons)?, report))
}

fn log_truncation(model: &str, cutoff: usize, report: &TruncationReport) {
    if report.is_truncated() {
        log::warn!(
            "{model} PMF truncated at cutoff {cutoff}: {:.3e} of the mass lies beyond it \
             (tolerance {:.1e}); increase the cutoff",
            report.discarded_mass(),
            report.tolerance()
        );
    } else {
        log::debug!(
            "{model} PMF computed with cutoff {cutoff}, retained mass {:.12}",
            report.retained_mass()
        );
    }
}
