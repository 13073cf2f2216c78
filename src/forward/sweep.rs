//! Parameter sweeps over independent forward configurations.
//!
//! Each configuration is evaluated on its own; results come back in input
//! order, one `ForwardResult` per configuration, so one invalid entry does
//! not abort the rest of the scan. With the `parallel` feature (default) the
//! work is spread over rayon's global pool.
use crate::{
    forward::{
        config::{DegenerateConfig, TwinBeamConfig},
        errors::ForwardResult,
        solver::{degenerate_pmf_with, twinbeam_pmf},
    },
    pmf::{Pmf1D, Pmf2D, PmfOutcome},
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluate [`twinbeam_pmf`] for every configuration at a shared cutoff.
pub fn twinbeam_sweep(
    configs: &[TwinBeamConfig], cutoff: usize,
) -> Vec<ForwardResult<PmfOutcome<Pmf2D>>> {
    log::debug!("twin-beam sweep over {} configurations, cutoff {cutoff}", configs.len());
    #[cfg(feature = "parallel")]
    {
        configs.par_iter().map(|cfg| twinbeam_pmf(cfg, cutoff)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        configs.iter().map(|cfg| twinbeam_pmf(cfg, cutoff)).collect()
    }
}

/// Evaluate [`degenerate_pmf_with`] for every configuration at a shared
/// `nmax`.
pub fn degenerate_sweep(
    configs: &[DegenerateConfig], nmax: usize,
) -> Vec<ForwardResult<PmfOutcome<Pmf1D>>> {
    log::debug!("degenerate sweep over {} configurations, nmax {nmax}", configs.len());
    #[cfg(feature = "parallel")]
    {
        configs.par_iter().map(|cfg| degenerate_pmf_with(cfg, nmax)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        configs.iter().map(|cfg| degenerate_pmf_with(cfg, nmax)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::errors::ForwardError;

    #[test]
    // Purpose
    // -------
    // Sweep results keep input order and match single evaluations; a bad
    // configuration yields an error in its own slot only.
    //
    // Given
    // -----
    // - Three twin-beam configurations, the middle one with η_s = 2 (built
    //   by struct update to bypass the constructor).
    //
    // Expect
    // ------
    // - Slots 0 and 2 equal direct `twinbeam_pmf` results; slot 1 is
    //   `InvalidEfficiency`.
    fn twinbeam_sweep_preserves_order_and_isolates_errors() {
        // Arrange
        let good_a = TwinBeamConfig::lossless(vec![0.3]).unwrap();
        let bad = TwinBeamConfig { eta_s: 2.0, ..good_a.clone() };
        let good_b = TwinBeamConfig::new(vec![0.5, 0.5], 0.7, 0.9, 0.0, 0.1).unwrap();

        // Act
        let results = twinbeam_sweep(&[good_a.clone(), bad, good_b.clone()], 30);

        // Assert
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &twinbeam_pmf(&good_a, 30).unwrap());
        assert!(matches!(results[1], Err(ForwardError::InvalidEfficiency { .. })));
        assert_eq!(results[2].as_ref().unwrap(), &twinbeam_pmf(&good_b, 30).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Degenerate sweeps agree with individual evaluations.
    //
    // Given
    // -----
    // - Two degenerate configurations, nmax 20.
    //
    // Expect
    // ------
    // - Element-wise equality with `degenerate_pmf_with`.
    fn degenerate_sweep_matches_individual_evaluations() {
        // Arrange
        let configs = vec![
            DegenerateConfig::new(vec![0.2], 1.0, 0.0).unwrap(),
            DegenerateConfig::new(vec![0.5, 0.1], 0.6, 0.02).unwrap(),
        ];

        // Act
        let results = degenerate_sweep(&configs, 20);

        // Assert
        for (cfg, res) in configs.iter().zip(&results) {
            assert_eq!(res.as_ref().unwrap(), &degenerate_pmf_with(cfg, 20).unwrap());
        }
    }
}
