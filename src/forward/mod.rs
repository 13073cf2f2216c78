//! forward — theoretical photon-number PMFs of multimode SPDC sources.
//!
//! Purpose
//! -------
//! Compute the detected-count distribution of an SPDC source from its
//! physical parameters: Schmidt-mode means, detector efficiencies and
//! dark-count rates. Two geometries are supported: twin beams (separate
//! signal and idler detectors, joint 2D PMF) and degenerate sources (both
//! photons of a pair on one detector, 1D PMF).
//!
//! Key behaviors
//! -------------
//! - [`source`]: per-mode pair statistics (thermal, squeezed vacuum) and the
//!   fold that convolves them into a multimode pair PMF.
//! - [`loss`]: the binomial [`LossChannel`] and its explicit loss matrix.
//! - [`noise`]: Poisson dark counts and the truncated convolution used by
//!   every stage.
//! - [`solver`]: [`twinbeam_pmf`] and [`degenerate_pmf`], the end-to-end
//!   pipelines.
//! - [`sweep`]: batched evaluation over many configurations (rayon-backed
//!   with the `parallel` feature).
//! - [`config`]: validated [`TwinBeamConfig`] / [`DegenerateConfig`] records,
//!   buildable from code, JSON or a flat keyword map.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every public entry point validates its parameters before numerical
//!   work and fails with [`ForwardError`] otherwise.
//! - Modes are independent; loss acts independently per photon and per arm;
//!   dark counts are independent of the signal and added after loss.
//! - Truncation at the cutoff is a diagnostic ([`crate::pmf::TruncationReport`]),
//!   never an error.
//!
//! Conventions
//! -----------
//! - Joint PMFs are indexed `[[k_s, k_i]]` (signal rows, idler columns).
//! - Twin-beam PMFs are renormalized after truncation; degenerate PMFs are
//!   not.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover structural properties (stochastic
//!   loss rows, neutral zero-mean modes, order independence, mean
//!   relations). Closed-form g2 / g11 checks against the moment formulas
//!   live in `tests/integration_forward_inverse_pipeline.rs`.

pub mod config;
pub mod errors;
pub mod loss;
pub mod noise;
pub mod solver;
pub mod source;
pub mod sweep;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::config::{DegenerateConfig, TwinBeamConfig};
pub use self::errors::{ForwardError, ForwardResult};
pub use self::loss::{apply_loss, LossChannel};
pub use self::noise::{convolve_truncated, poisson_pmf};
pub use self::solver::{degenerate_pmf, degenerate_pmf_with, twinbeam_pmf};
pub use self::source::{build_degenerate_pair_pmf, build_pair_pmf};
pub use self::sweep::{degenerate_sweep, twinbeam_sweep};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use spdc_tomography::forward::prelude::*;

pub mod prelude {
    pub use super::{
        apply_loss, degenerate_pmf, degenerate_pmf_with, twinbeam_pmf, DegenerateConfig,
        ForwardError, ForwardResult, LossChannel, TwinBeamConfig,
    };
}
