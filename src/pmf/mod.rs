//! pmf — photon-number probability mass functions and truncation reports.
//!
//! Purpose
//! -------
//! Hold the data model shared by every other subtree: validated 1D and 2D
//! PMFs, their error type, and the diagnostics attached to PMFs produced by
//! a cutoff-limited forward model.
//!
//! Key behaviors
//! -------------
//! - [`Pmf1D`] / [`Pmf2D`] validate entries once at construction and are
//!   read-only afterwards.
//! - [`TruncationReport`] and [`PmfOutcome`] carry the non-fatal truncation
//!   diagnostic alongside a forward PMF.
//!
//! Conventions
//! -----------
//! - Index `k` is a photon count; joint PMFs are `[[k_s, k_i]]`.
//! - Forward-model code works on raw `ndarray` buffers internally and wraps
//!   them in [`Pmf1D`] / [`Pmf2D`] only when handing results to callers.

pub mod data;
pub mod errors;
pub mod truncation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{Pmf1D, Pmf2D};
pub use self::errors::{PmfError, PmfResult};
pub use self::truncation::{PmfOutcome, TruncationReport, DEFAULT_TRUNCATION_TOL};
