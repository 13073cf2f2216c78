//! statistics — empirical PMFs, sampling, and moment summaries.
//!
//! Purpose
//! -------
//! Bridge raw detection records and theoretical PMFs to the moments used by
//! the inverse estimator.
//!
//! Key behaviors
//! -------------
//! - [`histogram`]: [`gen_hist_2d`] / [`gen_hist_1d`] build normalized
//!   frequency tables from integer counts.
//! - [`sampling`]: [`sample_pmf_1d`] / [`sample_pmf_2d`] draw synthetic
//!   counts from a PMF with a caller-supplied RNG.
//! - [`marginals`]: [`marginal_calcs_1d`] / [`marginal_calcs_2d`] reduce a
//!   PMF to [`Moments1D`] / [`Moments2D`] with explicit [`Statistic`]
//!   definedness.
//!
//! Conventions
//! -----------
//! - Statistic names follow the underscored canonical set
//!   `n`, `g2`, `n_s`, `n_i`, `g2_s`, `g2_i`, `g11`.
//! - Joint data are `[[k_s, k_i]]`; sample slices are paired by index.

pub mod errors;
pub mod histogram;
pub mod marginals;
pub mod sampling;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{StatsError, StatsResult};
pub use self::histogram::{gen_hist_1d, gen_hist_2d};
pub use self::marginals::{marginal_calcs_1d, marginal_calcs_2d, Moments1D, Moments2D, Statistic};
pub use self::sampling::{sample_pmf_1d, sample_pmf_2d};
