//! inverse — closed-form parameter guesses from photon-number moments.
//!
//! Purpose
//! -------
//! Turn the moments of a measured (or simulated) joint PMF into a physical
//! parameter estimate suitable as the starting point of a nonlinear fit.
//!
//! Key behaviors
//! -------------
//! - [`two_schmidt_mode_guess`] / [`guess_from_moments`]: method-of-moments
//!   inversion for a noiseless two-mode twin beam.
//! - [`ParameterGuess`] records the estimate, a validity flag, and every
//!   [`GuessIssue`] that forced clamping.
//!
//! Invariants & assumptions
//! ------------------------
//! - Guesses always satisfy `0 ≤ η ≤ 1` and `n1 ≥ n2 ≥ 0`, even for
//!   inconsistent moments.
//! - Only undefined moments fail ([`InverseError::DegenerateMoments`]).

pub mod errors;
pub mod guess;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{InverseError, InverseResult};
pub use self::guess::{
    guess_from_moments, two_schmidt_mode_guess, GuessIssue, ParameterGuess, CLAMP_REL_TOL,
    DISCRIMINANT_TOL,
};
