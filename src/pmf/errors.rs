//! pmf::errors — validation failures for photon-number PMF containers.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias returned by the validating
//! constructors of [`Pmf1D`](crate::pmf::Pmf1D) and
//! [`Pmf2D`](crate::pmf::Pmf2D), together with a conversion into Python
//! exceptions when the `python-bindings` feature is enabled.
//!
//! Key behaviors
//! -------------
//! - Define [`PmfError`] and [`PmfResult`] as the canonical error surface for
//!   malformed probability arrays (empty, non-square, negative or non-finite
//!   entries).
//! - Attach human-readable `Display` messages that embed the offending index
//!   and value.
//! - Implement `From<PmfError> for PyErr` behind `python-bindings`.
//!
//! Invariants & assumptions
//! ------------------------
//! - PMF constructors validate every entry once; downstream numerical code
//!   assumes nonnegative finite arrays and never re-checks.
//! - `PmfError` values are small and `Clone`, so other subtrees embed them in
//!   their own error enums (`ForwardError::Pmf`, `StatsError::Pmf`).
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message carries its
//!   payload.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

pub type PmfResult<T> = Result<T, PmfError>;

/// PmfError — reasons a probability array cannot be used as a PMF.
///
/// Variants
/// --------
/// - `Empty`
///   The array has no entries (cutoff 0).
/// - `NonSquare { rows, cols }`
///   A joint PMF must be square, indexed by (signal, idler) counts over the
///   same cutoff.
/// - `InvalidEntry { index, value }`
///   An entry is negative, NaN or ±∞. `index` is the flat row-major index.
#[derive(Debug, Clone, PartialEq)]
pub enum PmfError {
    Empty,
    NonSquare { rows: usize, cols: usize },
    InvalidEntry { index: usize, value: f64 },
}

impl std::error::Error for PmfError {}

impl std::fmt::Display for PmfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PmfError::Empty => write!(f, "PMF must contain at least one entry."),
            PmfError::NonSquare { rows, cols } => {
                write!(f, "Joint PMF must be square; got {rows}×{cols}.")
            }
            PmfError::InvalidEntry { index, value } => {
                write!(f, "PMF entry at flat index {index} must be finite and ≥ 0; got {value}.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<PmfError> for PyErr {
    fn from(err: PmfError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` formatting for each PmfError variant and its payload.
    //
    // They intentionally DO NOT cover:
    // - The PyO3 conversion, which needs a Python interpreter.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `PmfError::NonSquare` reports both dimensions.
    //
    // Given
    // -----
    // - A 3×4 shape.
    //
    // Expect
    // ------
    // - The message contains "3" and "4".
    fn pmf_error_non_square_includes_shape_in_display() {
        // Arrange
        let err = PmfError::NonSquare { rows: 3, cols: 4 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('3') && msg.contains('4'), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `PmfError::InvalidEntry` reports index and value.
    //
    // Given
    // -----
    // - Index 7 with value -0.25.
    //
    // Expect
    // ------
    // - The message contains "7" and "-0.25".
    fn pmf_error_invalid_entry_includes_payload_in_display() {
        // Arrange
        let err = PmfError::InvalidEntry { index: 7, value: -0.25 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('7') && msg.contains("-0.25"), "Got: {msg}");
    }
}
