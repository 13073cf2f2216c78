//! Errors for the forward model (parameter validation, configuration
//! parsing, and PMF construction).
//!
//! This module defines [`ForwardError`], returned by configuration builders
//! and by every forward-model entry point before any numerical work starts.
//! It implements `Display`/`Error` and converts to `PyErr` behind the
//! `python-bindings` feature.
//!
//! ## Conventions
//! - Efficiencies must lie in **[0, 1]**.
//! - Dark-count rates and Schmidt-mode means must be **finite and ≥ 0**.
//! - Cutoffs (`cutoff`, `nmax`) must be **≥ 1**.
//! - Arms are named `"signal"`, `"idler"` or `"degenerate"` in payloads.
use crate::pmf::PmfError;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

/// Result alias for forward-model operations that may produce [`ForwardError`].
pub type ForwardResult<T> = Result<T, ForwardError>;

/// Unified error type for forward-model configuration and evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardError {
    // ---- Parameter validation ----
    /// Detection efficiency outside [0, 1] or non-finite.
    InvalidEfficiency { arm: &'static str, value: f64 },

    /// Dark-count rate negative or non-finite.
    NegativeRate { arm: &'static str, value: f64 },

    /// Schmidt-mode mean negative or non-finite.
    InvalidModeMean { index: usize, value: f64 },

    /// No Schmidt modes were configured.
    EmptyModeSet,

    /// Cutoff / nmax of zero.
    InvalidCutoff { value: usize },

    /// Truncation tolerance outside (0, 1).
    InvalidTolerance { value: f64 },

    // ---- Configuration parsing ----
    /// A keyword that the configuration does not recognize.
    UnrecognizedField { name: String },

    /// A keyword required by the configuration was not supplied.
    MissingField { name: String },

    /// Structured configuration (e.g. JSON) could not be decoded.
    InvalidConfig { reason: String },

    // ---- PMF construction ----
    /// The computed array failed PMF validation.
    Pmf(PmfError),
}

impl std::error::Error for ForwardError {}

impl std::fmt::Display for ForwardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Parameter validation ----
            ForwardError::InvalidEfficiency { arm, value } => {
                write!(f, "Efficiency for {arm} arm must be finite and in [0, 1]; got: {value}")
            }
            ForwardError::NegativeRate { arm, value } => {
                write!(f, "Dark-count rate for {arm} arm must be finite and ≥ 0; got: {value}")
            }
            ForwardError::InvalidModeMean { index, value } => {
                write!(f, "Schmidt-mode mean {index} must be finite and ≥ 0; got: {value}")
            }
            ForwardError::EmptyModeSet => {
                write!(f, "At least one Schmidt mode must be configured.")
            }
            ForwardError::InvalidCutoff { value } => {
                write!(f, "Cutoff must be a positive photon count; got: {value}")
            }
            ForwardError::InvalidTolerance { value } => {
                write!(f, "Truncation tolerance must lie in (0, 1); got: {value}")
            }
            // ---- Configuration parsing ----
            ForwardError::UnrecognizedField { name } => {
                write!(f, "Unrecognized configuration field: {name}")
            }
            ForwardError::MissingField { name } => {
                write!(f, "Missing configuration field: {name}")
            }
            ForwardError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            // ---- PMF construction ----
            ForwardError::Pmf(err) => write!(f, "Forward model produced an invalid PMF: {err}"),
        }
    }
}

impl From<PmfError> for ForwardError {
    fn from(err: PmfError) -> ForwardError {
        ForwardError::Pmf(err)
    }
}

impl From<serde_json::Error> for ForwardError {
    fn from(err: serde_json::Error) -> ForwardError {
        let reason = err.to_string();
        match unknown_field_name(&reason) {
            Some(name) => ForwardError::UnrecognizedField { name: name.to_string() },
            None => ForwardError::InvalidConfig { reason },
        }
    }
}

/// Field name from serde's "unknown field `name`, expected ..." message.
fn unknown_field_name(reason: &str) -> Option<&str> {
    let rest = reason.strip_prefix("unknown field `")?;
    rest.split_once('`').map(|(name, _)| name)
}

/// Convert a [`ForwardError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ForwardError> for PyErr {
    fn from(err: ForwardError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that efficiency errors name the arm and the offending value.
    //
    // Given
    // -----
    // - `InvalidEfficiency { arm: "idler", value: 1.5 }`.
    //
    // Expect
    // ------
    // - The message contains "idler" and "1.5".
    fn forward_error_invalid_efficiency_includes_arm_and_value() {
        // Arrange
        let err = ForwardError::InvalidEfficiency { arm: "idler", value: 1.5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("idler") && msg.contains("1.5"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that PMF errors convert into `ForwardError::Pmf` unchanged.
    //
    // Given
    // -----
    // - `PmfError::Empty`.
    //
    // Expect
    // ------
    // - `ForwardError::from` wraps it as `ForwardError::Pmf(PmfError::Empty)`.
    fn forward_error_from_pmf_error_wraps_variant() {
        // Act
        let err = ForwardError::from(PmfError::Empty);

        // Assert
        assert_eq!(err, ForwardError::Pmf(PmfError::Empty));
    }
}
