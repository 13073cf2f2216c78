//! inverse::errors — failures of the moment-based parameter guess.
//!
//! Inconsistent but computable moments are **not** errors: they produce a
//! clamped [`ParameterGuess`](crate::inverse::ParameterGuess) flagged
//! invalid. [`InverseError`] is reserved for inputs from which no guess can
//! be formed at all.

use crate::pmf::PmfError;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

pub type InverseResult<T> = Result<T, InverseError>;

/// InverseError — no parameter guess can be formed.
///
/// Variants
/// --------
/// - `DegenerateMoments { statistic }`
///   A statistic the estimator needs (`g2_s`, `g2_i` or `g11`) is undefined
///   because an arm has zero mean.
/// - `Pmf(PmfError)`
///   The input array is not a valid joint PMF.
#[derive(Debug, Clone, PartialEq)]
pub enum InverseError {
    DegenerateMoments { statistic: &'static str },
    Pmf(PmfError),
}

impl std::error::Error for InverseError {}

impl std::fmt::Display for InverseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InverseError::DegenerateMoments { statistic } => write!(
                f,
                "Statistic {statistic} is undefined (zero mean photon number); \
                 cannot form a parameter guess"
            ),
            InverseError::Pmf(err) => write!(f, "Invalid joint PMF: {err}"),
        }
    }
}

impl From<PmfError> for InverseError {
    fn from(err: PmfError) -> InverseError {
        InverseError::Pmf(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<InverseError> for PyErr {
    fn from(err: InverseError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
