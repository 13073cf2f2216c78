//! statistics::errors — failures of histogram construction and moment
//! extraction.
//!
//! Key behaviors
//! -------------
//! - Define [`StatsError`] and [`StatsResult`] for the histogram builders
//!   and samplers (empty, mismatched or oversized samples, zero-mass PMFs).
//! - Zero-mean arms are **not** errors: the marginal calculator reports them
//!   as undefined [`Statistic`](crate::statistics::Statistic) values.
//! - Implement `From<StatsError> for PyErr` behind `python-bindings`.

use crate::pmf::PmfError;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

pub type StatsResult<T> = Result<T, StatsError>;

/// StatsError — invalid sample input for histogram or sampling routines.
///
/// Variants
/// --------
/// - `EmptySamples`
///   No samples were supplied.
/// - `LengthMismatch { signal, idler }`
///   Signal and idler sample slices differ in length.
/// - `CountOverflow { count }`
///   A photon count too large for the histogram dimensions to be
///   represented in `usize`.
/// - `ZeroMass`
///   A PMF with no probability mass cannot be sampled.
/// - `Pmf(PmfError)`
///   The assembled histogram failed PMF validation.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    EmptySamples,
    LengthMismatch { signal: usize, idler: usize },
    CountOverflow { count: usize },
    ZeroMass,
    Pmf(PmfError),
}

impl std::error::Error for StatsError {}

impl std::fmt::Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsError::EmptySamples => write!(f, "At least one sample is required."),
            StatsError::LengthMismatch { signal, idler } => write!(
                f,
                "Signal and idler samples must have equal length; got {signal} and {idler}"
            ),
            StatsError::CountOverflow { count } => {
                write!(f, "Photon count {count} is too large to size a histogram.")
            }
            StatsError::ZeroMass => write!(f, "Cannot sample from a PMF with zero total mass."),
            StatsError::Pmf(err) => write!(f, "Histogram is not a valid PMF: {err}"),
        }
    }
}

impl From<PmfError> for StatsError {
    fn from(err: PmfError) -> StatsError {
        StatsError::Pmf(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<StatsError> for PyErr {
    fn from(err: StatsError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
