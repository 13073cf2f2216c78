//! Photon-number PMF containers.
//!
//! Purpose
//! -------
//! Provide small, validated, immutable containers for photon-number
//! distributions: [`Pmf1D`] for a single detected arm and [`Pmf2D`] for the
//! joint (signal, idler) distribution of a twin beam.
//!
//! Key behaviors
//! -------------
//! - Enforce nonnegative, finite entries (and squareness for [`Pmf2D`]) at
//!   construction time.
//! - Expose read-only views, marginals and total mass. There is no mutable
//!   accessor: a PMF is produced once and never modified.
//!
//! Conventions
//! -----------
//! - Index `k` is the detected photon count; the cutoff is the array length.
//! - Joint arrays are indexed `[[k_s, k_i]]`: rows are signal counts, columns
//!   are idler counts.
//! - The total mass is not required to be exactly one. Truncated forward
//!   models report their missing tail through
//!   [`TruncationReport`](crate::pmf::TruncationReport) instead.
use crate::pmf::errors::{PmfError, PmfResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// `Pmf1D` — validated single-arm photon-number distribution.
///
/// Fields
/// ------
/// - `probs`: `Array1<f64>`
///   `probs[k]` is the probability of detecting `k` photons. Nonnegative and
///   finite; length ≥ 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Pmf1D {
    probs: Array1<f64>,
}

impl Pmf1D {
    /// Validate and wrap a probability vector.
    ///
    /// Errors
    /// ------
    /// - `PmfError::Empty` if `probs` has no entries.
    /// - `PmfError::InvalidEntry` for the first negative or non-finite entry.
    pub fn new(probs: Array1<f64>) -> PmfResult<Self> {
        if probs.is_empty() {
            return Err(PmfError::Empty);
        }
        check_entries(probs.iter())?;
        Ok(Pmf1D { probs })
    }

    /// Convenience constructor from a plain vector.
    pub fn from_vec(probs: Vec<f64>) -> PmfResult<Self> {
        Pmf1D::new(Array1::from(probs))
    }

    pub fn probs(&self) -> ArrayView1<'_, f64> {
        self.probs.view()
    }

    /// Number of represented photon counts (the cutoff).
    pub fn cutoff(&self) -> usize {
        self.probs.len()
    }

    pub fn total_mass(&self) -> f64 {
        self.probs.sum()
    }

    pub fn into_inner(self) -> Array1<f64> {
        self.probs
    }
}

/// `Pmf2D` — validated joint (signal, idler) photon-number distribution.
///
/// Fields
/// ------
/// - `probs`: `Array2<f64>`
///   Square matrix with `probs[[k_s, k_i]]` the probability of detecting
///   `k_s` signal and `k_i` idler photons.
///
/// Invariants
/// ----------
/// - `probs` is square with side ≥ 1; all entries are finite and ≥ 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Pmf2D {
    probs: Array2<f64>,
}

impl Pmf2D {
    /// Validate and wrap a joint probability matrix.
    ///
    /// Errors
    /// ------
    /// - `PmfError::Empty` if either dimension is zero.
    /// - `PmfError::NonSquare` if `rows != cols`.
    /// - `PmfError::InvalidEntry` for the first negative or non-finite entry,
    ///   reported with its flat row-major index.
    pub fn new(probs: Array2<f64>) -> PmfResult<Self> {
        let (rows, cols) = probs.dim();
        if rows == 0 || cols == 0 {
            return Err(PmfError::Empty);
        }
        if rows != cols {
            return Err(PmfError::NonSquare { rows, cols });
        }
        check_entries(probs.iter())?;
        Ok(Pmf2D { probs })
    }

    pub fn probs(&self) -> ArrayView2<'_, f64> {
        self.probs.view()
    }

    /// Side length of the square matrix (the cutoff shared by both arms).
    pub fn cutoff(&self) -> usize {
        self.probs.nrows()
    }

    pub fn total_mass(&self) -> f64 {
        self.probs.sum()
    }

    /// Signal marginal `p_s(k) = Σ_j p(k, j)`.
    pub fn signal_marginal(&self) -> Array1<f64> {
        self.probs.sum_axis(Axis(1))
    }

    /// Idler marginal `p_i(k) = Σ_j p(j, k)`.
    pub fn idler_marginal(&self) -> Array1<f64> {
        self.probs.sum_axis(Axis(0))
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.probs
    }
}

fn check_entries<'a>(entries: impl Iterator<Item = &'a f64>) -> PmfResult<()> {
    for (index, &value) in entries.enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(PmfError::InvalidEntry { index, value });
        }
    }
    Ok(())
}
