//! Marginal moments and normalized correlations of photon-number PMFs.
//!
//! Purpose
//! -------
//! Reduce a PMF to the handful of moments the inverse estimator consumes:
//! mean photon numbers, the per-arm second-order correlation `g2` and the
//! cross-correlation `g11`.
//!
//! Key behaviors
//! -------------
//! - [`marginal_calcs_1d`]: `n = Σ k·p(k)`, `g2 = Σ k(k−1)·p(k) / n²`.
//! - [`marginal_calcs_2d`]: per-arm `n_s`, `n_i`, `g2_s`, `g2_i` from the
//!   row/column marginals and `g11 = E[k_s·k_i] / (n_s·n_i)`.
//! - Summaries export a name → value map under the canonical names
//!   `n`, `g2`, `n_s`, `n_i`, `g2_s`, `g2_i`, `g11`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A correlation whose normalizing mean is zero is an undefined
//!   [`Statistic`], never 0 and never a silent NaN.
//! - Moments are taken over the PMF as given: a truncated, unnormalized
//!   PMF is not rescaled first.
//!
//! Conventions
//! -----------
//! - Joint PMFs are `[[k_s, k_i]]`: the signal marginal sums over columns.
use crate::pmf::{Pmf1D, Pmf2D};
use ndarray::ArrayView1;
use std::collections::BTreeMap;

/// Statistic — a correlation value that may be undefined.
///
/// Fields
/// ------
/// - `value`: `f64`
///   The value when defined; `NaN` sentinel otherwise.
/// - `defined`: `bool`
///   `false` when the normalizing mean was zero.
///
/// Notes
/// -----
/// - Two undefined statistics compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Statistic {
    value: f64,
    defined: bool,
}

impl Statistic {
    pub fn defined(value: f64) -> Self {
        Statistic { value, defined: true }
    }

    pub fn undefined() -> Self {
        Statistic { value: f64::NAN, defined: false }
    }

    pub fn is_defined(&self) -> bool {
        self.defined
    }

    /// `Some(value)` when defined, `None` otherwise.
    pub fn value(&self) -> Option<f64> {
        self.defined.then_some(self.value)
    }

    /// The raw value, `NaN` when undefined.
    pub fn value_or_nan(&self) -> f64 {
        self.value
    }
}

impl PartialEq for Statistic {
    fn eq(&self, other: &Self) -> bool {
        match (self.defined, other.defined) {
            (true, true) => self.value == other.value,
            (false, false) => true,
            _ => false,
        }
    }
}

/// Moments1D — summary of a single-arm PMF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments1D {
    pub n: f64,
    pub g2: Statistic,
}

impl Moments1D {
    /// Effective Schmidt number `K = 1/(g2 − 1)`, treating the PMF as one
    /// arm of a noiseless multimode twin beam. Undefined when `g2 ≤ 1` or
    /// `g2` is undefined.
    pub fn schmidt_number(&self) -> Statistic {
        schmidt_from_g2(self.g2)
    }

    /// Canonical name → value map; undefined statistics map to `NaN`.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([("n", self.n), ("g2", self.g2.value_or_nan())])
    }
}

/// Moments2D — summary of a joint signal/idler PMF.
///
/// Fields
/// ------
/// - `n_s`, `n_i`: `f64`
///   Mean detected counts per arm.
/// - `g2_s`, `g2_i`: [`Statistic`]
///   Per-arm second-order correlation of the marginals.
/// - `g11`: [`Statistic`]
///   Normalized signal/idler cross-correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments2D {
    pub n_s: f64,
    pub n_i: f64,
    pub g2_s: Statistic,
    pub g2_i: Statistic,
    pub g11: Statistic,
}

impl Moments2D {
    /// Effective Schmidt number from the arm-averaged `g2`
    /// (`K = 1/(g2_avg − 1)`).
    pub fn schmidt_number(&self) -> Statistic {
        match (self.g2_s.value(), self.g2_i.value()) {
            (Some(s), Some(i)) => schmidt_from_g2(Statistic::defined(0.5 * (s + i))),
            _ => Statistic::undefined(),
        }
    }

    /// Canonical name → value map; undefined statistics map to `NaN`.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("n_s", self.n_s),
            ("n_i", self.n_i),
            ("g2_s", self.g2_s.value_or_nan()),
            ("g2_i", self.g2_i.value_or_nan()),
            ("g11", self.g11.value_or_nan()),
        ])
    }

    /// `true` when every correlation is defined.
    pub fn all_defined(&self) -> bool {
        self.g2_s.is_defined() && self.g2_i.is_defined() && self.g11.is_defined()
    }
}

/// Mean and `g2` of a single-arm PMF.
///
/// Examples
/// --------
/// ```rust
/// # use spdc_tomography::{pmf::Pmf1D, statistics::marginal_calcs_1d};
/// let pmf = Pmf1D::from_vec(vec![0.5, 0.0, 0.5]).unwrap();
/// let m = marginal_calcs_1d(&pmf);
/// assert_eq!(m.n, 1.0);
/// assert_eq!(m.g2.value(), Some(1.0));
/// ```
pub fn marginal_calcs_1d(pmf: &Pmf1D) -> Moments1D {
    let (n, g2) = mean_and_g2(pmf.probs());
    Moments1D { n, g2 }
}

/// Per-arm means, per-arm `g2` and the cross-correlation `g11` of a joint
/// PMF.
pub fn marginal_calcs_2d(pmf: &Pmf2D) -> Moments2D {
    let (n_s, g2_s) = mean_and_g2(pmf.signal_marginal().view());
    let (n_i, g2_i) = mean_and_g2(pmf.idler_marginal().view());

    let probs = pmf.probs();
    let mut cross = 0.0;
    for ((s, i), &p) in probs.indexed_iter() {
        cross += (s * i) as f64 * p;
    }
    let g11 = if n_s > 0.0 && n_i > 0.0 {
        Statistic::defined(cross / (n_s * n_i))
    } else {
        Statistic::undefined()
    };

    Moments2D { n_s, n_i, g2_s, g2_i, g11 }
}

fn mean_and_g2(probs: ArrayView1<'_, f64>) -> (f64, Statistic) {
    let mut mean = 0.0;
    let mut factorial_moment = 0.0;
    for (k, &p) in probs.iter().enumerate() {
        let k = k as f64;
        mean += k * p;
        factorial_moment += k * (k - 1.0) * p;
    }
    let g2 = if mean > 0.0 {
        Statistic::defined(factorial_moment / (mean * mean))
    } else {
        Statistic::undefined()
    };
    (mean, g2)
}

fn schmidt_from_g2(g2: Statistic) -> Statistic {
    match g2.value() {
        Some(g) if g > 1.0 => Statistic::defined(1.0 / (g - 1.0)),
        _ => Statistic::undefined(),
    }
}
