//! Two-Schmidt-mode parameter guess by the method of moments.
//!
//! Purpose
//! -------
//! Recover approximate source parameters `(η_s, η_i, n1, n2)` from the
//! moments of a joint signal/idler PMF, assuming a noiseless twin beam made
//! of two thermal Schmidt modes. The result seeds an external nonlinear
//! refinement.
//!
//! Key behaviors
//! -------------
//! - For a noiseless twin beam with total mean `M` and Schmidt number `K`:
//!   `g2_s = g2_i = 1 + 1/K`, `g11 = 1 + 1/K + 1/M`, `n_arm = η_arm·M`.
//!   These relations are inverted in closed form:
//!   1. `g2 = (g2_s + g2_i)/2`, `K = 1/(g2 − 1)`;
//!   2. `M = 1/(g11 − g2)`;
//!   3. `η_s = n_s/M`, `η_i = n_i/M`;
//!   4. `n1 ≥ n2` are the roots of `x² − M·x + M²(1 − 1/K)/2`, whose
//!      discriminant is `M²(2g2 − 3)`.
//! - Moments that no two-mode source can produce are clamped to the nearest
//!   admissible value. A clamp beyond rounding slack ([`DISCRIMINANT_TOL`],
//!   [`CLAMP_REL_TOL`]) is recorded as a [`GuessIssue`], marks the guess
//!   invalid and emits `log::warn!`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output always satisfies `0 ≤ η ≤ 1` and `n1 ≥ n2 ≥ 0`.
//! - Mode labels carry no physical order: the larger root is `n1`.
//! - Noise biases the guess (it raises `g2` less than `g11`); the guess is
//!   a starting point, not an estimator with known error.
//!
//! Downstream usage
//! ----------------
//! - [`ParameterGuess::to_twinbeam_config`] turns the guess into a forward
//!   configuration; [`ParameterGuess::to_map`] exports the keyword form
//!   accepted by [`TwinBeamConfig::from_params`].
use crate::{
    forward::{ForwardResult, TwinBeamConfig},
    inverse::errors::{InverseError, InverseResult},
    pmf::Pmf2D,
    statistics::{marginal_calcs_2d, Moments2D},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Slack allowed on a negative discriminant factor `2g2 − 3` before the
/// guess is flagged; covers rounding for sources with exactly `K = 2`.
pub const DISCRIMINANT_TOL: f64 = 1e-6;

/// Relative slack on the total-mean and second-mode clamps. Lossless or
/// single-mode moments land a few ulps past those bounds; inside this band
/// the value is clamped without recording an issue.
pub const CLAMP_REL_TOL: f64 = 1e-6;

/// GuessIssue — a moment inconsistency that forced clamping.
///
/// Variants
/// --------
/// - `NoFiniteTotalMean { g11, g2 }`
///   `g11 ≤ g2`, so `1/M = g11 − g2` admits no positive `M`; `M` falls back
///   to the larger arm mean.
/// - `EfficiencyAboveOne { total_mean, arm_mean }`
///   `1/(g11 − g2)` is below an arm mean, which would imply `η > 1`; `M` is
///   raised to the larger arm mean.
/// - `NegativeDiscriminant { g2 }`
///   `g2 < 1.5` (`K > 2`): two modes cannot be this multimode; the
///   discriminant is set to zero, giving `n1 = n2 = M/2`.
/// - `NegativeSecondMode { g2 }`
///   `g2 > 2` (`K < 1`): the smaller root is negative; `n2 = 0`, `n1 = M`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuessIssue {
    NoFiniteTotalMean { g11: f64, g2: f64 },
    EfficiencyAboveOne { total_mean: f64, arm_mean: f64 },
    NegativeDiscriminant { g2: f64 },
    NegativeSecondMode { g2: f64 },
}

impl std::fmt::Display for GuessIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuessIssue::NoFiniteTotalMean { g11, g2 } => write!(
                f,
                "g11 ({g11:.6}) does not exceed g2 ({g2:.6}); total mean set to the larger arm mean"
            ),
            GuessIssue::EfficiencyAboveOne { total_mean, arm_mean } => write!(
                f,
                "total mean {total_mean:.6} is below arm mean {arm_mean:.6}; raised to keep η ≤ 1"
            ),
            GuessIssue::NegativeDiscriminant { g2 } => {
                write!(f, "g2 = {g2:.6} < 1.5 implies K > 2; modes set equal")
            }
            GuessIssue::NegativeSecondMode { g2 } => {
                write!(f, "g2 = {g2:.6} > 2 implies K < 1; second mode set to zero")
            }
        }
    }
}

/// ParameterGuess — initial estimate for a two-mode twin-beam source.
///
/// Fields
/// ------
/// - `eta_s`, `eta_i`: `f64`
///   Detection efficiencies in [0, 1].
/// - `n1`, `n2`: `f64`
///   Schmidt-mode means, `n1 ≥ n2 ≥ 0`.
/// - `valid`: `bool`
///   `false` when any clamping was needed.
/// - `issues`: `Vec<GuessIssue>`
///   Every inconsistency encountered, in detection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterGuess {
    pub eta_s: f64,
    pub eta_i: f64,
    pub n1: f64,
    pub n2: f64,
    pub valid: bool,
    pub issues: Vec<GuessIssue>,
}

impl ParameterGuess {
    /// Keyword form: `eta_s`, `eta_i`, `n_modes` (= 2), `sq_0` (= n1),
    /// `sq_1` (= n2).
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("eta_s", self.eta_s),
            ("eta_i", self.eta_i),
            ("n_modes", 2.0),
            ("sq_0", self.n1),
            ("sq_1", self.n2),
        ])
    }

    /// Noiseless two-mode [`TwinBeamConfig`] seeded by this guess.
    pub fn to_twinbeam_config(&self) -> ForwardResult<TwinBeamConfig> {
        TwinBeamConfig::new(vec![self.n1, self.n2], self.eta_s, self.eta_i, 0.0, 0.0)
    }

    /// Total mean `M = n1 + n2`.
    pub fn total_mean(&self) -> f64 {
        self.n1 + self.n2
    }
}

/// Two-Schmidt-mode guess from a joint PMF (theoretical or empirical).
///
/// Errors
/// ------
/// - `InverseError::DegenerateMoments` when an arm has zero mean.
///
/// Examples
/// --------
/// ```rust
/// # use spdc_tomography::{forward::{twinbeam_pmf, TwinBeamConfig}, inverse::two_schmidt_mode_guess};
/// let cfg = TwinBeamConfig::new(vec![1.0, 0.3], 0.7, 0.5, 0.0, 0.0).unwrap();
/// let pmf = twinbeam_pmf(&cfg, 60).unwrap().into_pmf();
/// let guess = two_schmidt_mode_guess(&pmf).unwrap();
/// assert!(guess.valid);
/// assert!((guess.n1 - 1.0).abs() < 1e-3 && (guess.eta_i - 0.5).abs() < 1e-3);
/// ```
pub fn two_schmidt_mode_guess(pmf: &Pmf2D) -> InverseResult<ParameterGuess> {
    guess_from_moments(&marginal_calcs_2d(pmf))
}

/// Two-Schmidt-mode guess from precomputed moments.
///
/// Errors
/// ------
/// - `InverseError::DegenerateMoments` naming the first undefined statistic
///   among `g2_s`, `g2_i`, `g11`.
pub fn guess_from_moments(moments: &Moments2D) -> InverseResult<ParameterGuess> {
    let g2_s = require(moments.g2_s.value(), "g2_s")?;
    let g2_i = require(moments.g2_i.value(), "g2_i")?;
    let g11 = require(moments.g11.value(), "g11")?;

    let g2 = 0.5 * (g2_s + g2_i);
    let arm_mean = moments.n_s.max(moments.n_i);
    let mut issues = Vec::new();

    let inv_total = g11 - g2;
    let mut total_mean = if inv_total > 0.0 {
        1.0 / inv_total
    } else {
        issues.push(GuessIssue::NoFiniteTotalMean { g11, g2 });
        arm_mean
    };
    if total_mean < arm_mean {
        if total_mean < arm_mean * (1.0 - CLAMP_REL_TOL) {
            issues.push(GuessIssue::EfficiencyAboveOne { total_mean, arm_mean });
        }
        total_mean = arm_mean;
    }

    let mut disc_factor = 2.0 * g2 - 3.0;
    if disc_factor < -DISCRIMINANT_TOL {
        issues.push(GuessIssue::NegativeDiscriminant { g2 });
    }
    disc_factor = disc_factor.max(0.0);

    let half_spread = 0.5 * total_mean * disc_factor.sqrt();
    let mut n1 = 0.5 * total_mean + half_spread;
    let mut n2 = 0.5 * total_mean - half_spread;
    if n2 < 0.0 {
        if n2 < -CLAMP_REL_TOL * total_mean {
            issues.push(GuessIssue::NegativeSecondMode { g2 });
        }
        n1 = total_mean;
        n2 = 0.0;
    }

    let guess = ParameterGuess {
        eta_s: moments.n_s / total_mean,
        eta_i: moments.n_i / total_mean,
        n1,
        n2,
        valid: issues.is_empty(),
        issues,
    };

    for issue in &guess.issues {
        log::warn!("two-mode guess clamped: {issue}");
    }
    log::debug!(
        "two-mode guess: eta_s={:.4}, eta_i={:.4}, n1={:.4}, n2={:.4}, valid={}",
        guess.eta_s,
        guess.eta_i,
        guess.n1,
        guess.n2,
        guess.valid
    );
    Ok(guess)
}

fn require(value: Option<f64>, statistic: &'static str) -> InverseResult<f64> {
    value.ok_or(InverseError::DegenerateMoments { statistic })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::Statistic;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests work on hand-built `Moments2D` values so each branch of the
    // closed-form inversion is hit exactly:
    // - consistent moments → exact recovery, valid guess;
    // - each clamping rule → issue recorded, invariants preserved;
    // - undefined statistics → `DegenerateMoments`.
    // Recovery from forward-model PMFs is covered by the integration tests.
    // -------------------------------------------------------------------------

    /// Moments of a noiseless two-mode twin beam with the given parameters.
    fn two_mode_moments(eta_s: f64, eta_i: f64, n1: f64, n2: f64) -> Moments2D {
        let m = n1 + n2;
        let inv_k = (n1 * n1 + n2 * n2) / (m * m);
        Moments2D {
            n_s: eta_s * m,
            n_i: eta_i * m,
            g2_s: Statistic::defined(1.0 + inv_k),
            g2_i: Statistic::defined(1.0 + inv_k),
            g11: Statistic::defined(1.0 + inv_k + 1.0 / m),
        }
    }

    fn with_correlations(g2: f64, g11: f64, n_s: f64, n_i: f64) -> Moments2D {
        Moments2D {
            n_s,
            n_i,
            g2_s: Statistic::defined(g2),
            g2_i: Statistic::defined(g2),
            g11: Statistic::defined(g11),
        }
    }

    #[test]
    // Purpose
    // -------
    // Consistent two-mode moments invert exactly.
    //
    // Given
    // -----
    // - (η_s, η_i, n1, n2) = (0.7, 0.5, 1.0, 0.3).
    //
    // Expect
    // ------
    // - Each parameter recovered within 1e-12; valid, no issues.
    fn guess_from_moments_recovers_consistent_parameters() {
        // Arrange
        let moments = two_mode_moments(0.7, 0.5, 1.0, 0.3);

        // Act
        let guess = guess_from_moments(&moments).unwrap();

        // Assert
        assert!(guess.valid, "{:?}", guess.issues);
        assert_abs_diff_eq!(guess.eta_s, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(guess.eta_i, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(guess.n1, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(guess.n2, 0.3, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Mode labels are irrelevant: swapping n1 and n2 gives the same guess.
    //
    // Given
    // -----
    // - (0.9, 0.9, 0.2, 0.8).
    //
    // Expect
    // ------
    // - n1 = 0.8 (the larger root), n2 = 0.2.
    fn guess_from_moments_labels_larger_mode_first() {
        // Act
        let guess = guess_from_moments(&two_mode_moments(0.9, 0.9, 0.2, 0.8)).unwrap();

        // Assert
        assert_abs_diff_eq!(guess.n1, 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(guess.n2, 0.2, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // g2 > 2 (K < 1) forces the second mode to zero.
    //
    // Given
    // -----
    // - g2 = 2.5, g11 = 3.5 (M = 1), n_s = n_i = 0.5.
    //
    // Expect
    // ------
    // - n1 = 1, n2 = 0, invalid with `NegativeSecondMode`.
    fn guess_from_moments_clamps_negative_second_mode() {
        // Act
        let guess = guess_from_moments(&with_correlations(2.5, 3.5, 0.5, 0.5)).unwrap();

        // Assert
        assert!(!guess.valid);
        assert_eq!(guess.issues, vec![GuessIssue::NegativeSecondMode { g2: 2.5 }]);
        assert_abs_diff_eq!(guess.n1, 1.0, epsilon = 1e-12);
        assert_eq!(guess.n2, 0.0);
    }

    #[test]
    // Purpose
    // -------
    // g2 < 1.5 (K > 2) clamps the discriminant: the two modes come out equal.
    //
    // Given
    // -----
    // - g2 = 1.2, g11 = 1.7 (M = 2), n_s = n_i = 1.
    //
    // Expect
    // ------
    // - n1 = n2 = 1, `NegativeDiscriminant` recorded.
    fn guess_from_moments_clamps_negative_discriminant() {
        // Act
        let guess = guess_from_moments(&with_correlations(1.2, 1.7, 1.0, 1.0)).unwrap();

        // Assert
        assert!(!guess.valid);
        assert!(matches!(guess.issues[..], [GuessIssue::NegativeDiscriminant { .. }]));
        assert_abs_diff_eq!(guess.n1, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(guess.n2, 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // g11 ≤ g2 admits no total mean; the fallback keeps η ≤ 1.
    //
    // Given
    // -----
    // - g2 = 1.8, g11 = 1.6, n_s = 0.4, n_i = 0.6.
    //
    // Expect
    // ------
    // - M = 0.6 (larger arm), η_i = 1, η_s = 2/3, `NoFiniteTotalMean` recorded.
    fn guess_from_moments_handles_g11_below_g2() {
        // Act
        let guess = guess_from_moments(&with_correlations(1.8, 1.6, 0.4, 0.6)).unwrap();

        // Assert
        assert!(!guess.valid);
        assert!(matches!(guess.issues[0], GuessIssue::NoFiniteTotalMean { .. }));
        assert_abs_diff_eq!(guess.total_mean(), 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(guess.eta_i, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(guess.eta_s, 0.4 / 0.6, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A total mean below an arm mean would imply η > 1 and is raised.
    //
    // Given
    // -----
    // - g2 = 1.8, g11 = 2.8 (M = 1), n_s = 1.5, n_i = 0.5.
    //
    // Expect
    // ------
    // - M = 1.5, η_s = 1, `EfficiencyAboveOne` recorded.
    fn guess_from_moments_raises_total_mean_to_keep_efficiency_physical() {
        // Act
        let guess = guess_from_moments(&with_correlations(1.8, 2.8, 1.5, 0.5)).unwrap();

        // Assert
        assert!(!guess.valid);
        assert!(matches!(guess.issues[0], GuessIssue::EfficiencyAboveOne { .. }));
        assert_abs_diff_eq!(guess.eta_s, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(guess.total_mean(), 1.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Rounding at unit efficiency or with one empty mode is not an
    // inconsistency.
    //
    // Given
    // -----
    // - Lossless moments (g2 = 1.5) whose `1/(g11 − g2)` sits a few ulps
    //   below `n_s = n_i = 0.7`.
    // - Single-mode moments with `g2 = 2 + 4e-16`.
    //
    // Expect
    // ------
    // - Both guesses valid with no issues; η clamped to exactly 1 and `n2`
    //   clamped to exactly 0.
    fn guess_from_moments_absorbs_rounding_at_the_physical_bounds() {
        // Arrange
        let lossless = with_correlations(1.5, 1.5 + 1.428_571_428_571_431, 0.7, 0.7);
        let single_g2 = 2.0 + 4e-16;
        let single = with_correlations(single_g2, single_g2 + 1.0, 1.0, 1.0);

        // Act
        let lossless_guess = guess_from_moments(&lossless).unwrap();
        let single_guess = guess_from_moments(&single).unwrap();

        // Assert
        assert!(lossless_guess.valid, "{:?}", lossless_guess.issues);
        assert_eq!(lossless_guess.eta_s, 1.0);
        assert_eq!(lossless_guess.eta_i, 1.0);
        assert!(single_guess.valid, "{:?}", single_guess.issues);
        assert_eq!(single_guess.n2, 0.0);
        assert_abs_diff_eq!(single_guess.n1, 1.0, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Undefined statistics are a hard error naming the statistic.
    //
    // Given
    // -----
    // - Moments with g11 undefined.
    //
    // Expect
    // ------
    // - `DegenerateMoments { statistic: "g11" }`.
    fn guess_from_moments_rejects_undefined_statistics() {
        // Arrange
        let mut moments = with_correlations(1.5, 2.0, 0.0, 1.0);
        moments.g11 = Statistic::undefined();

        // Act
        let err = guess_from_moments(&moments).unwrap_err();

        // Assert
        assert_eq!(err, InverseError::DegenerateMoments { statistic: "g11" });
    }

    #[test]
    // Purpose
    // -------
    // The exported map uses the forward keyword names and round-trips into
    // a configuration.
    //
    // Given
    // -----
    // - The guess for (0.7, 0.5, 1.0, 0.3).
    //
    // Expect
    // ------
    // - `TwinBeamConfig::from_params` on the map equals `to_twinbeam_config`.
    fn parameter_guess_map_feeds_keyword_configuration() {
        // Arrange
        let guess = guess_from_moments(&two_mode_moments(0.7, 0.5, 1.0, 0.3)).unwrap();

        // Act
        let params: BTreeMap<String, f64> =
            guess.to_map().into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        let from_map = TwinBeamConfig::from_params(&params).unwrap();

        // Assert
        assert_eq!(from_map, guess.to_twinbeam_config().unwrap());
    }
}
