//! Truncation diagnostics for cutoff-limited forward models.
//!
//! A forward PMF represents an infinite-support distribution on
//! `0..cutoff`. The mass that falls beyond the cutoff is lost; this module
//! records how much was kept and whether the loss exceeds a tolerance.
//!
//! # Provided items
//! - [`DEFAULT_TRUNCATION_TOL`]: default allowed missing mass (1e-6).
//! - [`TruncationReport`]: retained mass plus the tolerance used to judge it.
//! - [`PmfOutcome`]: a produced PMF bundled with its report.
//!
//! A report flagged as truncated is a warning, never an error: the PMF is
//! still returned and callers decide whether to enlarge the cutoff.

/// Default tolerance on the mass missing from a truncated PMF.
///
/// The missing mass of a thermal tail with mean `m` cut at `c` is
/// `(m/(1+m))^c`, so this default asks for a cutoff of roughly
/// `14·(1+m)` photons for a single mode of mean `m`.
pub const DEFAULT_TRUNCATION_TOL: f64 = 1e-6;

/// TruncationReport — how much probability mass survived the cutoff.
///
/// Fields
/// ------
/// - `retained_mass`: `f64`
///   Total mass of the PMF measured *before* any renormalization.
/// - `tolerance`: `f64`
///   Allowed missing mass; the report is truncated when
///   `retained_mass < 1 − tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncationReport {
    retained_mass: f64,
    tolerance: f64,
}

impl TruncationReport {
    pub fn new(retained_mass: f64, tolerance: f64) -> Self {
        TruncationReport { retained_mass, tolerance }
    }

    pub fn retained_mass(&self) -> f64 {
        self.retained_mass
    }

    /// Probability mass discarded beyond the cutoff, floored at zero.
    pub fn discarded_mass(&self) -> f64 {
        (1.0 - self.retained_mass).max(0.0)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// `true` when more than `tolerance` of the mass was cut off.
    pub fn is_truncated(&self) -> bool {
        self.retained_mass < 1.0 - self.tolerance
    }
}

/// PmfOutcome — a forward-model PMF together with its truncation report.
#[derive(Debug, Clone, PartialEq)]
pub struct PmfOutcome<P> {
    pmf: P,
    truncation: TruncationReport,
}

impl<P> PmfOutcome<P> {
    pub fn new(pmf: P, truncation: TruncationReport) -> Self {
        PmfOutcome { pmf, truncation }
    }

    pub fn pmf(&self) -> &P {
        &self.pmf
    }

    pub fn truncation(&self) -> TruncationReport {
        self.truncation
    }

    pub fn into_pmf(self) -> P {
        self.pmf
    }

    /// Split into the PMF and its report, for callers that forward both.
    pub fn into_parts(self) -> (P, TruncationReport) {
        (self.pmf, self.truncation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check the truncation threshold on both sides of `1 − tolerance`.
    //
    // Given
    // -----
    // - Tolerance 1e-3 with retained masses 0.9995 and 0.998.
    //
    // Expect
    // ------
    // - Only the 0.998 report is truncated; discarded mass is 0.002.
    fn truncation_report_flags_mass_below_tolerance() {
        // Arrange
        let kept = TruncationReport::new(0.9995, 1e-3);
        let lost = TruncationReport::new(0.998, 1e-3);

        // Act / Assert
        assert!(!kept.is_truncated());
        assert!(lost.is_truncated());
        assert!((lost.discarded_mass() - 0.002).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Rounding can push the retained mass slightly above one; the discarded
    // mass must not go negative.
    //
    // Given
    // -----
    // - Retained mass 1 + 1e-14.
    //
    // Expect
    // ------
    // - Discarded mass is exactly 0 and the report is not truncated.
    fn truncation_report_discarded_mass_is_floored_at_zero() {
        // Arrange
        let report = TruncationReport::new(1.0 + 1e-14, DEFAULT_TRUNCATION_TOL);

        // Act / Assert
        assert_eq!(report.discarded_mass(), 0.0);
        assert!(!report.is_truncated());
    }
}
