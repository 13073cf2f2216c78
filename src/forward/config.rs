//! Forward-model configuration — validated source, loss and noise settings.
//!
//! Purpose
//! -------
//! Replace free-form keyword dictionaries with explicit configuration
//! records for the two source geometries: [`TwinBeamConfig`] (separate
//! signal and idler detectors) and [`DegenerateConfig`] (both photons of a
//! pair land on one detector).
//!
//! Key behaviors
//! -------------
//! - Enumerate every recognized option with its default and valid range.
//! - Validate eagerly in `new`, again on demand via `validate`, and reject
//!   unknown fields both in JSON (`serde(deny_unknown_fields)`) and in the
//!   flat keyword form (`from_params`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Fields are public for ergonomic struct-update syntax; solver entry
//!   points call `validate` before computing, so a hand-built invalid value
//!   fails with the same error a constructor would have produced.
//!
//! Conventions
//! -----------
//! - Keyword form: `n_modes` (optional), `sq_0 … sq_{n-1}` (mode means),
//!   `eta_s`, `eta_i`, `noise_s`, `noise_i`, `truncation_tol` for twin beams;
//!   `n_modes`, `sq_<k>`, `eta`, `n_dark`, `truncation_tol` for degenerate
//!   sources.
//! - Defaults: unit efficiency, zero noise, `DEFAULT_TRUNCATION_TOL`.
use crate::{
    forward::{
        errors::{ForwardError, ForwardResult},
        validation::{validate_efficiency, validate_mode_means, validate_rate, validate_tolerance},
    },
    pmf::DEFAULT_TRUNCATION_TOL,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// TwinBeamConfig — physical parameters of a signal/idler SPDC source.
///
/// Fields
/// ------
/// - `mode_means`: `Vec<f64>`
///   Mean pair number of each Schmidt mode (finite, ≥ 0, at least one).
/// - `eta_s`, `eta_i`: `f64`
///   Signal and idler detection efficiencies in [0, 1]. Default 1.
/// - `noise_s`, `noise_i`: `f64`
///   Mean Poisson dark counts added to each arm after loss. Default 0.
/// - `truncation_tol`: `f64`
///   Allowed missing mass before a truncation warning. Default 1e-6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwinBeamConfig {
    pub mode_means: Vec<f64>,
    #[serde(default = "unit_efficiency")]
    pub eta_s: f64,
    #[serde(default = "unit_efficiency")]
    pub eta_i: f64,
    #[serde(default)]
    pub noise_s: f64,
    #[serde(default)]
    pub noise_i: f64,
    #[serde(default = "default_truncation_tol")]
    pub truncation_tol: f64,
}

impl TwinBeamConfig {
    /// Build and validate a twin-beam configuration with the default
    /// truncation tolerance.
    ///
    /// Errors
    /// ------
    /// - `ForwardError::EmptyModeSet` / `InvalidModeMean` for bad mode means.
    /// - `ForwardError::InvalidEfficiency` for η outside [0, 1].
    /// - `ForwardError::NegativeRate` for negative or non-finite noise.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use spdc_tomography::forward::TwinBeamConfig;
    /// let cfg = TwinBeamConfig::new(vec![1.0, 0.1], 0.8, 0.6, 0.0, 0.05).unwrap();
    /// assert!((cfg.total_mean() - 1.1).abs() < 1e-12);
    /// assert!(TwinBeamConfig::new(vec![1.0], 1.2, 0.6, 0.0, 0.0).is_err());
    /// ```
    pub fn new(
        mode_means: Vec<f64>, eta_s: f64, eta_i: f64, noise_s: f64, noise_i: f64,
    ) -> ForwardResult<Self> {
        let config = TwinBeamConfig {
            mode_means,
            eta_s,
            eta_i,
            noise_s,
            noise_i,
            truncation_tol: DEFAULT_TRUNCATION_TOL,
        };
        config.validate()?;
        Ok(config)
    }

    /// Noiseless, lossless source with the given mode means.
    pub fn lossless(mode_means: Vec<f64>) -> ForwardResult<Self> {
        TwinBeamConfig::new(mode_means, 1.0, 1.0, 0.0, 0.0)
    }

    /// Replace the truncation tolerance, validating it.
    pub fn with_truncation_tol(mut self, tol: f64) -> ForwardResult<Self> {
        validate_tolerance(tol)?;
        self.truncation_tol = tol;
        Ok(self)
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> ForwardResult<()> {
        validate_mode_means(&self.mode_means)?;
        validate_efficiency("signal", self.eta_s)?;
        validate_efficiency("idler", self.eta_i)?;
        validate_rate("signal", self.noise_s)?;
        validate_rate("idler", self.noise_i)?;
        validate_tolerance(self.truncation_tol)
    }

    /// Total mean pair number `M = Σ m`.
    pub fn total_mean(&self) -> f64 {
        self.mode_means.iter().sum()
    }

    /// Decode a JSON object, rejecting unknown fields, then validate.
    ///
    /// Errors
    /// ------
    /// - `ForwardError::UnrecognizedField` for a key outside the struct.
    /// - `ForwardError::InvalidConfig` for any other decoding failure.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use spdc_tomography::forward::TwinBeamConfig;
    /// let cfg = TwinBeamConfig::from_json(r#"{"mode_means": [1.0, 0.1], "eta_s": 0.5}"#).unwrap();
    /// assert_eq!(cfg.eta_i, 1.0);
    /// assert!(TwinBeamConfig::from_json(r#"{"mode_means": [1.0], "gain": 2.0}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> ForwardResult<Self> {
        let config: TwinBeamConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Build from a flat keyword map (`n_modes`, `sq_<k>`, `eta_s`, `eta_i`,
    /// `noise_s`, `noise_i`, `truncation_tol`).
    ///
    /// Errors
    /// ------
    /// - `ForwardError::UnrecognizedField` for any other key, or for a
    ///   `sq_<k>` with `k ≥ n_modes`.
    /// - `ForwardError::MissingField` when a mode index below `n_modes` (or a
    ///   gap in the `sq_<k>` sequence) is absent.
    /// - Any validation error from [`TwinBeamConfig::validate`].
    pub fn from_params(params: &BTreeMap<String, f64>) -> ForwardResult<Self> {
        let mut consumed = BTreeSet::new();
        let mode_means = parse_mode_means(params, &mut consumed)?;
        let mut scalar = |name: &str, default: f64| {
            consumed.insert(name.to_string());
            params.get(name).copied().unwrap_or(default)
        };
        let config = TwinBeamConfig {
            mode_means,
            eta_s: scalar("eta_s", 1.0),
            eta_i: scalar("eta_i", 1.0),
            noise_s: scalar("noise_s", 0.0),
            noise_i: scalar("noise_i", 0.0),
            truncation_tol: scalar("truncation_tol", DEFAULT_TRUNCATION_TOL),
        };
        reject_unconsumed(params, &consumed)?;
        config.validate()?;
        Ok(config)
    }
}

/// DegenerateConfig — a degenerate squeezer detected as a single beam.
///
/// Fields
/// ------
/// - `mode_means`: `Vec<f64>`
///   Mean photon number of each squeezed Schmidt mode (finite, ≥ 0).
/// - `eta`: `f64`
///   Detection efficiency in [0, 1]. Default 1.
/// - `n_dark`: `f64`
///   Mean Poisson dark counts added after loss. Default 0.
/// - `truncation_tol`: `f64`
///   Allowed missing mass before a truncation warning. Default 1e-6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DegenerateConfig {
    pub mode_means: Vec<f64>,
    #[serde(default = "unit_efficiency")]
    pub eta: f64,
    #[serde(default)]
    pub n_dark: f64,
    #[serde(default = "default_truncation_tol")]
    pub truncation_tol: f64,
}

impl DegenerateConfig {
    /// Build and validate a degenerate-source configuration.
    pub fn new(mode_means: Vec<f64>, eta: f64, n_dark: f64) -> ForwardResult<Self> {
        let config =
            DegenerateConfig { mode_means, eta, n_dark, truncation_tol: DEFAULT_TRUNCATION_TOL };
        config.validate()?;
        Ok(config)
    }

    pub fn with_truncation_tol(mut self, tol: f64) -> ForwardResult<Self> {
        validate_tolerance(tol)?;
        self.truncation_tol = tol;
        Ok(self)
    }

    pub fn validate(&self) -> ForwardResult<()> {
        validate_mode_means(&self.mode_means)?;
        validate_efficiency("degenerate", self.eta)?;
        validate_rate("degenerate", self.n_dark)?;
        validate_tolerance(self.truncation_tol)
    }

    /// Total mean photon number `M = Σ m` before loss.
    pub fn total_mean(&self) -> f64 {
        self.mode_means.iter().sum()
    }

    pub fn from_json(json: &str) -> ForwardResult<Self> {
        let config: DegenerateConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Build from a flat keyword map (`n_modes`, `sq_<k>`, `eta`, `n_dark`,
    /// `truncation_tol`); same error rules as
    /// [`TwinBeamConfig::from_params`].
    pub fn from_params(params: &BTreeMap<String, f64>) -> ForwardResult<Self> {
        let mut consumed = BTreeSet::new();
        let mode_means = parse_mode_means(params, &mut consumed)?;
        let mut scalar = |name: &str, default: f64| {
            consumed.insert(name.to_string());
            params.get(name).copied().unwrap_or(default)
        };
        let config = DegenerateConfig {
            mode_means,
            eta: scalar("eta", 1.0),
            n_dark: scalar("n_dark", 0.0),
            truncation_tol: scalar("truncation_tol", DEFAULT_TRUNCATION_TOL),
        };
        reject_unconsumed(params, &consumed)?;
        config.validate()?;
        Ok(config)
    }
}

fn unit_efficiency() -> f64 {
    1.0
}

fn default_truncation_tol() -> f64 {
    DEFAULT_TRUNCATION_TOL
}

/// Collect `sq_<k>` entries into an ordered mode-mean vector.
///
/// With `n_modes` present, exactly `sq_0 … sq_{n_modes-1}` must be supplied.
/// Without it, the `sq_<k>` keys must form a gap-free sequence from 0.
fn parse_mode_means(
    params: &BTreeMap<String, f64>, consumed: &mut BTreeSet<String>,
) -> ForwardResult<Vec<f64>> {
    let mut indexed: BTreeMap<usize, f64> = BTreeMap::new();
    for (key, &value) in params {
        if let Some(index) = key.strip_prefix("sq_").and_then(|s| s.parse::<usize>().ok()) {
            indexed.insert(index, value);
            consumed.insert(key.clone());
        }
    }

    let n_modes = match params.get("n_modes") {
        Some(&raw) => {
            consumed.insert("n_modes".to_string());
            if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 {
                return Err(ForwardError::InvalidConfig {
                    reason: format!("n_modes must be a nonnegative integer; got {raw}"),
                });
            }
            raw as usize
        }
        None => indexed.keys().next_back().map_or(0, |&last| last + 1),
    };

    if let Some((&extra, _)) = indexed.range(n_modes..).next() {
        return Err(ForwardError::UnrecognizedField { name: format!("sq_{extra}") });
    }
    (0..n_modes)
        .map(|k| {
            indexed
                .get(&k)
                .copied()
                .ok_or_else(|| ForwardError::MissingField { name: format!("sq_{k}") })
        })
        .collect()
}

fn reject_unconsumed(
    params: &BTreeMap<String, f64>, consumed: &BTreeSet<String>,
) -> ForwardResult<()> {
    match params.keys().find(|key| !consumed.contains(*key)) {
        Some(key) => Err(ForwardError::UnrecognizedField { name: key.clone() }),
        None => Ok(()),
    }
}
