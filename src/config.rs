//! Configuration for the azimuth gridsearch and tilt correction.
//!
//! This module provides [`GridsearchConfig`] and [`TiltCorrectionConfig`],
//! which centralize the tunable parameters of the two windowed/spectral
//! algorithms, together with the string-selectable enums they use.
//!
//! # Example
//!
//! ```
//! use rotseis::{CorrectionMethod, TiltCorrectionConfig};
//!
//! // Coherence-gated correction in the 0.01-1 Hz band
//! let config = TiltCorrectionConfig::default()
//!     .with_band(Some(0.01), Some(1.0))
//!     .with_threshold(0.6);
//! assert!(config.validate().is_ok());
//!
//! let method: CorrectionMethod = "freq".parse()?;
//! assert_eq!(method, CorrectionMethod::Freq);
//! # Ok::<(), rotseis::SeisError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SeisError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard gravitational acceleration used by default (m/s²).
pub const DEFAULT_GRAVITATIONAL_ACCELERATION: f64 = 9.81;

/// Default azimuth grid step of the gridsearch (degrees).
pub const DEFAULT_AZIMUTH_DELTA: f64 = 5.0;

/// Tilt correction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CorrectionMethod {
    /// Theoretical coupling applied in the time domain: `a - s*g*sin(tilt)`.
    Direct,
    /// Theoretical coupling applied in the frequency domain where the
    /// coherence magnitude reaches the threshold.
    #[default]
    Coh,
    /// Empirical transfer function applied in the frequency domain.
    Freq,
}

impl CorrectionMethod {
    /// Name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Coh => "coh",
            Self::Freq => "freq",
        }
    }
}

impl fmt::Display for CorrectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrectionMethod {
    type Err = SeisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "direct" => Ok(Self::Direct),
            "coh" => Ok(Self::Coh),
            "freq" => Ok(Self::Freq),
            other => Err(SeisError::invalid_config(format!(
                "Invalid `method` argument: {other} (expected one of: direct, coh, freq)"
            ))),
        }
    }
}

/// Handling of a `stop` value that is not a whole multiple of `step` away
/// from `start` in [`arange2`](crate::math::arange2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RangePolicy {
    /// Fail with [`SeisError::InconsistentRange`].
    #[default]
    Raise,
    /// Move `stop` to the closest multiple of `step`.
    Round,
    /// Move `stop` to the next smaller multiple of `step`.
    Floor,
    /// Move `stop` to the next larger multiple of `step`.
    Ceil,
}

impl RangePolicy {
    /// Name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raise => "raise",
            Self::Round => "round",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
        }
    }
}

impl fmt::Display for RangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangePolicy {
    type Err = SeisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raise" => Ok(Self::Raise),
            "round" => Ok(Self::Round),
            "floor" => Ok(Self::Floor),
            "ceil" => Ok(Self::Ceil),
            other => Err(SeisError::invalid_config(format!(
                "Invalid range error policy: {other} (expected one of: raise, round, floor, ceil)"
            ))),
        }
    }
}

/// Parameters of the rotation-rate / transverse-acceleration azimuth gridsearch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridsearchConfig {
    /// Length of the gliding correlation window (s).
    pub time_sum: f64,

    /// Azimuth grid step size (degrees). The grid spans `[0, 360 - step]`
    /// and must close exactly on 360.
    pub azimuth_delta: f64,
}

impl GridsearchConfig {
    /// Configuration with the given window length and a 5° azimuth step.
    #[must_use]
    pub const fn new(time_sum: f64) -> Self {
        Self {
            time_sum,
            azimuth_delta: DEFAULT_AZIMUTH_DELTA,
        }
    }

    /// Set the azimuth grid step.
    #[must_use]
    pub const fn with_azimuth_delta(mut self, azimuth_delta: f64) -> Self {
        self.azimuth_delta = azimuth_delta;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the window length is not positive or the azimuth
    /// step is outside `(0, 360]`.
    pub fn validate(&self) -> Result<()> {
        if !(self.time_sum.is_finite() && self.time_sum > 0.0) {
            return Err(SeisError::invalid_config("time_sum must be positive"));
        }
        if !(self.azimuth_delta.is_finite()
            && self.azimuth_delta > 0.0
            && self.azimuth_delta <= 360.0)
        {
            return Err(SeisError::invalid_config(
                "azimuth_delta must be in the range (0, 360]",
            ));
        }
        Ok(())
    }
}

/// Parameters of [`remove_tilt`](crate::tilt::remove_tilt).
///
/// # Parameters
///
/// - `fmin`/`fmax`: optional band limits (Hz) of the coherence mask.
/// - `parallel`: tilt and acceleration axes parallel (`true`) or antiparallel.
/// - `threshold`: minimum coherence magnitude for the `coh` method.
/// - `smoothing_bandwidth`: Blackman smoothing width (Hz) for the spectral
///   estimates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TiltCorrectionConfig {
    /// Lower frequency limit of the correction band (Hz).
    pub fmin: Option<f64>,

    /// Upper frequency limit of the correction band (Hz).
    pub fmax: Option<f64>,

    /// Whether tilt and acceleration axes are parallel.
    pub parallel: bool,

    /// Correction is applied where `|coherence| >= threshold` (`coh` only).
    pub threshold: f64,

    /// Width of the Blackman smoothing window (Hz).
    pub smoothing_bandwidth: f64,

    /// Gravitational acceleration (m/s²).
    pub gravitational_acceleration: f64,

    /// Correction strategy.
    pub method: CorrectionMethod,
}

impl Default for TiltCorrectionConfig {
    fn default() -> Self {
        Self {
            fmin: None,
            fmax: None,
            parallel: true,
            threshold: 0.5,
            smoothing_bandwidth: 1.0,
            gravitational_acceleration: DEFAULT_GRAVITATIONAL_ACCELERATION,
            method: CorrectionMethod::Coh,
        }
    }
}

impl TiltCorrectionConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for the time-domain closed-form correction.
    #[must_use]
    pub fn direct() -> Self {
        Self {
            method: CorrectionMethod::Direct,
            ..Self::default()
        }
    }

    /// Preset for coherence-gated correction with the given threshold.
    #[must_use]
    pub fn coherence_gated(threshold: f64) -> Self {
        Self {
            method: CorrectionMethod::Coh,
            threshold,
            ..Self::default()
        }
    }

    /// Preset for correction with the empirical transfer function.
    #[must_use]
    pub fn empirical() -> Self {
        Self {
            method: CorrectionMethod::Freq,
            ..Self::default()
        }
    }

    /// Set the correction method.
    #[must_use]
    pub const fn with_method(mut self, method: CorrectionMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the band limits of the correction.
    #[must_use]
    pub const fn with_band(mut self, fmin: Option<f64>, fmax: Option<f64>) -> Self {
        self.fmin = fmin;
        self.fmax = fmax;
        self
    }

    /// Set the axis orientation flag.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the coherence threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the smoothing bandwidth.
    #[must_use]
    pub const fn with_smoothing_bandwidth(mut self, bandwidth: f64) -> Self {
        self.smoothing_bandwidth = bandwidth;
        self
    }

    /// Set the gravitational acceleration.
    #[must_use]
    pub const fn with_gravitational_acceleration(mut self, g: f64) -> Self {
        self.gravitational_acceleration = g;
        self
    }

    /// `+1` for parallel, `-1` for antiparallel axes.
    #[must_use]
    pub const fn sign(&self) -> f64 {
        if self.parallel {
            1.0
        } else {
            -1.0
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is non-finite, the smoothing
    /// bandwidth is negative or the band limits are inverted.
    pub fn validate(&self) -> Result<()> {
        if !self.gravitational_acceleration.is_finite() {
            return Err(SeisError::invalid_config(
                "gravitational_acceleration must be finite",
            ));
        }
        if !self.threshold.is_finite() {
            return Err(SeisError::invalid_config("threshold must be finite"));
        }
        if !(self.smoothing_bandwidth.is_finite() && self.smoothing_bandwidth >= 0.0) {
            return Err(SeisError::invalid_config(
                "smoothing_bandwidth must be non-negative",
            ));
        }
        for (name, limit) in [("fmin", self.fmin), ("fmax", self.fmax)] {
            if limit.is_some_and(|f| !f.is_finite()) {
                return Err(SeisError::invalid_config(format!("{name} must be finite")));
            }
        }
        if let (Some(fmin), Some(fmax)) = (self.fmin, self.fmax) {
            if fmin > fmax {
                return Err(SeisError::invalid_config(format!(
                    "fmin ({fmin}) must not exceed fmax ({fmax})"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = TiltCorrectionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.method, CorrectionMethod::Coh);
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.smoothing_bandwidth, 1.0);
        assert_eq!(config.gravitational_acceleration, 9.81);
        assert!(config.parallel);
        assert_eq!(config.sign(), 1.0);
    }

    #[test]
    fn test_presets() {
        assert_eq!(TiltCorrectionConfig::direct().method, CorrectionMethod::Direct);
        assert_eq!(TiltCorrectionConfig::empirical().method, CorrectionMethod::Freq);

        let gated = TiltCorrectionConfig::coherence_gated(0.8);
        assert_eq!(gated.method, CorrectionMethod::Coh);
        assert_eq!(gated.threshold, 0.8);
    }

    #[test]
    fn test_builder_pattern() {
        let config = TiltCorrectionConfig::new()
            .with_parallel(false)
            .with_band(Some(0.1), None)
            .with_smoothing_bandwidth(0.5);
        assert_eq!(config.sign(), -1.0);
        assert_eq!(config.fmin, Some(0.1));
        assert_eq!(config.fmax, None);
        assert_eq!(config.smoothing_bandwidth, 0.5);
    }

    #[test]
    fn test_tilt_validation() {
        let config = TiltCorrectionConfig::default().with_smoothing_bandwidth(-1.0);
        assert!(config.validate().is_err());

        let config = TiltCorrectionConfig::default().with_band(Some(2.0), Some(1.0));
        assert!(config.validate().is_err());

        let config = TiltCorrectionConfig::default().with_band(Some(f64::NAN), None);
        assert!(config.validate().is_err());

        // Thresholds above one are legal and simply disable the correction
        let config = TiltCorrectionConfig::coherence_gated(1.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gridsearch_validation() {
        let config = GridsearchConfig::new(40.0);
        assert_eq!(config.azimuth_delta, 5.0);
        assert!(config.validate().is_ok());

        assert!(GridsearchConfig::new(0.0).validate().is_err());
        assert!(GridsearchConfig::new(1.0)
            .with_azimuth_delta(0.0)
            .validate()
            .is_err());
        assert!(GridsearchConfig::new(1.0)
            .with_azimuth_delta(-5.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_method_parsing() {
        for method in [
            CorrectionMethod::Direct,
            CorrectionMethod::Coh,
            CorrectionMethod::Freq,
        ] {
            assert_eq!(method.to_string().parse::<CorrectionMethod>().unwrap(), method);
        }

        let err = "wiener".parse::<CorrectionMethod>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert!(err.to_string().contains("wiener"));
    }

    #[test]
    fn test_range_policy_parsing() {
        assert_eq!("floor".parse::<RangePolicy>().unwrap(), RangePolicy::Floor);
        assert_eq!(RangePolicy::default(), RangePolicy::Raise);
        assert!("truncate".parse::<RangePolicy>().is_err());
    }
}
