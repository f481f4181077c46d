//! Error types for trace handling, polarisation and tilt correction.
//!
//! Errors fall into three kinds (see [`ErrorKind`]): incompatible inputs,
//! estimation failures on well-formed inputs, and invalid configuration.
//! Numeric degeneracy (zero-energy windows, empty spectra) is not an error and
//! shows up as NaN or infinite values in results instead.

use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeisError {
    /// An empty trace collection was given.
    #[error("Need at least one trace")]
    NoTraces,

    /// Traces differ in sample count, sample type, sample interval or start time.
    #[error(
        "Given traces are incompatible. Unable to join multiple components into a \
         single 2D array. Sampling rate, start time, number of samples and data type \
         must match.\n{table}"
    )]
    IncompatibleTraces { table: String },

    /// Principal component analysis cannot be carried out on the input.
    #[error("PCA failed: {0}")]
    Pca(String),

    /// Spectral transfer function estimation cannot be carried out on the input.
    #[error("Transfer function estimation failed: {0}")]
    TransferFunction(String),

    /// `stop` is not reachable from `start` by whole multiples of `step`.
    #[error("inconsistent range specification: start={start}, stop={stop}, step={step}")]
    InconsistentRange { start: f64, stop: f64, step: f64 },

    /// Two inputs that must have equal length do not.
    #[error("Length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Parameter validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse, stable classification of [`SeisError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The inputs cannot be combined (length, rate, start time, sample type).
    Incompatibility,
    /// Inputs were well-formed but the estimate is undefined.
    EstimationFailure,
    /// Usage error detected before any numeric work.
    InvalidConfiguration,
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, SeisError>;

impl SeisError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoTraces | Self::IncompatibleTraces { .. } => ErrorKind::Incompatibility,
            Self::Pca(_) | Self::TransferFunction(_) => ErrorKind::EstimationFailure,
            Self::InconsistentRange { .. } | Self::LengthMismatch { .. } | Self::InvalidConfig(_) => {
                ErrorKind::InvalidConfiguration
            }
        }
    }

    /// Create a PCA failure.
    #[must_use]
    pub fn pca(msg: impl Into<String>) -> Self {
        Self::Pca(msg.into())
    }

    /// Create a transfer function estimation failure.
    #[must_use]
    pub fn transfer_function(msg: impl Into<String>) -> Self {
        Self::TransferFunction(msg.into())
    }

    /// Create an inconsistent range error.
    #[must_use]
    pub const fn inconsistent_range(start: f64, stop: f64, step: f64) -> Self {
        Self::InconsistentRange { start, stop, step }
    }

    /// Create a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
