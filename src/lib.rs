//! Rotational Seismology Toolkit
//!
//! Polarisation analysis and tilt-noise removal for collocated rotational and
//! translational ground-motion recordings.
//!
//! This library provides:
//!
//! - **PCA**: azimuth and incidence of the dominant polarisation direction of
//!   2- or 3-component recordings
//! - **Azimuth gridsearch**: propagation direction of SH/Love waves over time
//!   from vertical rotation rate and horizontal acceleration
//! - **Tilt correction**: spectral transfer function and coherence estimates
//!   and three strategies to remove tilt from accelerometer records
//!
//! # Quick Start
//!
//! ```
//! use rotseis::{pca, Trace};
//!
//! let signal: Vec<f64> = (0..200).map(|i| (0.1 * f64::from(i)).sin()).collect();
//! let (sin, cos) = 30.0_f64.to_radians().sin_cos();
//!
//! let east = Trace::new(signal.iter().map(|s| s * sin).collect::<Vec<_>>(), 0.01, 0.0);
//! let north = Trace::new(signal.iter().map(|s| s * cos).collect::<Vec<_>>(), 0.01, 0.0);
//!
//! let result = pca(&[east, north])?;
//! assert!((result.azimuth - 30.0).abs() < 1e-6);
//! assert_eq!(result.incidence, 90.0);
//! # Ok::<(), rotseis::SeisError>(())
//! ```
//!
//! # Waveforms
//!
//! All multi-component operations accept any type implementing [`Waveform`]
//! and check that the components share sample count, sample type, sampling
//! interval and start time before computing anything.
//!
//! # Features
//!
//! | Feature | Effect |
//! |---------|--------|
//! | `parallel` | Per-azimuth loop of the gridsearch runs on rayon |
//! | `serde` | `Serialize`/`Deserialize` for configuration and traces |

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod error;
pub mod math;
pub mod polarisation;
pub mod tilt;
pub mod trace;

// Re-exports for convenient access
pub use config::{CorrectionMethod, GridsearchConfig, RangePolicy, TiltCorrectionConfig};
pub use error::{ErrorKind, Result, SeisError};
pub use math::{arange2, moving_sum, MovingSumMode};
pub use polarisation::{
    angle_difference, gridsearch_azimuth_rot_acc, is_close_angle, pca, GridsearchResult,
    PcaResult,
};
pub use tilt::{remove_tilt, transfer_function, TransferCoherence, TransferFunction};
pub use trace::{
    get_traces_data_as_array, stack_traces, ComponentMatrix, SampleType, Samples, Trace,
    TraceData, Waveform,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
