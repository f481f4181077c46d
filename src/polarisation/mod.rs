//! Direction estimation from multi-component recordings.
//!
//! - [`pca`](mod@pca): polarisation azimuth and incidence from the principal component
//! - [`gridsearch`]: SH/Love wave direction from rotation rate and acceleration

pub mod gridsearch;
pub mod pca;

pub use gridsearch::{gridsearch_azimuth_rot_acc, GridsearchResult};
pub use pca::{pca, PcaResult};

/// Signed difference `a - b` wrapped into `[-period/2, period/2)`.
///
/// Use `period = 180.0` to compare PCA azimuths, which carry a polarity
/// ambiguity, and `360.0` for directions.
#[must_use]
pub fn angle_difference(a: f64, b: f64, period: f64) -> f64 {
    let half = 0.5 * period;
    ((a - b) + half).rem_euclid(period) - half
}

/// Whether `a` and `b` are within `tolerance` of each other modulo `period`.
#[must_use]
pub fn is_close_angle(a: f64, b: f64, period: f64, tolerance: f64) -> bool {
    angle_difference(a, b, period).abs() <= tolerance
}
