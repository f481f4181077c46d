//! Principal component analysis of 2- or 3-component recordings.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{Result, SeisError};
use crate::math::linalg::{covariance, symmetric_eigen};
use crate::trace::{stack_traces, Waveform};

/// Result of [`pca`].
#[derive(Debug, Clone, PartialEq)]
pub struct PcaResult {
    /// Covariance matrix of the components.
    pub covariance: DMatrix<f64>,

    /// Eigenvalues of the covariance, ascending.
    pub eigenvalues: DVector<f64>,

    /// Eigenvectors as columns, in the order of `eigenvalues`.
    pub eigenvectors: DMatrix<f64>,

    /// Horizontal direction of the principal component, clockwise from
    /// north, in `[0, 180)` degrees.
    pub azimuth: f64,

    /// Angle of the principal component from vertical, in `[0, 90]` degrees.
    /// Exactly 90 when no vertical component was given.
    pub incidence: f64,
}

impl PcaResult {
    /// First principal component (eigenvector of the largest eigenvalue).
    #[must_use]
    pub fn principal_component(&self) -> DVector<f64> {
        let last = self.eigenvectors.ncols() - 1;
        self.eigenvectors.column(last).into_owned()
    }

    /// `1 - λ₂/λ₁` of the two largest eigenvalues: 1 for perfectly linear
    /// polarisation, 0 when the two leading directions carry equal energy.
    #[must_use]
    pub fn polarisation_degree(&self) -> f64 {
        let n = self.eigenvalues.len();
        1.0 - self.eigenvalues[n - 2] / self.eigenvalues[n - 1]
    }
}

/// Map a mathematical angle (counter-clockwise from east) of a direction with
/// ±180° polarity ambiguity to a compass azimuth in `[0, 180)`.
fn compass_axis_azimuth(math_angle_deg: f64) -> f64 {
    let azimuth = ((90.0 - math_angle_deg) + 180.0).rem_euclid(360.0) - 180.0;
    let azimuth = azimuth.rem_euclid(180.0);
    // rem_euclid may round up to the modulus for tiny negative inputs
    if azimuth >= 180.0 {
        0.0
    } else {
        azimuth
    }
}

/// Perform principal component analysis of a 2- or 3-component signal.
///
/// Components are expected in the order and polarity `[east, north]` or
/// `[east, north, up]`. The covariance of the components and its eigensystem
/// are estimated, and the direction of the first principal component is
/// expressed as azimuth and incidence angle. The polarity of the polarisation
/// direction cannot be determined from PCA alone, hence the azimuth is
/// wrapped to `[0, 180)`.
///
/// # Errors
///
/// - [`SeisError::NoTraces`] / [`SeisError::IncompatibleTraces`] if the input
///   traces cannot be merged.
/// - [`SeisError::Pca`] if fewer than 2 or more than 3 components, fewer than
///   two samples, or a non-finite covariance is given, or if the eigen solver
///   does not converge.
pub fn pca<W: Waveform>(traces: &[W]) -> Result<PcaResult> {
    let stacked = stack_traces(traces)?;
    let (n_components, n_samples) = stacked.data.dim();
    debug!(n_components, n_samples, "pca");

    if !(2..=3).contains(&n_components) {
        return Err(SeisError::pca(format!(
            "need 2 or 3 components ([east, north] or [east, north, up]), got {n_components}"
        )));
    }
    if n_samples < 2 {
        return Err(SeisError::pca(format!(
            "need at least 2 samples to estimate covariance, got {n_samples}"
        )));
    }

    let cov = covariance(&stacked.data);
    if cov.iter().any(|v| !v.is_finite()) {
        return Err(SeisError::pca("covariance matrix is not finite"));
    }

    let eigen = symmetric_eigen(&cov)
        .ok_or_else(|| SeisError::pca("eigendecomposition did not converge"))?;

    let pc = eigen.dominant();
    let eh = pc[0].hypot(pc[1]);
    let incidence = if n_components > 2 {
        eh.atan2(pc[2].abs()).to_degrees()
    } else {
        90.0
    };

    let azimuth = compass_axis_azimuth(pc[1].atan2(pc[0]).to_degrees());

    Ok(PcaResult {
        covariance: cov,
        eigenvalues: eigen.eigenvalues,
        eigenvectors: eigen.eigenvectors,
        azimuth,
        incidence,
    })
}
