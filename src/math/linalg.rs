//! Covariance and symmetric eigendecomposition.
//!
//! This module estimates the sample covariance of multi-component signals and
//! decomposes it with nalgebra's symmetric eigen solver.

use nalgebra::{DMatrix, DVector, SymmetricEigen};
use ndarray::{ArrayBase, Data, Ix2};

/// Iteration limit of the symmetric eigen solver.
const MAX_EIGEN_ITERATIONS: usize = 1000;

/// Eigenvalues and eigenvectors of a symmetric matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigensystem {
    /// Eigenvalues in ascending order.
    pub eigenvalues: DVector<f64>,

    /// Eigenvectors as columns, in the order of `eigenvalues`.
    pub eigenvectors: DMatrix<f64>,
}

impl Eigensystem {
    /// Eigenvector paired with the largest eigenvalue.
    #[must_use]
    pub fn dominant(&self) -> DVector<f64> {
        let last = self.eigenvectors.ncols().saturating_sub(1);
        self.eigenvectors.column(last).into_owned()
    }
}

/// Unbiased sample covariance of the rows of `data`.
///
/// Each row is one variable, each column one observation. The result is
/// normalized by `N - 1` and is non-finite for fewer than two observations.
#[must_use]
pub fn covariance<S>(data: &ArrayBase<S, Ix2>) -> DMatrix<f64>
where
    S: Data<Elem = f64>,
{
    let (n_vars, n_obs) = data.dim();
    let means: Vec<f64> = data
        .rows()
        .into_iter()
        .map(|row| row.sum() / n_obs as f64)
        .collect();

    let centered: Vec<Vec<f64>> = data
        .rows()
        .into_iter()
        .zip(means.iter())
        .map(|(row, &m)| row.iter().map(|&v| v - m).collect())
        .collect();

    let denom = n_obs as f64 - 1.0;
    let mut cov = DMatrix::zeros(n_vars, n_vars);
    for i in 0..n_vars {
        for j in i..n_vars {
            let s: f64 = centered[i]
                .iter()
                .zip(centered[j].iter())
                .map(|(a, b)| a * b)
                .sum();
            cov[(i, j)] = s / denom;
            cov[(j, i)] = cov[(i, j)];
        }
    }
    cov
}

/// Symmetric eigendecomposition with eigenvalues sorted ascending.
///
/// Returns `None` if the solver does not converge.
#[must_use]
pub fn symmetric_eigen(matrix: &DMatrix<f64>) -> Option<Eigensystem> {
    let n = matrix.nrows();
    let eigen = SymmetricEigen::try_new(matrix.clone(), f64::EPSILON, MAX_EIGEN_ITERATIONS)?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

    let eigenvalues = DVector::from_iterator(n, order.iter().map(|&k| eigen.eigenvalues[k]));
    let eigenvectors = DMatrix::from_fn(n, n, |row, col| eigen.eigenvectors[(row, order[col])]);

    Some(Eigensystem {
        eigenvalues,
        eigenvectors,
    })
}
