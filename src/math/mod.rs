//! Numeric building blocks.
//!
//! This module provides:
//! - [`range`]: evenly spaced grids with endpoint checking
//! - [`moving_sum`](mod@moving_sum): prefix-sum windowed sums along the last axis
//! - [`fft`]: real-input FFT helpers
//! - [`linalg`]: covariance and symmetric eigendecomposition
//! - [`smoothing`]: Blackman window and centred convolution

pub mod fft;
pub mod linalg;
pub mod moving_sum;
pub mod range;
pub mod smoothing;

pub use fft::{irfft, padded_fft_len, rfft, rfft_len, rfftfreq};
pub use linalg::{covariance, symmetric_eigen, Eigensystem};
pub use moving_sum::{moving_sum, MovingSumMode};
pub use range::{arange2, DEFAULT_RANGE_EPSILON};
pub use smoothing::{blackman, convolve_same};
