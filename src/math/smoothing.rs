//! Blackman window and centred convolution for spectral smoothing.

use std::f64::consts::PI;
use std::ops::{AddAssign, Mul};

/// Blackman window of `m` points, symmetric, peak 1 in the middle.
///
/// `w[i] = 0.42 + 0.5 cos(pi x / (m-1)) + 0.08 cos(2 pi x / (m-1))` with
/// `x = 2i + 1 - m`. A single-point window is `[1.0]`.
#[must_use]
pub fn blackman(m: usize) -> Vec<f64> {
    match m {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (m - 1) as f64;
            (0..m)
                .map(|i| {
                    let x = (2 * i) as f64 + 1.0 - m as f64;
                    0.42 + 0.5 * (PI * x / denom).cos() + 0.08 * (2.0 * PI * x / denom).cos()
                })
                .collect()
        }
    }
}

/// Discrete convolution of `signal` with `kernel`, cropped to the length of
/// `signal` and centred so that output `j` is full-convolution index
/// `j + (kernel.len() - 1) / 2`.
///
/// Returns `None` if the kernel is empty or longer than the signal.
#[must_use]
pub fn convolve_same<T>(signal: &[T], kernel: &[f64]) -> Option<Vec<T>>
where
    T: Copy + Default + AddAssign + Mul<f64, Output = T>,
{
    let l = signal.len();
    let m = kernel.len();
    if m == 0 || m > l {
        return None;
    }

    let offset = (m - 1) / 2;
    let out = (0..l)
        .map(|j| {
            let k = j + offset;
            // Kernel taps whose signal index k - tap lies inside the signal
            let tap_lo = (k + 1).saturating_sub(l);
            let tap_hi = k.min(m - 1);
            let mut acc = T::default();
            for tap in tap_lo..=tap_hi {
                acc += signal[k - tap] * kernel[tap];
            }
            acc
        })
        .collect();
    Some(out)
}
