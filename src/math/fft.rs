//! Real-input FFT helpers on top of `rustfft`.
//!
//! The conventions follow the usual one-sided real transform: a real signal of
//! (padded) length `nfft` maps to `nfft/2 + 1` complex bins at frequencies
//! `k / (nfft * dt)`. Forward transforms are unnormalized, the inverse divides
//! by `nfft`.

use num_complex::Complex64;
use rustfft::FftPlanner;

/// FFT length used for spectral estimation of `n_samples` samples.
///
/// The signal is zero-padded to twice the next power of two so that the
/// implied circular correlation does not wrap around.
#[must_use]
pub fn padded_fft_len(n_samples: usize) -> usize {
    2 * n_samples.max(1).next_power_of_two()
}

/// Number of one-sided bins of a real transform of length `nfft`.
#[must_use]
pub const fn rfft_len(nfft: usize) -> usize {
    nfft / 2 + 1
}

/// Forward transform of `signal`, zero-padded (or truncated) to `nfft`.
///
/// Returns the `nfft/2 + 1` non-negative frequency bins.
#[must_use]
pub fn rfft(signal: &[f64], nfft: usize) -> Vec<Complex64> {
    if nfft == 0 {
        return Vec::new();
    }

    let mut buffer: Vec<Complex64> = signal
        .iter()
        .take(nfft)
        .map(|&x| Complex64::new(x, 0.0))
        .collect();
    buffer.resize(nfft, Complex64::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(nfft);
    fft.process(&mut buffer);

    buffer.truncate(rfft_len(nfft));
    buffer
}

/// Inverse of [`rfft`] for a transform of length `nfft`.
///
/// Missing bins are treated as zero. The imaginary parts of the DC and
/// (even `nfft`) Nyquist bins are ignored.
#[must_use]
pub fn irfft(spectrum: &[Complex64], nfft: usize) -> Vec<f64> {
    if nfft == 0 {
        return Vec::new();
    }

    let half = nfft / 2;
    let bin = |k: usize| spectrum.get(k).copied().unwrap_or_default();

    // Rebuild the Hermitian-symmetric full spectrum
    let mut buffer = vec![Complex64::new(0.0, 0.0); nfft];
    buffer[0] = Complex64::new(bin(0).re, 0.0);
    for k in 1..half {
        let c = bin(k);
        buffer[k] = c;
        buffer[nfft - k] = c.conj();
    }
    if half > 0 {
        buffer[half] = if nfft % 2 == 0 {
            Complex64::new(bin(half).re, 0.0)
        } else {
            bin(half)
        };
        if nfft % 2 == 1 {
            buffer[nfft - half] = bin(half).conj();
        }
    }

    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(nfft);
    ifft.process(&mut buffer);

    let norm_factor = nfft as f64;
    buffer.iter().map(|c| c.re / norm_factor).collect()
}

/// Bin frequencies of a real transform of length `nfft` with sampling
/// interval `dt`.
#[must_use]
pub fn rfftfreq(nfft: usize, dt: f64) -> Vec<f64> {
    if nfft == 0 {
        return Vec::new();
    }
    let df = 1.0 / (nfft as f64 * dt);
    (0..rfft_len(nfft)).map(|k| k as f64 * df).collect()
}
