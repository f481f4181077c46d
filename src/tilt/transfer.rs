//! Smoothed spectral estimate of the source-to-response transfer function.

use num_complex::Complex64;
use tracing::{debug, warn};

use crate::error::{Result, SeisError};
use crate::math::{blackman, convolve_same, padded_fft_len, rfft, rfft_len, rfftfreq};

/// Spectral estimates returned by [`transfer_function`], aligned by bin.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    /// Bin frequencies (Hz).
    pub frequencies: Vec<f64>,

    /// Autospectral density of the response signal, unsmoothed.
    pub response_psd: Vec<f64>,

    /// Autospectral density of the source signal, unsmoothed.
    pub source_psd: Vec<f64>,

    /// Source-to-response transfer function.
    pub transfer: Vec<Complex64>,

    /// Smoothed complex coherence between source and response.
    pub coherence: Vec<Complex64>,
}

impl TransferFunction {
    /// Number of frequency bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether there are no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Spacing of the frequency bins (Hz).
    #[must_use]
    pub fn frequency_bin_width(&self) -> Option<f64> {
        match self.frequencies.as_slice() {
            [f0, f1, ..] => Some(f1 - f0),
            _ => None,
        }
    }

    /// `|coherence|` per bin.
    #[must_use]
    pub fn coherence_magnitude(&self) -> Vec<f64> {
        self.coherence.iter().map(|c| c.norm()).collect()
    }

    /// Index of the bin closest to `target_freq`.
    #[must_use]
    pub fn find_frequency_index(&self, target_freq: f64) -> Option<usize> {
        self.frequencies
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (*a - target_freq)
                    .abs()
                    .total_cmp(&(*b - target_freq).abs())
            })
            .map(|(i, _)| i)
    }

    /// Transfer function and coherence, for reuse in
    /// [`remove_tilt`](crate::tilt::remove_tilt).
    #[must_use]
    pub fn transfer_coherence(&self) -> TransferCoherence {
        TransferCoherence {
            transfer: self.transfer.clone(),
            coherence: self.coherence.clone(),
        }
    }
}

/// Precomputed transfer function and complex coherence.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferCoherence {
    /// Source-to-response transfer function.
    pub transfer: Vec<Complex64>,

    /// Complex coherence between source and response.
    pub coherence: Vec<Complex64>,
}

impl TransferCoherence {
    /// Create from transfer function and coherence vectors.
    #[must_use]
    pub const fn new(transfer: Vec<Complex64>, coherence: Vec<Complex64>) -> Self {
        Self {
            transfer,
            coherence,
        }
    }
}

impl From<TransferFunction> for TransferCoherence {
    fn from(tf: TransferFunction) -> Self {
        Self {
            transfer: tf.transfer,
            coherence: tf.coherence,
        }
    }
}

/// Fail unless `response` and `source` have the same number of samples.
pub(crate) fn check_lengths(response: &[f64], source: &[f64]) -> Result<()> {
    if response.len() == source.len() {
        Ok(())
    } else {
        Err(SeisError::length_mismatch(response.len(), source.len()))
    }
}

pub(crate) fn check_sample_interval(sample_interval: f64) -> Result<()> {
    if sample_interval.is_finite() && sample_interval > 0.0 {
        Ok(())
    } else {
        Err(SeisError::invalid_config(format!(
            "sample interval must be positive, got {sample_interval}"
        )))
    }
}

fn smooth<T>(spectrum: &[T], window: Option<&[f64]>) -> Result<Vec<T>>
where
    T: Copy + Default + std::ops::AddAssign + std::ops::Mul<f64, Output = T>,
{
    match window {
        None => Ok(spectrum.to_vec()),
        Some(w) => convolve_same(spectrum, w).ok_or_else(|| {
            SeisError::transfer_function(format!(
                "smoothing window of {} bins does not fit {} frequency bins",
                w.len(),
                spectrum.len()
            ))
        }),
    }
}

/// Calculate the transfer function and complex coherence between two signals.
///
/// Both signals are zero-padded to twice the next power of two of their
/// length and transformed with a forward FFT scaled by `sample_interval`.
/// The cross-spectral density `Grs = Gr·conj(Gs)` and the autospectral
/// densities `Grr`, `Gss` are smoothed by convolution with a Blackman window
/// `smoothing_bandwidth` Hz wide. The complex coherence is
/// `Grs' / sqrt(Grr'·Gss')` of the smoothed densities and the transfer
/// function is `coherence · sqrt(Grr/Gss)` of the unsmoothed ones.
///
/// A bandwidth narrower than half a frequency bin disables smoothing.
///
/// # Errors
///
/// - [`SeisError::LengthMismatch`] if the signals differ in length.
/// - [`SeisError::InvalidConfig`] for a non-positive sample interval or a
///   negative bandwidth.
/// - [`SeisError::TransferFunction`] for empty signals or a smoothing window
///   wider than the spectrum.
pub fn transfer_function(
    response: &[f64],
    source: &[f64],
    sample_interval: f64,
    smoothing_bandwidth: f64,
) -> Result<TransferFunction> {
    check_lengths(response, source)?;
    check_sample_interval(sample_interval)?;
    if !(smoothing_bandwidth.is_finite() && smoothing_bandwidth >= 0.0) {
        return Err(SeisError::invalid_config(format!(
            "smoothing bandwidth must be non-negative, got {smoothing_bandwidth}"
        )));
    }
    if response.is_empty() {
        return Err(SeisError::transfer_function("signals contain no samples"));
    }

    let dt = sample_interval;
    let nfft = padded_fft_len(response.len());
    let nbins = rfft_len(nfft);

    let gr: Vec<Complex64> = rfft(response, nfft).into_iter().map(|c| c * dt).collect();
    let gs: Vec<Complex64> = rfft(source, nfft).into_iter().map(|c| c * dt).collect();
    let frequencies = rfftfreq(nfft, dt);

    let grs: Vec<Complex64> = gr.iter().zip(&gs).map(|(r, s)| r * s.conj()).collect();
    let grr: Vec<f64> = gr.iter().map(Complex64::norm_sqr).collect();
    let gss: Vec<f64> = gs.iter().map(Complex64::norm_sqr).collect();

    let df = 1.0 / (nfft as f64 * dt);
    let nsmooth = (smoothing_bandwidth / df).round_ties_even();
    debug!(n_samples = response.len(), nfft, nsmooth, "transfer_function");

    if nsmooth > nbins as f64 {
        return Err(SeisError::transfer_function(format!(
            "smoothing window of {nsmooth} bins ({smoothing_bandwidth} Hz) does not fit \
             {nbins} frequency bins"
        )));
    }
    let window = if nsmooth < 1.0 {
        warn!(
            smoothing_bandwidth,
            frequency_bin_width = df,
            "smoothing bandwidth below half a frequency bin, spectra are not smoothed"
        );
        None
    } else {
        Some(blackman(nsmooth as usize))
    };

    let grs_smooth = smooth(&grs, window.as_deref())?;
    let grr_smooth = smooth(&grr, window.as_deref())?;
    let gss_smooth = smooth(&gss, window.as_deref())?;

    let coherence: Vec<Complex64> = grs_smooth
        .iter()
        .zip(grr_smooth.iter().zip(&gss_smooth))
        .map(|(grs, (grr, gss))| grs / Complex64::new(grr * gss, 0.0).sqrt())
        .collect();

    let transfer: Vec<Complex64> = coherence
        .iter()
        .zip(grr.iter().zip(&gss))
        .map(|(coh, (grr, gss))| coh * (grr / gss).sqrt())
        .collect();

    Ok(TransferFunction {
        frequencies,
        response_psd: grr,
        source_psd: gss,
        transfer,
        coherence,
    })
}
