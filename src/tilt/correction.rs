//! Removal of tilt-coupled noise from translational acceleration.

use num_complex::Complex64;
use tracing::debug;

use super::transfer::{check_lengths, check_sample_interval, transfer_function, TransferCoherence};
use crate::config::{CorrectionMethod, TiltCorrectionConfig};
use crate::error::{Result, SeisError};
use crate::math::{irfft, padded_fft_len, rfft, rfft_len, rfftfreq};

/// Whether bin frequency `f` lies inside the optional band.
fn in_band(f: f64, fmin: Option<f64>, fmax: Option<f64>) -> bool {
    fmin.map_or(true, |lo| f >= lo) && fmax.map_or(true, |hi| f <= hi)
}

/// Remove tilt noise from a translational accelerometer recording.
///
/// `response` is the acceleration (m/s²), `source` the collocated tilt
/// (rad), both sampled at `sample_interval` seconds. The strategy is chosen
/// by `config.method`:
///
/// - [`CorrectionMethod::Direct`]: `response - sign·g·sin(source)` in the
///   time domain.
/// - [`CorrectionMethod::Coh`]: the theoretical coupling `sign·g` applied in
///   the frequency domain on bins where `|coherence| >= threshold` and inside
///   `[fmin, fmax]`.
/// - [`CorrectionMethod::Freq`]: the empirical transfer function applied on
///   all bins.
///
/// `sign` is `+1` for parallel and `-1` for antiparallel axes. The frequency
/// domain methods use the transfer function and coherence from `precomputed`
/// when given, otherwise they are estimated with
/// [`transfer_function`](super::transfer_function). Precomputed vectors must
/// cover the same zero-padded spectrum, `padded_fft_len(n) / 2 + 1` bins.
///
/// # Errors
///
/// - [`SeisError::LengthMismatch`] if `response` and `source` differ in length.
/// - [`SeisError::InvalidConfig`] for an invalid configuration or sample
///   interval, or precomputed vectors of the wrong length.
/// - [`SeisError::TransferFunction`] if the transfer function cannot be
///   estimated.
pub fn remove_tilt(
    response: &[f64],
    source: &[f64],
    sample_interval: f64,
    config: &TiltCorrectionConfig,
    precomputed: Option<&TransferCoherence>,
) -> Result<Vec<f64>> {
    check_lengths(response, source)?;
    config.validate()?;

    let sign = config.sign();
    let g = config.gravitational_acceleration;

    if config.method == CorrectionMethod::Direct {
        return Ok(response
            .iter()
            .zip(source)
            .map(|(r, s)| r - sign * g * s.sin())
            .collect());
    }

    check_sample_interval(sample_interval)?;
    let ndat = response.len();
    let nfft = padded_fft_len(ndat);
    let nbins = rfft_len(nfft);
    debug!(ndat, nfft, method = %config.method, "remove_tilt");

    let estimated;
    let trans_coh = if let Some(tc) = precomputed {
        tc
    } else {
        estimated = TransferCoherence::from(transfer_function(
            response,
            source,
            sample_interval,
            config.smoothing_bandwidth,
        )?);
        &estimated
    };

    if trans_coh.transfer.len() != nbins || trans_coh.coherence.len() != nbins {
        return Err(SeisError::invalid_config(format!(
            "precomputed transfer function ({}) and coherence ({}) must have {nbins} bins",
            trans_coh.transfer.len(),
            trans_coh.coherence.len()
        )));
    }

    let gr = rfft(response, nfft);
    let gs = rfft(source, nfft);

    let corrected: Vec<Complex64> = if config.method == CorrectionMethod::Coh {
        let freq = rfftfreq(nfft, sample_interval);
        gr.iter()
            .zip(&gs)
            .zip(trans_coh.coherence.iter().zip(&freq))
            .map(|((r, s), (coh, &f))| {
                let significant =
                    coh.norm() >= config.threshold && in_band(f, config.fmin, config.fmax);
                let mask = if significant { 1.0 } else { 0.0 };
                r - s * (sign * g * mask)
            })
            .collect()
    } else {
        gr.iter()
            .zip(&gs)
            .zip(&trans_coh.transfer)
            .map(|((r, s), ars)| r - ars.conj() * s * sign)
            .collect()
    };

    let mut out = irfft(&corrected, nfft);
    out.truncate(ndat);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const DT: f64 = 0.05;

    fn tilt(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 * DT;
                1e-6 * ((2.0 * PI * 0.07 * t).sin() + 0.4 * (2.0 * PI * 0.31 * t + 0.3).sin())
                    + 2e-7 * (2.0 * PI * (0.02 + 0.01 * t) * t).cos()
            })
            .collect()
    }

    fn assert_all_close(a: &[f64], b: &[f64], epsilon: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert_relative_eq!(*x, *y, epsilon = epsilon);
        }
    }

    #[test]
    fn test_in_band() {
        assert!(in_band(1.0, None, None));
        assert!(in_band(1.0, Some(1.0), Some(1.0)));
        assert!(!in_band(0.5, Some(1.0), None));
        assert!(!in_band(2.0, None, Some(1.5)));
    }

    #[test]
    fn test_direct_zero_tilt_unchanged() {
        let response: Vec<f64> = (0..100).map(|i| (f64::from(i) * 0.1).cos()).collect();
        let out = remove_tilt(&response, &[0.0; 100], DT, &TiltCorrectionConfig::direct(), None)
            .unwrap();
        assert_eq!(out, response);
    }

    #[test]
    fn test_direct_sign() {
        let source = tilt(200);
        let response: Vec<f64> = source.iter().map(|s| 9.81 * s.sin()).collect();

        let out = remove_tilt(&response, &source, DT, &TiltCorrectionConfig::direct(), None)
            .unwrap();
        assert_all_close(&out, &vec![0.0; 200], 1e-20);

        let config = TiltCorrectionConfig::direct().with_parallel(false);
        let out = remove_tilt(&response, &source, DT, &config, None).unwrap();
        let doubled: Vec<f64> = response.iter().map(|r| 2.0 * r).collect();
        assert_all_close(&out, &doubled, 1e-18);
    }

    #[test]
    fn test_coh_threshold_above_one_is_identity() {
        let source = tilt(500);
        let response: Vec<f64> = source
            .iter()
            .enumerate()
            .map(|(i, s)| 9.81 * s + 1e-7 * (i as f64 * 0.9).sin())
            .collect();
        let config = TiltCorrectionConfig::coherence_gated(1.1);
        let out = remove_tilt(&response, &source, DT, &config, None).unwrap();
        assert_all_close(&out, &response, 1e-18);
    }

    #[test]
    fn test_coh_removes_coherent_tilt() {
        let source = tilt(500);
        let response: Vec<f64> = source.iter().map(|s| 9.81 * s).collect();
        let config = TiltCorrectionConfig::coherence_gated(0.0);
        let out = remove_tilt(&response, &source, DT, &config, None).unwrap();
        assert_all_close(&out, &vec![0.0; 500], 1e-18);
    }

    #[test]
    fn test_coh_band_outside_spectrum_is_identity() {
        let source = tilt(300);
        let response: Vec<f64> = source.iter().map(|s| 9.81 * s).collect();
        let config = TiltCorrectionConfig::coherence_gated(0.0).with_band(Some(100.0), None);
        let out = remove_tilt(&response, &source, DT, &config, None).unwrap();
        assert_all_close(&out, &response, 1e-18);
    }

    #[test]
    fn test_freq_removes_scaled_tilt() {
        let source = tilt(400);
        let response: Vec<f64> = source.iter().map(|s| 3.0 * s).collect();
        let config = TiltCorrectionConfig::empirical().with_smoothing_bandwidth(0.2);
        let out = remove_tilt(&response, &source, DT, &config, None).unwrap();
        assert_all_close(&out, &vec![0.0; 400], 1e-16);
    }

    #[test]
    fn test_precomputed_matches_internal_estimate() {
        let source = tilt(256);
        let response: Vec<f64> = source
            .iter()
            .enumerate()
            .map(|(i, s)| 2.0 * s + 1e-7 * (i as f64 * 1.3).cos())
            .collect();
        let config = TiltCorrectionConfig::empirical();
        let tc = transfer_function(&response, &source, DT, config.smoothing_bandwidth)
            .unwrap()
            .transfer_coherence();

        let a = remove_tilt(&response, &source, DT, &config, None).unwrap();
        let b = remove_tilt(&response, &source, DT, &config, Some(&tc)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_precomputed_shape_mismatch() {
        let source = tilt(100);
        let tc = TransferCoherence::new(
            vec![Complex64::new(1.0, 0.0); 10],
            vec![Complex64::new(1.0, 0.0); 10],
        );
        let err = remove_tilt(&source, &source, DT, &TiltCorrectionConfig::new(), Some(&tc))
            .unwrap_err();
        assert!(matches!(err, SeisError::InvalidConfig(_)));
    }

    #[test]
    fn test_length_mismatch() {
        let err = remove_tilt(&[1.0, 2.0], &[1.0], DT, &TiltCorrectionConfig::direct(), None)
            .unwrap_err();
        assert_eq!(
            err,
            SeisError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_invalid_config() {
        let source = tilt(100);
        let config = TiltCorrectionConfig::new().with_band(Some(2.0), Some(1.0));
        let err = remove_tilt(&source, &source, DT, &config, None).unwrap_err();
        assert!(matches!(err, SeisError::InvalidConfig(_)));
    }
}
