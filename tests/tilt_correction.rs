//! Tilt-noise removal on synthetic accelerometer records.
//!
//! A weak ground acceleration is contaminated with the gravitational
//! projection of a much stronger, narrow-band tilt signal; each correction
//! method must recover the ground acceleration.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use rotseis::tilt::TransferFunction;
use rotseis::{remove_tilt, transfer_function, CorrectionMethod, TiltCorrectionConfig};
use std::f64::consts::PI;

const DT: f64 = 0.1;
const N: usize = 4096;
const G: f64 = 9.81;

// =============================================================================
// SIGNAL GENERATORS
// =============================================================================

/// Sum of five sinusoids between 0.05 and 0.3 Hz, about 1 µrad each.
fn tilt_signal(rng: &mut ChaCha8Rng) -> Vec<f64> {
    let components: Vec<(f64, f64)> = (0..5)
        .map(|_| (rng.gen_range(0.05..0.3), rng.gen_range(0.0..2.0 * PI)))
        .collect();

    (0..N)
        .map(|i| {
            let t = i as f64 * DT;
            components
                .iter()
                .map(|(f, phase)| 1e-6 * (2.0 * PI * f * t + phase).sin())
                .sum()
        })
        .collect()
}

/// White ground acceleration (m/s²).
fn ground_signal(rng: &mut ChaCha8Rng, sigma: f64) -> Vec<f64> {
    (0..N)
        .map(|_| sigma * rng.sample::<f64, _>(StandardNormal))
        .collect()
}

/// Tilt, ground acceleration, and the recorded acceleration.
fn scenario(seed: u64, sign: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let tilt = tilt_signal(&mut rng);
    let ground = ground_signal(&mut rng, 1e-7);
    let recorded = ground
        .iter()
        .zip(&tilt)
        .map(|(a, t)| a + sign * G * t)
        .collect();
    (tilt, ground, recorded)
}

fn rms(x: &[f64]) -> f64 {
    (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt()
}

fn rms_diff(a: &[f64], b: &[f64]) -> f64 {
    let diff: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    rms(&diff)
}

// =============================================================================
// CORRECTION METHODS
// =============================================================================

#[test]
fn test_direct_recovers_ground_motion() {
    let (tilt, ground, _) = scenario(1, 1.0);
    let recorded: Vec<f64> = ground
        .iter()
        .zip(&tilt)
        .map(|(a, t)| a + G * t.sin())
        .collect();

    let corrected =
        remove_tilt(&recorded, &tilt, DT, &TiltCorrectionConfig::direct(), None).unwrap();
    assert!(rms_diff(&corrected, &ground) < 1e-18);
}

#[test]
fn test_coherence_gated_removes_tilt() {
    let (tilt, ground, recorded) = scenario(2, 1.0);
    let tilt_rms = rms(&recorded);

    let corrected =
        remove_tilt(&recorded, &tilt, DT, &TiltCorrectionConfig::default(), None).unwrap();
    assert_eq!(corrected.len(), N);
    assert!(
        rms_diff(&corrected, &ground) < 0.05 * tilt_rms,
        "residual {} vs tilt {}",
        rms_diff(&corrected, &ground),
        tilt_rms
    );
}

#[test]
fn test_empirical_transfer_removes_tilt() {
    let (tilt, ground, recorded) = scenario(3, 1.0);
    let tilt_rms = rms(&recorded);

    let corrected =
        remove_tilt(&recorded, &tilt, DT, &TiltCorrectionConfig::empirical(), None).unwrap();
    assert!(rms_diff(&corrected, &ground) < 0.1 * tilt_rms);
}

#[test]
fn test_antiparallel_axes() {
    let (tilt, ground, recorded) = scenario(4, -1.0);
    let tilt_rms = rms(&recorded);

    let config = TiltCorrectionConfig::default()
        .with_method(CorrectionMethod::Coh)
        .with_parallel(false);
    let corrected = remove_tilt(&recorded, &tilt, DT, &config, None).unwrap();
    assert!(rms_diff(&corrected, &ground) < 0.05 * tilt_rms);

    // Assuming parallel axes adds the tilt a second time
    let wrong = remove_tilt(&recorded, &tilt, DT, &config.with_parallel(true), None).unwrap();
    assert!(rms_diff(&wrong, &ground) > tilt_rms);
}

#[test]
fn test_band_above_nyquist_leaves_record_unchanged() {
    let (tilt, _, recorded) = scenario(5, 1.0);
    let config = TiltCorrectionConfig::coherence_gated(0.0).with_band(Some(10.0), None);

    let corrected = remove_tilt(&recorded, &tilt, DT, &config, None).unwrap();
    assert!(rms_diff(&corrected, &recorded) < 1e-12 * rms(&recorded));
}

#[test]
fn test_threshold_above_one_leaves_record_unchanged() {
    let (tilt, _, recorded) = scenario(6, 1.0);
    let config = TiltCorrectionConfig::coherence_gated(1.1);

    let corrected = remove_tilt(&recorded, &tilt, DT, &config, None).unwrap();
    assert!(rms_diff(&corrected, &recorded) < 1e-12 * rms(&recorded));
}

// =============================================================================
// TRANSFER FUNCTION
// =============================================================================

#[test]
fn test_transfer_function_in_tilt_band() {
    let (tilt, _, recorded) = scenario(7, 1.0);
    let tf: TransferFunction = transfer_function(&recorded, &tilt, DT, 0.05).unwrap();

    // nfft = 2 * 4096
    assert_eq!(tf.len(), 4097);
    let df = tf.frequency_bin_width().unwrap();
    assert!((df - 1.0 / (8192.0 * DT)).abs() < 1e-15);

    // Strongest tilt line
    let peak = tf
        .source_psd
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    let k = tf.find_frequency_index(tf.frequencies[peak]).unwrap();
    assert_eq!(k, peak);
    assert!((0.04..0.31).contains(&tf.frequencies[k]));

    let coherence = tf.coherence_magnitude();
    assert!(coherence[k] > 0.99, "coherence {}", coherence[k]);
    assert!((tf.transfer[k].re - G).abs() < 0.01 * G);
    assert!(tf.transfer[k].im.abs() < 0.01 * G);
}

#[test]
fn test_precomputed_transfer_is_reused() {
    let (tilt, _, recorded) = scenario(8, 1.0);
    let config = TiltCorrectionConfig::empirical().with_smoothing_bandwidth(0.2);
    let tc = transfer_function(&recorded, &tilt, DT, config.smoothing_bandwidth)
        .unwrap()
        .transfer_coherence();

    let internal = remove_tilt(&recorded, &tilt, DT, &config, None).unwrap();
    let reused = remove_tilt(&recorded, &tilt, DT, &config, Some(&tc)).unwrap();
    assert_eq!(internal, reused);
}
