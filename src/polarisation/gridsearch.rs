//! Propagation direction of SH/Love waves from rotation rate and acceleration.
//!
//! For every candidate azimuth the horizontal acceleration is projected onto
//! the transverse direction and correlated with the vertical rotation rate in
//! a gliding window. The azimuth of maximum correlation at each sample is the
//! estimated propagation direction.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{GridsearchConfig, RangePolicy};
use crate::error::{Result, SeisError};
use crate::math::{arange2, moving_sum, MovingSumMode, DEFAULT_RANGE_EPSILON};
use crate::trace::{sample_times, stack_traces, Waveform};

const IROTZ: usize = 0;
const IACCN: usize = 1;
const IACCE: usize = 2;

/// Result of [`gridsearch_azimuth_rot_acc`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridsearchResult {
    /// Sample times (s).
    pub times: Vec<f64>,

    /// Azimuth grid (degrees).
    pub azimuths: Vec<f64>,

    /// Correlation surface as `correlations[[azimuth, sample]]`.
    pub correlations: Array2<f64>,

    /// Azimuth of maximum correlation per sample.
    pub max_azimuths: Vec<f64>,

    /// Maximum correlation per sample.
    pub max_correlations: Vec<f64>,
}

impl GridsearchResult {
    /// `(time, azimuth, correlation)` of the highest finite correlation in the
    /// record, `None` if no sample has a finite correlation.
    #[must_use]
    pub fn best_overall(&self) -> Option<(f64, f64, f64)> {
        self.max_correlations
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_finite())
            .fold(None, |best: Option<(usize, f64)>, (i, &c)| match best {
                Some((_, b)) if b >= c => best,
                _ => Some((i, c)),
            })
            .map(|(i, c)| (self.times[i], self.max_azimuths[i], c))
    }
}

/// Rotation-rate times transverse acceleration, and transverse acceleration
/// squared, for one candidate azimuth (degrees).
fn transverse_products(
    rot: ArrayView1<'_, f64>,
    acc_n: ArrayView1<'_, f64>,
    acc_e: ArrayView1<'_, f64>,
    azimuth: f64,
) -> (Array1<f64>, Array1<f64>) {
    let (sin, cos) = azimuth.to_radians().sin_cos();
    let acc_t = &acc_e * cos - &acc_n * sin;
    let cross = &rot * &acc_t;
    let energy = acc_t.mapv(|v| v * v);
    (cross, energy)
}

/// Index of the maximum; the first NaN wins, otherwise the first maximum.
fn argmax(values: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            return i;
        }
        if i == 0 || v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

/// Get the direction of SH/Love waves from rotational and acceleration
/// waveforms.
///
/// Components are expected in the order and polarity
/// `[rotation_rate_down, acceleration_north, acceleration_east]`, with equal
/// length, sampling rate, data type and start time. Windows with zero energy
/// yield non-finite correlations.
///
/// # Errors
///
/// - [`SeisError::InvalidConfig`] if the configuration is invalid, not exactly
///   three traces are given, or the window is shorter than one sample.
/// - [`SeisError::InconsistentRange`] if `azimuth_delta` does not divide 360.
/// - [`SeisError::NoTraces`] / [`SeisError::IncompatibleTraces`] if the traces
///   cannot be merged.
pub fn gridsearch_azimuth_rot_acc<W: Waveform>(
    traces: &[W],
    config: &GridsearchConfig,
) -> Result<GridsearchResult> {
    config.validate()?;
    if traces.len() != 3 {
        return Err(SeisError::invalid_config(format!(
            "need exactly 3 traces [rotation_rate_down, acceleration_north, acceleration_east], got {}",
            traces.len()
        )));
    }

    let stacked = stack_traces(traces)?;
    let data = &stacked.data;
    let n_samples = stacked.n_samples();
    let deltat = stacked.sample_interval;

    let azimuths = arange2(
        0.0,
        360.0 - config.azimuth_delta,
        config.azimuth_delta,
        DEFAULT_RANGE_EPSILON,
        RangePolicy::Raise,
    )?;

    let nsum = (config.time_sum / deltat).round_ties_even();
    if !nsum.is_finite() || nsum < 1.0 {
        return Err(SeisError::invalid_config(format!(
            "time_sum {} s is shorter than one sample (deltat {deltat} s)",
            config.time_sum
        )));
    }
    let nsum = nsum as usize;
    debug!(
        n_azimuths = azimuths.len(),
        n_samples, nsum, "gridsearch_azimuth_rot_acc"
    );

    let rot = data.row(IROTZ);
    let acc_n = data.row(IACCN);
    let acc_e = data.row(IACCE);

    #[cfg(feature = "parallel")]
    let rows: Vec<(Array1<f64>, Array1<f64>)> = azimuths
        .par_iter()
        .map(|&azimuth| transverse_products(rot, acc_n, acc_e, azimuth))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<(Array1<f64>, Array1<f64>)> = azimuths
        .iter()
        .map(|&azimuth| transverse_products(rot, acc_n, acc_e, azimuth))
        .collect();

    let mut cross = Array2::<f64>::zeros((azimuths.len(), n_samples));
    let mut energy = Array2::<f64>::zeros((azimuths.len(), n_samples));
    for (i, (c, e)) in rows.iter().enumerate() {
        cross.row_mut(i).assign(c);
        energy.row_mut(i).assign(e);
    }

    let scross = moving_sum(&cross, nsum, MovingSumMode::Same)?;
    let senergy = moving_sum(&energy, nsum, MovingSumMode::Same)?;
    let srot = moving_sum(&rot.mapv(|v| v * v), nsum, MovingSumMode::Same)?;

    let mut correlations = scross;
    for (mut row, erow) in correlations.rows_mut().into_iter().zip(senergy.rows()) {
        for ((c, &e), &r) in row.iter_mut().zip(erow.iter()).zip(srot.iter()) {
            *c /= e.sqrt() * r.sqrt();
        }
    }

    let mut max_azimuths = Vec::with_capacity(n_samples);
    let mut max_correlations = Vec::with_capacity(n_samples);
    for (t, column) in correlations.axis_iter(Axis(1)).enumerate() {
        let imax = argmax(column);
        max_azimuths.push(azimuths[imax]);
        max_correlations.push(correlations[[imax, t]]);
    }

    Ok(GridsearchResult {
        times: sample_times(stacked.start_time, deltat, n_samples),
        azimuths,
        correlations,
        max_azimuths,
        max_correlations,
    })
}
