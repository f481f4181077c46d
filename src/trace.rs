//! Framework-agnostic waveform access and multi-component stacking.
//!
//! Any waveform container can take part in the analysis by implementing the
//! narrow [`Waveform`] capability trait. [`Trace`] is a simple owned
//! implementation. [`stack_traces`] validates that a set of waveforms is
//! compatible and merges them into a component-major 2D array.

use std::fmt::{self, Write as _};

use ndarray::Array2;

use crate::error::{Result, SeisError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric type of the stored samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleType {
    /// 32-bit signed integer counts.
    I32,
    /// 64-bit signed integer counts.
    I64,
    /// Single precision floating point.
    F32,
    /// Double precision floating point.
    F64,
}

impl SampleType {
    /// Conventional name of the sample type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Borrowed view of a waveform's samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Samples<'a> {
    I32(&'a [i32]),
    I64(&'a [i64]),
    F32(&'a [f32]),
    F64(&'a [f64]),
}

impl Samples<'_> {
    /// Number of samples.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::I32(s) => s.len(),
            Self::I64(s) => s.len(),
            Self::F32(s) => s.len(),
            Self::F64(s) => s.len(),
        }
    }

    /// Whether there are no samples.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample type of the view.
    #[must_use]
    pub const fn sample_type(&self) -> SampleType {
        match self {
            Self::I32(_) => SampleType::I32,
            Self::I64(_) => SampleType::I64,
            Self::F32(_) => SampleType::F32,
            Self::F64(_) => SampleType::F64,
        }
    }

    /// Iterate over the samples converted to `f64`.
    pub fn iter_f64(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match *self {
            Self::I32(s) => Box::new(s.iter().map(|&v| f64::from(v))),
            Self::I64(s) => Box::new(s.iter().map(|&v| v as f64)),
            Self::F32(s) => Box::new(s.iter().map(|&v| f64::from(v))),
            Self::F64(s) => Box::new(s.iter().copied()),
        }
    }

    /// Copy the samples into a new `f64` vector.
    #[must_use]
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.iter_f64().collect()
    }
}

/// Capability interface of a single-component waveform.
///
/// Implement this for the trace type of whatever waveform framework supplies
/// the data.
pub trait Waveform {
    /// Sample values.
    fn samples(&self) -> Samples<'_>;

    /// Sampling interval (s).
    fn sample_interval(&self) -> f64;

    /// Time of the first sample (s, arbitrary but consistent epoch).
    fn start_time(&self) -> f64;
}

impl<T: Waveform + ?Sized> Waveform for &T {
    fn samples(&self) -> Samples<'_> {
        (**self).samples()
    }

    fn sample_interval(&self) -> f64 {
        (**self).sample_interval()
    }

    fn start_time(&self) -> f64 {
        (**self).start_time()
    }
}

/// Owned sample storage of a [`Trace`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TraceData {
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl TraceData {
    /// Borrow the samples.
    #[must_use]
    pub fn as_samples(&self) -> Samples<'_> {
        match self {
            Self::I32(v) => Samples::I32(v),
            Self::I64(v) => Samples::I64(v),
            Self::F32(v) => Samples::F32(v),
            Self::F64(v) => Samples::F64(v),
        }
    }
}

impl From<Vec<i32>> for TraceData {
    fn from(v: Vec<i32>) -> Self {
        Self::I32(v)
    }
}

impl From<Vec<i64>> for TraceData {
    fn from(v: Vec<i64>) -> Self {
        Self::I64(v)
    }
}

impl From<Vec<f32>> for TraceData {
    fn from(v: Vec<f32>) -> Self {
        Self::F32(v)
    }
}

impl From<Vec<f64>> for TraceData {
    fn from(v: Vec<f64>) -> Self {
        Self::F64(v)
    }
}

/// Owned, evenly sampled single-component waveform.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trace {
    data: TraceData,
    sample_interval: f64,
    start_time: f64,
}

impl Trace {
    /// Create a trace from samples, sampling interval (s) and start time (s).
    #[must_use]
    pub fn new(data: impl Into<TraceData>, sample_interval: f64, start_time: f64) -> Self {
        Self {
            data: data.into(),
            sample_interval,
            start_time,
        }
    }

    /// Owned sample storage.
    #[must_use]
    pub const fn data(&self) -> &TraceData {
        &self.data
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples().len()
    }

    /// Whether the trace has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Time of the last sample. Equal to the start time for empty traces.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        let n = self.len().saturating_sub(1);
        self.start_time + n as f64 * self.sample_interval
    }

    /// Sample times.
    #[must_use]
    pub fn times(&self) -> Vec<f64> {
        sample_times(self.start_time, self.sample_interval, self.len())
    }
}

impl Waveform for Trace {
    fn samples(&self) -> Samples<'_> {
        self.data.as_samples()
    }

    fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    fn start_time(&self) -> f64 {
        self.start_time
    }
}

/// `start + i * interval` for `i` in `0..n`.
#[must_use]
pub fn sample_times(start: f64, interval: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + i as f64 * interval).collect()
}

/// Compatible waveforms merged into a single array.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentMatrix {
    /// Samples as `data[[component, sample]]`, rows in input order.
    pub data: Array2<f64>,

    /// Common sampling interval (s).
    pub sample_interval: f64,

    /// Common start time (s).
    pub start_time: f64,

    /// Common sample type of the inputs.
    pub sample_type: SampleType,
}

impl ComponentMatrix {
    /// Number of components (rows).
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.data.nrows()
    }

    /// Number of samples per component (columns).
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.data.ncols()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TraceParams {
    n_samples: usize,
    sample_type: SampleType,
    sample_interval: f64,
    start_time: f64,
}

impl TraceParams {
    fn of<W: Waveform + ?Sized>(trace: &W) -> Self {
        let samples = trace.samples();
        Self {
            n_samples: samples.len(),
            sample_type: samples.sample_type(),
            sample_interval: trace.sample_interval(),
            start_time: trace.start_time(),
        }
    }
}

fn params_table(params: &[TraceParams]) -> String {
    let mut table = format!(
        "  {:>10} {:<10} {:>12} {:>22}",
        "samples", "dtype", "deltat", "tmin"
    );
    for p in params {
        // Writing into a String cannot fail.
        let _ = write!(
            table,
            "\n  {:>10} {:<10} {:>12.5e} {:>22.16e}",
            p.n_samples, p.sample_type, p.sample_interval, p.start_time
        );
    }
    table
}

/// Validate and merge waveforms into a [`ComponentMatrix`].
///
/// # Errors
///
/// - [`SeisError::NoTraces`] if `traces` is empty.
/// - [`SeisError::IncompatibleTraces`] if sample count, sample type, sampling
///   interval or start time differ between traces. The message lists these
///   parameters for every trace.
pub fn stack_traces<W: Waveform>(traces: &[W]) -> Result<ComponentMatrix> {
    let first = traces.first().ok_or(SeisError::NoTraces)?;

    let params: Vec<TraceParams> = traces.iter().map(TraceParams::of).collect();
    if params.iter().any(|p| *p != params[0]) {
        return Err(SeisError::IncompatibleTraces {
            table: params_table(&params),
        });
    }

    let n_components = traces.len();
    let n_samples = params[0].n_samples;
    let mut flat = Vec::with_capacity(n_components * n_samples);
    for trace in traces {
        flat.extend(trace.samples().iter_f64());
    }

    let data = Array2::from_shape_vec((n_components, n_samples), flat)
        .map_err(|e| SeisError::invalid_config(format!("cannot shape component matrix: {e}")))?;

    Ok(ComponentMatrix {
        data,
        sample_interval: first.sample_interval(),
        start_time: first.start_time(),
        sample_type: params[0].sample_type,
    })
}

/// Merge data samples from multiple waveforms into a 2D array
/// `data[[itrace, isample]]`.
///
/// # Errors
///
/// See [`stack_traces`].
pub fn get_traces_data_as_array<W: Waveform>(traces: &[W]) -> Result<Array2<f64>> {
    stack_traces(traces).map(|stacked| stacked.data)
}
