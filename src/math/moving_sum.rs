//! Windowed sums along the last axis via prefix sums.
//!
//! All modes derive from the cumulative sum `C` of each lane (with `C(j) = 0`
//! for `j < 0`). For a window of length `n` over a lane of length `N`:
//!
//! - `full[k] = C(min(k, N-1)) - C(k-n)`, `k` in `0..N+n-1`
//! - `valid[i] = full[i + n - 1]`, `i` in `0..max(0, N-n+1)`
//! - `same[i] = full[i + (n-1)/2]`, `i` in `0..N`
//!
//! Each output value is a single prefix-sum difference, so the cost is linear
//! in the number of elements for any window length, including `n > N`.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array, ArrayBase, Axis, Data, Dimension};

use crate::error::{Result, SeisError};

/// Boundary handling of [`moving_sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovingSumMode {
    /// Only windows fully inside the input.
    #[default]
    Valid,
    /// Every window overlapping the input, ramping up and down at the edges.
    Full,
    /// Output aligned with the input, window centred with `(n-1)/2` samples
    /// of left context.
    Same,
}

impl MovingSumMode {
    /// Output length for an input lane of length `n_in` and window `window`.
    #[must_use]
    pub fn output_len(self, n_in: usize, window: usize) -> usize {
        match self {
            Self::Valid => (n_in + 1).saturating_sub(window),
            Self::Full => n_in + window - 1,
            Self::Same => n_in,
        }
    }

    /// Index into the `full` output of output element 0.
    const fn full_offset(self, window: usize) -> usize {
        match self {
            Self::Valid => window - 1,
            Self::Full => 0,
            Self::Same => (window - 1) / 2,
        }
    }
}

impl fmt::Display for MovingSumMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Valid => "valid",
            Self::Full => "full",
            Self::Same => "same",
        })
    }
}

impl FromStr for MovingSumMode {
    type Err = SeisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "valid" => Ok(Self::Valid),
            "full" => Ok(Self::Full),
            "same" => Ok(Self::Same),
            other => Err(SeisError::invalid_config(format!(
                "Invalid moving sum mode: {other} (expected one of: valid, full, same)"
            ))),
        }
    }
}

/// Prefix sums of a lane.
fn cumsum(lane: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut acc = 0.0;
    lane.map(|v| {
        acc += v;
        acc
    })
    .collect()
}

/// Sum of the `full`-mode window ending at index `k`.
#[inline]
fn full_window_sum(cx: &[f64], k: usize, window: usize) -> f64 {
    let Some(last) = cx.len().checked_sub(1) else {
        return 0.0;
    };
    let head = cx[k.min(last)];
    match k.checked_sub(window) {
        Some(j) => head - cx[j],
        None => head,
    }
}

/// Moving sum of `window` consecutive samples along the last axis of `x`.
///
/// The output has the shape of `x` except for the last axis, whose length is
/// given by [`MovingSumMode::output_len`].
///
/// # Errors
///
/// Returns [`SeisError::InvalidConfig`] if `window` is zero or `x` is a
/// zero-dimensional array.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use rotseis::math::{moving_sum, MovingSumMode};
///
/// let x = array![1.0, 1.0, 1.0, 1.0, 1.0];
/// let y = moving_sum(&x, 3, MovingSumMode::Same)?;
/// assert_eq!(y.to_vec(), vec![2.0, 3.0, 3.0, 3.0, 2.0]);
/// # Ok::<(), rotseis::SeisError>(())
/// ```
pub fn moving_sum<S, D>(
    x: &ArrayBase<S, D>,
    window: usize,
    mode: MovingSumMode,
) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if window == 0 {
        return Err(SeisError::invalid_config("moving sum window must be at least 1"));
    }
    let Some(last_axis) = x.ndim().checked_sub(1) else {
        return Err(SeisError::invalid_config(
            "moving sum needs an array with at least one axis",
        ));
    };
    let axis = Axis(last_axis);
    let n_in = x.len_of(axis);

    let mut shape = x.raw_dim();
    shape.slice_mut()[last_axis] = mode.output_len(n_in, window);
    let mut y = Array::<f64, D>::zeros(shape);

    let offset = mode.full_offset(window);
    for (lane, mut out) in x.lanes(axis).into_iter().zip(y.lanes_mut(axis)) {
        let cx = cumsum(lane.iter().copied());
        for (i, v) in out.iter_mut().enumerate() {
            *v = full_window_sum(&cx, i + offset, window);
        }
    }

    Ok(y)
}
