//! Evenly spaced grids with checked endpoints.

use crate::config::RangePolicy;
use crate::error::{Result, SeisError};

/// Default relative tolerance of [`arange2`].
pub const DEFAULT_RANGE_EPSILON: f64 = 1e-6;

/// Return evenly spaced numbers `start + i*step` over `[start, stop]`.
///
/// The number of values is `n = round((stop - start) / step) + 1`. The range
/// is inconsistent if the implied endpoint `start + (n-1)*step` differs from
/// `stop` by more than `step * epsilon`. Inconsistencies are handled
/// according to `policy`: [`RangePolicy::Raise`] fails, while
/// [`RangePolicy::Round`], [`RangePolicy::Floor`] and [`RangePolicy::Ceil`]
/// silently move `stop` to the closest, next smaller or next larger multiple
/// of `step`. Rounding is half-to-even.
///
/// # Errors
///
/// - [`SeisError::InconsistentRange`] under [`RangePolicy::Raise`].
/// - [`SeisError::InvalidConfig`] if any argument is non-finite or `step` is
///   zero.
///
/// # Example
///
/// ```
/// use rotseis::math::arange2;
/// use rotseis::RangePolicy;
///
/// assert_eq!(arange2(0.0, 9.0, 3.0, 1e-6, RangePolicy::Raise)?, vec![0.0, 3.0, 6.0, 9.0]);
/// assert!(arange2(0.0, 10.0, 3.0, 1e-6, RangePolicy::Raise).is_err());
/// # Ok::<(), rotseis::SeisError>(())
/// ```
pub fn arange2(
    start: f64,
    stop: f64,
    step: f64,
    epsilon: f64,
    policy: RangePolicy,
) -> Result<Vec<f64>> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite() && epsilon.is_finite()) {
        return Err(SeisError::invalid_config(format!(
            "range parameters must be finite: start={start}, stop={stop}, step={step}"
        )));
    }
    if step == 0.0 {
        return Err(SeisError::invalid_config("range step must be non-zero"));
    }

    let ratio = (stop - start) / step;
    let rounded = match policy {
        RangePolicy::Floor => ratio.floor(),
        RangePolicy::Ceil => ratio.ceil(),
        RangePolicy::Raise | RangePolicy::Round => ratio.round_ties_even(),
    };
    let n = rounded + 1.0;
    let stop_check = start + (n - 1.0) * step;

    if policy == RangePolicy::Raise && (stop_check - stop).abs() > step * epsilon {
        return Err(SeisError::inconsistent_range(start, stop, step));
    }

    let n = if n > 0.0 { n as usize } else { 0 };
    Ok((0..n).map(|i| i as f64 * step + start).collect())
}
