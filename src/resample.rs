// =============================================================================
// Log-domain Resampler
// =============================================================================
//
// DFA window sizes are rarely evenly spaced on the log axis.  The filter needs
// a constant step, so the (window, fluctuation) pairs are re-sampled onto
// `num_points` evenly spaced log-window values spanning [ls[0], ls[last]]:
//
//   uni[i] = ls[0] + i * (ls[last] - ls[0]) / (num_points - 1)
//   uni[num_points - 1] = ls[last]          (pinned, no rounding drift)
//
// Fluctuations are linearly interpolated between neighbouring knots.  Queries
// outside [ls[0], ls[last]] clamp to the boundary value instead of
// extrapolating.
// =============================================================================

use tracing::trace;

use crate::error::{FilterError, InputDefect};

/// Uniformly re-sampled DFA data.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    /// Evenly spaced log-window sizes.
    pub window_sizes: Vec<f64>,
    /// Log-fluctuations interpolated at `window_sizes`.
    pub fluctuations: Vec<f64>,
    /// Constant spacing of `window_sizes`.
    pub step: f64,
}

/// Check that `window_sizes`/`fluctuations` form a usable DFA point set.
pub fn validate_points(window_sizes: &[f64], fluctuations: &[f64]) -> Result<(), FilterError> {
    match find_defect(window_sizes, fluctuations) {
        Some(defect) => Err(defect.into()),
        None => Ok(()),
    }
}

fn find_defect(window_sizes: &[f64], fluctuations: &[f64]) -> Option<InputDefect> {
    if window_sizes.len() != fluctuations.len() {
        return Some(InputDefect::LengthMismatch {
            window_sizes: window_sizes.len(),
            fluctuations: fluctuations.len(),
        });
    }
    if window_sizes.len() < 2 {
        return Some(InputDefect::TooFewPoints {
            len: window_sizes.len(),
        });
    }
    if let Some(index) = window_sizes.iter().position(|x| !x.is_finite()) {
        return Some(InputDefect::NonFinite {
            series: "window sizes",
            index,
        });
    }
    if let Some(index) = fluctuations.iter().position(|x| !x.is_finite()) {
        return Some(InputDefect::NonFinite {
            series: "fluctuations",
            index,
        });
    }
    window_sizes
        .windows(2)
        .enumerate()
        .find(|(_, pair)| pair[1] <= pair[0])
        .map(|(i, pair)| InputDefect::NotAscending {
            index: i + 1,
            previous: pair[0],
            current: pair[1],
        })
}

/// `num` evenly spaced values from `start` to `stop` inclusive.
///
/// The last element is pinned to `stop`.  `num == 1` yields `[start]`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            out[num - 1] = stop;
            out
        }
    }
}

/// Piecewise-linear interpolation of the knots `(xs, ys)` at `x`.
///
/// Queries below `xs[0]` return `ys[0]`; queries above the last knot return
/// the last value.  Returns `None` for a non-finite query, no knots, or
/// `xs`/`ys` of different lengths.  `xs` is assumed ascending.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    if xs.is_empty() || xs.len() != ys.len() || !x.is_finite() {
        return None;
    }
    Some(interpolate_knots(xs, ys, x))
}

// Caller guarantees non-empty, equal-length knots and a finite query.
pub(crate) fn interpolate_knots(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }

    // First knot strictly greater than x; 1 <= hi <= last here.
    let hi = xs.partition_point(|&k| k <= x);
    let lo = hi - 1;
    if x == xs[lo] {
        return ys[lo];
    }
    let slope = (ys[hi] - ys[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + slope * (x - xs[lo])
}

/// Re-sample `(window_sizes, fluctuations)` onto `num_points` uniform
/// log-window values.
///
/// Fails with [`FilterError::InvalidInput`] on malformed input or
/// `num_points < 2`, and with [`FilterError::NumericDegeneracy`] when the
/// resulting step is zero or non-finite, or rounding collapses neighbouring
/// grid points (spans of a few ulps).
pub fn resample(
    window_sizes: &[f64],
    fluctuations: &[f64],
    num_points: usize,
) -> Result<Resampled, FilterError> {
    validate_points(window_sizes, fluctuations)?;
    if num_points < 2 {
        return Err(InputDefect::BelowMinimum {
            name: "num_points",
            min: 2,
            value: num_points,
        }
        .into());
    }

    let first = window_sizes[0];
    let last = window_sizes[window_sizes.len() - 1];
    let uniform = linspace(first, last, num_points);

    let step = uniform[1] - uniform[0];
    if !(step > 0.0 && step.is_finite()) {
        return Err(FilterError::NumericDegeneracy { step });
    }
    if let Some(pair) = uniform.windows(2).find(|pair| pair[1] <= pair[0]) {
        return Err(FilterError::NumericDegeneracy {
            step: pair[1] - pair[0],
        });
    }

    let interpolated: Vec<f64> = uniform
        .iter()
        .map(|&x| interpolate_knots(window_sizes, fluctuations, x))
        .collect();

    trace!(
        knots = window_sizes.len(),
        num_points,
        step,
        "resampled DFA points onto uniform log grid"
    );

    Ok(Resampled {
        window_sizes: uniform,
        fluctuations: interpolated,
        step,
    })
}
