// =============================================================================
// Exponent Curve — filter output paired with its window-size axis
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::resample::{interpolate, validate_points};

/// Local scaling exponent as a function of log-window size.
///
/// Both sequences have the same length and are positionally paired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExponentCurve")]
pub struct ExponentCurve {
    slope_estimates: Vec<f64>,
    uniform_window_sizes: Vec<f64>,
}

#[derive(Deserialize)]
struct RawExponentCurve {
    slope_estimates: Vec<f64>,
    uniform_window_sizes: Vec<f64>,
}

// A stored curve must look like one the filter produced: paired, at least
// two finite points, windows strictly ascending.
impl TryFrom<RawExponentCurve> for ExponentCurve {
    type Error = FilterError;

    fn try_from(raw: RawExponentCurve) -> Result<Self, Self::Error> {
        validate_points(&raw.uniform_window_sizes, &raw.slope_estimates)?;
        Ok(Self::new(raw.slope_estimates, raw.uniform_window_sizes))
    }
}

impl ExponentCurve {
    pub(crate) fn new(slope_estimates: Vec<f64>, uniform_window_sizes: Vec<f64>) -> Self {
        debug_assert_eq!(slope_estimates.len(), uniform_window_sizes.len());
        Self {
            slope_estimates,
            uniform_window_sizes,
        }
    }

    pub fn slope_estimates(&self) -> &[f64] {
        &self.slope_estimates
    }

    pub fn uniform_window_sizes(&self) -> &[f64] {
        &self.uniform_window_sizes
    }

    pub fn len(&self) -> usize {
        self.slope_estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slope_estimates.is_empty()
    }

    /// `(log-window, exponent)` pairs in ascending window order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.uniform_window_sizes
            .iter()
            .copied()
            .zip(self.slope_estimates.iter().copied())
    }

    /// Exponent at an arbitrary log-window size, linearly interpolated and
    /// clamped to the curve's end values outside its range.
    ///
    /// Returns `None` for an empty curve or a non-finite query.
    pub fn exponent_at(&self, log_window: f64) -> Option<f64> {
        interpolate(
            &self.uniform_window_sizes,
            &self.slope_estimates,
            log_window,
        )
    }

    /// `(slope_estimates, uniform_window_sizes)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.slope_estimates, self.uniform_window_sizes)
    }
}
