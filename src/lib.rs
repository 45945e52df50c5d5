// =============================================================================
// DFA Alpha-Beta Filter
// =============================================================================
//
// Turns Detrended Fluctuation Analysis output (log window sizes and their log
// fluctuations) into a smooth, window-size dependent scaling-exponent curve
// instead of a single regression slope.
//
// Pipeline:
//   1. Resample the (log n, log F(n)) pairs onto a uniform log-window grid.
//   2. Run a two-state alpha-beta filter over the resampled series; the
//      slope state is the local exponent.
//
// All validation happens up front.  The computation is synchronous,
// deterministic and allocation-bounded by `num_points`.

pub mod config;
pub mod curve;
pub mod error;
pub mod filter;
pub mod gain;
pub mod resample;

pub use config::{FilterConfig, DEFAULT_NUM_POINTS};
pub use curve::ExponentCurve;
pub use error::{FilterError, InputDefect};
pub use filter::{AlphaBetaFilter, FilterTrace};
pub use gain::{alpha, beta, GainSchedule, DEFAULT_SATURATION};
pub use resample::{resample, Resampled};

use tracing::debug;

/// Compute the local scaling-exponent curve of a DFA result.
///
/// `window_sizes` and `fluctuations` are log-scale, equal length (>= 2), and
/// `window_sizes` must be strictly ascending.  Returns the slope estimates
/// paired with the `config.num_points` uniform log-window sizes they belong
/// to.
pub fn compute_exponent_curve(
    window_sizes: &[f64],
    fluctuations: &[f64],
    config: &FilterConfig,
) -> Result<ExponentCurve, FilterError> {
    let curve = config.gain_schedule().and_then(|schedule| {
        // `resample` checks the points and `num_points`; its output is what
        // the recursion requires.
        let resampled = resample(window_sizes, fluctuations, config.num_points)?;
        let trace =
            AlphaBetaFilter::new(schedule).recurse(&resampled.fluctuations, resampled.step);
        Ok(ExponentCurve::new(trace.slope_estimates, resampled.window_sizes))
    });

    if let Err(e) = &curve {
        debug!(
            error = %e,
            points = window_sizes.len(),
            num_points = config.num_points,
            saturation = config.saturation,
            "exponent curve rejected"
        );
    }
    curve
}
