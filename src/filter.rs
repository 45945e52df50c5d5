// =============================================================================
// Alpha-Beta Recursion Engine
// =============================================================================
//
// Two-state (level G, slope m) predictor-corrector over a uniformly sampled
// log-fluctuation series F with constant log-window step d:
//
//   bootstrap:  Ge[0] = F[0]
//               me[0] = (F[1] - F[0]) / d
//
//   i = 1..n-1: Gp[i] = Ge[i-1] + d * me[i-1]            (predict)
//               r     = F[i] - Gp[i]                     (innovation)
//               Ge[i] = Gp[i] + alpha(i) * r             (correct level)
//               me[i] = me[i-1] + beta(i) / d * r        (correct slope)
//
// `me` is the local scaling exponent at each window size.  The recursion is
// strictly sequential and always runs n-1 corrective steps.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{FilterError, InputDefect};
use crate::gain::GainSchedule;

/// Every sequence the recursion produces, index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterTrace {
    /// Predicted level `Gp`.  `Gp[0]` has no prediction and equals `Ge[0]`.
    pub level_predictions: Vec<f64>,
    /// Corrected level `Ge`.
    pub level_estimates: Vec<f64>,
    /// Corrected slope `me`, the exponent estimate.
    pub slope_estimates: Vec<f64>,
}

/// Fixed two-state filter driven by a [`GainSchedule`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlphaBetaFilter {
    schedule: GainSchedule,
}

impl AlphaBetaFilter {
    pub fn new(schedule: GainSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> GainSchedule {
        self.schedule
    }

    /// Slope estimates for a uniformly sampled series with spacing `step`.
    pub fn run(&self, fluctuations: &[f64], step: f64) -> Result<Vec<f64>, FilterError> {
        Ok(self.run_trace(fluctuations, step)?.slope_estimates)
    }

    /// Run the recursion and keep the level sequences as well.
    ///
    /// Fails when fewer than two samples are given, a sample is non-finite,
    /// or `step` is not a positive finite number.
    pub fn run_trace(&self, fluctuations: &[f64], step: f64) -> Result<FilterTrace, FilterError> {
        let n = fluctuations.len();
        if n < 2 {
            return Err(InputDefect::TooFewPoints { len: n }.into());
        }
        if let Some(index) = fluctuations.iter().position(|x| !x.is_finite()) {
            return Err(InputDefect::NonFinite {
                series: "fluctuations",
                index,
            }
            .into());
        }
        if !(step > 0.0 && step.is_finite()) {
            return Err(FilterError::NumericDegeneracy { step });
        }
        Ok(self.recurse(fluctuations, step))
    }

    /// Recursion proper.  Caller guarantees at least two finite samples and a
    /// positive finite `d`; [`resample`](crate::resample::resample) output
    /// satisfies both.
    pub(crate) fn recurse(&self, fluctuations: &[f64], d: f64) -> FilterTrace {
        let n = fluctuations.len();
        let mut gp = vec![0.0_f64; n];
        let mut ge = vec![0.0_f64; n];
        let mut me = vec![0.0_f64; n];

        ge[0] = fluctuations[0];
        gp[0] = ge[0];
        me[0] = (fluctuations[1] - fluctuations[0]) / d;

        for i in 1..n {
            gp[i] = ge[i - 1] + d * me[i - 1];
            let r = fluctuations[i] - gp[i];
            ge[i] = gp[i] + self.schedule.alpha_unchecked(i) * r;
            me[i] = me[i - 1] + (self.schedule.beta_unchecked(i) / d) * r;
        }

        trace!(
            points = n,
            bootstrap_slope = me[0],
            "alpha-beta recursion complete"
        );
        debug!(
            points = n,
            saturation = self.schedule.saturation(),
            step = d,
            final_exponent = format!("{:.4}", me[n - 1]),
            "exponent curve filtered"
        );

        FilterTrace {
            level_predictions: gp,
            level_estimates: ge,
            slope_estimates: me,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// Straight line with slope `m` sampled at spacing `d`.
    fn line(n: usize, m: f64, c: f64, d: f64) -> Vec<f64> {
        (0..n).map(|i| m * (i as f64 * d) + c).collect()
    }

    /// Two linear regimes joined at `n / 2`, like a DFA curve with a crossover.
    fn crossover(n: usize, d: f64, m1: f64, m2: f64) -> Vec<f64> {
        let knee = n / 2;
        (0..n)
            .map(|i| {
                let x = i as f64 * d;
                let xk = knee as f64 * d;
                if i <= knee {
                    m1 * x
                } else {
                    m1 * xk + m2 * (x - xk)
                }
            })
            .collect()
    }

    #[test]
    fn bootstrap_uses_first_two_samples() {
        let trace = AlphaBetaFilter::default()
            .run_trace(&[0.5, 1.3, 1.9], 0.4)
            .unwrap();
        assert_eq!(trace.level_estimates[0], 0.5);
        assert_eq!(trace.level_predictions[0], 0.5);
        assert!((trace.slope_estimates[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn hand_computed_steps() {
        // F = [0, 1, 3], d = 1, default schedule.
        // me0 = 1; i=1: Gp=1, r=0 => Ge=1, me=1
        // i=2: Gp=2, r=1, alpha(2)=1, beta(2)=1 => Ge=3, me=2
        let trace = AlphaBetaFilter::default()
            .run_trace(&[0.0, 1.0, 3.0], 1.0)
            .unwrap();
        assert_eq!(trace.level_predictions, vec![0.0, 1.0, 2.0]);
        assert_eq!(trace.level_estimates, vec![0.0, 1.0, 3.0]);
        assert_eq!(trace.slope_estimates, vec![1.0, 1.0, 2.0]);
    }

    #[test]
    fn perfect_line_has_zero_innovation() {
        let d = 0.05;
        let data = line(200, 0.85, -1.2, d);
        let me = AlphaBetaFilter::default().run(&data, d).unwrap();
        for (i, m) in me.iter().enumerate() {
            assert!((m - 0.85).abs() < 1e-9, "me[{i}] = {m}");
        }
    }

    #[test]
    fn two_points_single_corrective_step() {
        let trace = AlphaBetaFilter::default().run_trace(&[1.0, 1.5], 0.25).unwrap();
        assert_eq!(trace.slope_estimates.len(), 2);
        assert!((trace.slope_estimates[0] - 2.0).abs() < 1e-12);
        assert!((trace.slope_estimates[1] - 2.0).abs() < 1e-12);
        assert!((trace.level_estimates[1] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn tracks_slope_change_across_crossover() {
        let d = 0.01;
        let n = 500;
        let data = crossover(n, d, 1.5, 0.5);
        // Frozen gains early so the filter forgets the first regime.
        let filter = AlphaBetaFilter::new(GainSchedule::new(20).unwrap());
        let me = filter.run(&data, d).unwrap();
        let early = me[n / 4];
        let late = me[n - 1];
        assert!((early - 1.5).abs() < 1e-6, "early exponent {early}");
        assert!((late - 0.5).abs() < 1e-3, "late exponent {late}");
    }

    #[test]
    fn unsaturated_schedule_averages_both_regimes() {
        // Without freezing, the gains keep a growing memory, so after a
        // crossover the estimate lands between the two slopes.
        let d = 0.01;
        let n = 500;
        let data = crossover(n, d, 1.5, 0.5);
        let me = AlphaBetaFilter::default().run(&data, d).unwrap();
        let late = me[n - 1];
        assert!(late > 0.6 && late < 1.4, "late exponent {late}");
    }

    #[test]
    fn small_saturation_reacts_faster() {
        let d = 0.01;
        let n = 400;
        let data = crossover(n, d, 1.2, 0.4);
        let fast = AlphaBetaFilter::new(GainSchedule::new(10).unwrap())
            .run(&data, d)
            .unwrap();
        let slow = AlphaBetaFilter::new(GainSchedule::new(500).unwrap())
            .run(&data, d)
            .unwrap();
        let err_fast = (fast[n - 1] - 0.4).abs();
        let err_slow = (slow[n - 1] - 0.4).abs();
        assert!(
            err_fast < err_slow,
            "Q=10 error {err_fast:.4} should beat Q=500 error {err_slow:.4}"
        );
    }

    #[test]
    fn deterministic_bit_identical() {
        let data: Vec<f64> = (0..300)
            .map(|i| (i as f64 * 0.013).sin() + 0.7 * i as f64 * 0.02)
            .collect();
        let filter = AlphaBetaFilter::default();
        let a = filter.run_trace(&data, 0.02).unwrap();
        let b = filter.run_trace(&data, 0.02).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_short_or_bad_input() {
        let filter = AlphaBetaFilter::default();
        assert!(filter.run(&[1.0], 0.1).unwrap_err().is_invalid_input());
        assert!(filter.run(&[1.0, f64::NAN], 0.1).unwrap_err().is_invalid_input());
        assert!(filter.run(&[1.0, 2.0], 0.0).unwrap_err().is_numeric_degeneracy());
        assert!(filter.run(&[1.0, 2.0], -1.0).unwrap_err().is_numeric_degeneracy());
        assert!(filter
            .run(&[1.0, 2.0], f64::NAN)
            .unwrap_err()
            .is_numeric_degeneracy());
    }
}
