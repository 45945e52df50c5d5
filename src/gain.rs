// =============================================================================
// Gain Schedule — step-dependent alpha / beta coefficients
// =============================================================================
//
// Closed-form gains of the expanding-memory alpha-beta filter (Echeverria et
// al., Chaos 2003; 13(2):467-75):
//
//   alpha(k) = 2 (2k - 1) / (k (k + 1))
//   beta(k)  = 6 / (k (k + 1))
//
// k is the one-based step index.  Past the saturation bound Q the gains are
// frozen at their value for k = Q, so evaluation clamps k to min(k, Q) first.
//
// Note alpha(1) == alpha(2) == 1; alpha is strictly decreasing from k = 2
// onward, beta strictly decreasing from k = 1.

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, InputDefect};

/// Saturation bound used when none is configured.
pub const DEFAULT_SATURATION: usize = 500;

fn check_step(k: usize) -> Result<(), FilterError> {
    if k < 1 {
        return Err(InputDefect::BelowMinimum {
            name: "step index",
            min: 1,
            value: k,
        }
        .into());
    }
    Ok(())
}

/// Gain schedule with a validated saturation bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGainSchedule")]
pub struct GainSchedule {
    saturation: usize,
}

// Unchecked wire form; deserialisation goes through `GainSchedule::new`.
#[derive(Deserialize)]
struct RawGainSchedule {
    saturation: usize,
}

impl TryFrom<RawGainSchedule> for GainSchedule {
    type Error = FilterError;

    fn try_from(raw: RawGainSchedule) -> Result<Self, Self::Error> {
        Self::new(raw.saturation)
    }
}

impl GainSchedule {
    /// Fails when `saturation` is zero.
    pub fn new(saturation: usize) -> Result<Self, FilterError> {
        if saturation < 1 {
            return Err(InputDefect::BelowMinimum {
                name: "saturation",
                min: 1,
                value: saturation,
            }
            .into());
        }
        Ok(Self { saturation })
    }

    pub fn saturation(&self) -> usize {
        self.saturation
    }

    /// Level gain at one-based step `k`.
    pub fn alpha(&self, k: usize) -> Result<f64, FilterError> {
        check_step(k)?;
        Ok(self.alpha_unchecked(k))
    }

    /// Slope gain at one-based step `k`.
    pub fn beta(&self, k: usize) -> Result<f64, FilterError> {
        check_step(k)?;
        Ok(self.beta_unchecked(k))
    }

    /// `(alpha, beta)` once the schedule has frozen.
    pub fn steady_state(&self) -> (f64, f64) {
        (
            self.alpha_unchecked(self.saturation),
            self.beta_unchecked(self.saturation),
        )
    }

    // Callers guarantee k >= 1.
    pub(crate) fn alpha_unchecked(&self, k: usize) -> f64 {
        let k = k.min(self.saturation) as f64;
        2.0 * (2.0 * k - 1.0) / (k * (k + 1.0))
    }

    pub(crate) fn beta_unchecked(&self, k: usize) -> f64 {
        let k = k.min(self.saturation) as f64;
        6.0 / (k * (k + 1.0))
    }
}

impl Default for GainSchedule {
    fn default() -> Self {
        Self {
            saturation: DEFAULT_SATURATION,
        }
    }
}

/// `alpha(k, Q)`; fails when `k < 1` or `q < 1`.
pub fn alpha(k: usize, q: usize) -> Result<f64, FilterError> {
    GainSchedule::new(q)?.alpha(k)
}

/// `beta(k, Q)`; fails when `k < 1` or `q < 1`.
pub fn beta(k: usize, q: usize) -> Result<f64, FilterError> {
    GainSchedule::new(q)?.beta(k)
}
