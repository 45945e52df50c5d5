// =============================================================================
// Error Taxonomy
// =============================================================================
//
// Two failure kinds only.  Every check runs before the recursion starts, so a
// caller either gets a complete curve or one of these, never a partial result.

use thiserror::Error;

/// Why a caller-supplied input was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputDefect {
    #[error("window sizes ({window_sizes}) and fluctuations ({fluctuations}) differ in length")]
    LengthMismatch {
        window_sizes: usize,
        fluctuations: usize,
    },

    #[error("need at least 2 points, got {len}")]
    TooFewPoints { len: usize },

    #[error("window sizes not strictly ascending at index {index} ({previous} -> {current})")]
    NotAscending {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("{series} contains a non-finite value at index {index}")]
    NonFinite { series: &'static str, index: usize },

    #[error("{name} must be at least {min}, got {value}")]
    BelowMinimum {
        name: &'static str,
        min: usize,
        value: usize,
    },
}

/// Error type for curve computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputDefect),

    #[error("uniform log-window step evaluated to {step}, cannot divide by it")]
    NumericDegeneracy { step: f64 },
}

impl FilterError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_numeric_degeneracy(&self) -> bool {
        matches!(self, Self::NumericDegeneracy { .. })
    }
}
