// =============================================================================
// Filter Configuration — resampling density and gain saturation
// =============================================================================
//
// Both knobs default to 500.  All fields carry `#[serde(default)]` so a
// partial (or empty) JSON object still loads.  Saving stages the file next to
// its target and renames it into place.
// =============================================================================

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FilterError, InputDefect};
use crate::gain::{GainSchedule, DEFAULT_SATURATION};

/// Number of uniform log-window points used when none is configured.
pub const DEFAULT_NUM_POINTS: usize = 500;

fn default_num_points() -> usize {
    DEFAULT_NUM_POINTS
}

fn default_saturation() -> usize {
    DEFAULT_SATURATION
}

/// Tunables for [`compute_exponent_curve`](crate::compute_exponent_curve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Number of evenly spaced log-window sizes to resample onto.  Must be
    /// at least 2: the initial slope is a two-point finite difference.
    #[serde(default = "default_num_points")]
    pub num_points: usize,

    /// Step index past which the alpha/beta gains are frozen.
    #[serde(default = "default_saturation")]
    pub saturation: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            num_points: default_num_points(),
            saturation: default_saturation(),
        }
    }
}

impl FilterConfig {
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    pub fn with_saturation(mut self, saturation: usize) -> Self {
        self.saturation = saturation;
        self
    }

    /// Reject values the filter cannot run with.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.num_points < 2 {
            return Err(InputDefect::BelowMinimum {
                name: "num_points",
                min: 2,
                value: self.num_points,
            }
            .into());
        }
        self.gain_schedule().map(|_| ())
    }

    pub fn gain_schedule(&self) -> Result<GainSchedule, FilterError> {
        GainSchedule::new(self.saturation)
    }

    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("malformed filter config JSON")?;
        config.validate().context("filter config out of range")?;
        Ok(config)
    }

    /// Load and validate configuration from the JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("cannot open filter config {}", path.display()))?;

        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("malformed filter config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("filter config {} out of range", path.display()))?;

        info!(
            path = %path.display(),
            num_points = config.num_points,
            saturation = config.saturation,
            "filter config loaded"
        );
        Ok(config)
    }

    /// Write to `path`.  The JSON goes to a `.partial` sibling first, is
    /// synced, then renamed over `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut staging = path.as_os_str().to_owned();
        staging.push(".partial");
        let staging = PathBuf::from(staging);

        let mut writer = BufWriter::new(
            File::create(&staging)
                .with_context(|| format!("cannot create {}", staging.display()))?,
        );
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("cannot encode filter config into {}", staging.display()))?;
        let file = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .with_context(|| format!("cannot flush {}", staging.display()))?;
        file.sync_all()
            .with_context(|| format!("cannot sync {}", staging.display()))?;

        std::fs::rename(&staging, path)
            .with_context(|| format!("cannot move {} into place", staging.display()))?;

        info!(
            path = %path.display(),
            num_points = self.num_points,
            saturation = self.saturation,
            "filter config saved"
        );
        Ok(())
    }
}
