//! Pipeline configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use slitscan_capture::{BrightnessProjection, BrightnessRange, DepthWindow};
use slitscan_spacetime::{Bounds, GradientMode, Vec3};

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("scan_frames must be at least 1")]
    ZeroScanFrames,

    #[error("pixel_step must be at least 1")]
    ZeroPixelStep,

    #[error("bounds min {min:?} exceeds max {max:?} on some axis")]
    InvertedBounds { min: Vec3, max: Vec3 },
}

/// Everything a [`crate::SlitScan`] is built from. Missing fields in a
/// serialized config fall back to [`Default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlitScanConfig {
    /// History length in frames.
    pub scan_frames: usize,
    /// Physical region mapped onto every grid.
    pub bounds: Bounds,
    /// Samples outside this z range are dropped before bucketing.
    pub depth_window: DepthWindow,
    /// Depth span brightness is spread over for color-only cameras.
    pub webcam_depth: BrightnessRange,
    /// Sample every n-th pixel on both axes.
    pub pixel_step: usize,
    pub initial_mode: GradientMode,
    pub slit_scan: bool,
    pub debug_info: bool,
    /// Fixed seed for the random gradient; entropy when absent.
    pub rng_seed: Option<u64>,
}

impl Default for SlitScanConfig {
    fn default() -> Self {
        Self {
            scan_frames: 240,
            bounds: Bounds::new(
                Vec3::new(-400.0, -400.0, 400.0),
                Vec3::new(400.0, 400.0, 3000.0),
            ),
            depth_window: DepthWindow::new(0.0, 3000.0),
            webcam_depth: BrightnessRange::new(1000.0, 2000.0),
            pixel_step: 1,
            initial_mode: GradientMode::MostRecent,
            slit_scan: true,
            debug_info: false,
            rng_seed: None,
        }
    }
}

impl SlitScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_frames == 0 {
            return Err(ConfigError::ZeroScanFrames);
        }
        if self.pixel_step == 0 {
            return Err(ConfigError::ZeroPixelStep);
        }
        if !self.bounds.is_ordered() {
            return Err(ConfigError::InvertedBounds {
                min: self.bounds.min,
                max: self.bounds.max,
            });
        }
        Ok(())
    }

    /// Brightness-as-depth projection over the configured bounds.
    pub fn projection(&self) -> BrightnessProjection {
        BrightnessProjection::new(self.bounds, self.webcam_depth)
    }

    /// Parse and validate a persisted config.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("malformed slit-scan config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
