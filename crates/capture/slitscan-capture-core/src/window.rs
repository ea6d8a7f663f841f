//! Near/far depth thresholds.

use serde::{Deserialize, Serialize};

/// Largest threshold either end of the window may reach.
pub const DEPTH_LIMIT: f64 = 10_000.0;

/// Step applied by one threshold nudge.
pub const NUDGE_STEP: f64 = 10.0;

/// Inclusive z range a sample must fall in to be kept.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepthWindow {
    pub near: f64,
    pub far: f64,
}

impl DepthWindow {
    pub const fn new(near: f64, far: f64) -> Self {
        Self { near, far }
    }

    #[inline]
    pub fn contains(&self, z: f64) -> bool {
        z >= self.near && z <= self.far
    }

    /// Move the near threshold by `delta`, clamped to `[0, DEPTH_LIMIT]`.
    pub fn nudge_near(&mut self, delta: f64) -> f64 {
        self.near = (self.near + delta).clamp(0.0, DEPTH_LIMIT);
        self.near
    }

    /// Move the far threshold by `delta`, clamped to `[0, DEPTH_LIMIT]`.
    pub fn nudge_far(&mut self, delta: f64) -> f64 {
        self.far = (self.far + delta).clamp(0.0, DEPTH_LIMIT);
        self.far
    }
}

impl Default for DepthWindow {
    fn default() -> Self {
        Self::new(0.0, 3000.0)
    }
}
