use serde::{Deserialize, Serialize};

use slitscan_spacetime::GradientMode;

/// Host-issued control, typically bound to keys or UI widgets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Select a gradient by its 0-9 index. Unknown indices select most-recent.
    SetMode { index: i32 },
    SetGradient { mode: GradientMode },
    SetScanFrames { frames: usize },
    TogglePause,
    ToggleSlitScan,
    ToggleDebug,
    NudgeNear { delta: f64 },
    NudgeFar { delta: f64 },
}
