use serde::{Deserialize, Serialize};

use slitscan_spacetime::{Bounds, CompositeStats, GradientMode};

/// Why a cycle left the composite untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Paused,
    NoFrame,
    EmptyHistory,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CycleStatus {
    Skipped {
        reason: SkipReason,
    },
    /// Slit-scan disabled; the composite is the filtered capture itself.
    Passthrough {
        points: usize,
    },
    Composited {
        points: usize,
        frames_held: usize,
        evicted: usize,
        stats: CompositeStats,
    },
}

/// Outcome of one pipeline cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Monotonic cycle counter, skipped cycles included.
    pub cycle: u64,
    pub mode: GradientMode,
    pub status: CycleStatus,
    /// Extent of accepted samples, only reported with debug info on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_bounds: Option<Bounds>,
}

impl CycleReport {
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, CycleStatus::Skipped { .. })
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self.status {
            CycleStatus::Skipped { reason } => Some(reason),
            _ => None,
        }
    }

    /// Points in the composite after this cycle, if it changed.
    pub fn points(&self) -> Option<usize> {
        match self.status {
            CycleStatus::Skipped { .. } => None,
            CycleStatus::Passthrough { points } | CycleStatus::Composited { points, .. } => {
                Some(points)
            }
        }
    }
}
