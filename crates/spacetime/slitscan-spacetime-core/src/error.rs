//! Error types for grids, frame history and compositing.

use thiserror::Error;

use crate::vec::{CellIndex, Resolution};

pub type Result<T> = std::result::Result<T, SpaceTimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SpaceTimeError {
    /// A grid axis was given zero cells.
    #[error("invalid resolution {x}x{y}x{z}: every axis needs at least one cell")]
    InvalidResolution { x: usize, y: usize, z: usize },

    /// History capacity below one frame.
    #[error("invalid capacity {capacity}: history must hold at least one frame")]
    InvalidCapacity { capacity: usize },

    /// Direct cell access outside the grid.
    #[error("cell {cell} is outside grid resolution {resolution}")]
    OutOfBounds {
        cell: CellIndex,
        resolution: Resolution,
    },

    /// Frame lookup past the end of the history.
    #[error("frame index {index} out of range for history of {len} frames")]
    IndexOutOfRange { index: usize, len: usize },

    /// Normalized time that is negative or not a number.
    #[error("time {t} does not resolve to a frame")]
    InvalidTime { t: f32 },

    /// No frame has been pushed since creation or the last clear.
    #[error("frame history is empty")]
    EmptyBuffer,

    /// History holds grids built for another gradient resolution.
    #[error("frame resolution {found} does not match compositor resolution {expected}")]
    ResolutionMismatch {
        expected: Resolution,
        found: Resolution,
    },
}

impl SpaceTimeError {
    /// Whether the caller can skip the current cycle and carry on.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyBuffer)
    }

    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidResolution { .. } | Self::InvalidCapacity { .. } => "config",
            Self::OutOfBounds { .. } | Self::IndexOutOfRange { .. } | Self::InvalidTime { .. } => {
                "access"
            }
            Self::EmptyBuffer => "history",
            Self::ResolutionMismatch { .. } => "composite",
        }
    }
}
