use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors raised while wrapping raw pixel buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CaptureError {
    #[error("frame size {width}x{height} has no pixels")]
    EmptyFrame { width: usize, height: usize },

    #[error("expected {expected} pixels for the frame size, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("pixel step must be at least 1")]
    ZeroPixelStep,
}
