//! slitscan-capture-core: what the slit-scan pipeline consumes from a camera.
//!
//! Hosts adapt their device into a [`FrameSource`]. Raw pixel buffers are
//! turned into [`CaptureFrame`]s by [`DepthPixelFrame`] (registered depth
//! camera) or [`RgbPixelFrame`] (color camera, brightness as depth), both
//! filtered through a [`DepthWindow`].

pub mod error;
pub mod frame;
pub mod pixels;
pub mod stats;
pub mod window;

pub use error::{CaptureError, Result};
pub use frame::{CaptureFrame, FrameSource, QueuedSource, Sample};
pub use pixels::{
    BrightnessProjection, BrightnessRange, DepthPixel, DepthPixelFrame, RgbPixelFrame,
};
pub use stats::SampleBounds;
pub use window::{DepthWindow, DEPTH_LIMIT, NUDGE_STEP};
