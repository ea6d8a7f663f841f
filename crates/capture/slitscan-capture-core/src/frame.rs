//! Samples, frames and the source contract consumed by the pipeline.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use slitscan_spacetime::{Rgba, Vec3};

/// One captured point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub position: Vec3,
    pub color: Rgba,
}

impl Sample {
    pub const fn new(position: Vec3, color: Rgba) -> Self {
        Self { position, color }
    }
}

impl From<(Vec3, Rgba)> for Sample {
    fn from((position, color): (Vec3, Rgba)) -> Self {
        Self { position, color }
    }
}

impl From<Sample> for (Vec3, Rgba) {
    fn from(s: Sample) -> Self {
        (s.position, s.color)
    }
}

/// Every sample of one capture frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureFrame {
    samples: Vec<Sample>,
}

impl CaptureFrame {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }
}

impl FromIterator<Sample> for CaptureFrame {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for CaptureFrame {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a> IntoIterator for &'a CaptureFrame {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Producer of capture frames.
///
/// `poll_frame` returns `Some` only when a new frame arrived since the last
/// call. Device failures are reported as `None`; they never reach the core.
pub trait FrameSource {
    fn poll_frame(&mut self) -> Option<CaptureFrame>;
}

/// FIFO of frames handed in by a host, drained one per poll.
#[derive(Debug, Default)]
pub struct QueuedSource {
    pending: VecDeque<CaptureFrame>,
}

impl QueuedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, frame: CaptureFrame) {
        self.pending.push_back(frame);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for QueuedSource {
    fn poll_frame(&mut self) -> Option<CaptureFrame> {
        self.pending.pop_front()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn poll_frame(&mut self) -> Option<CaptureFrame> {
        (**self).poll_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_source_drains_in_order_then_reports_no_frame() {
        let mut src = QueuedSource::new();
        src.enqueue(CaptureFrame::new(vec![Sample::new(Vec3::splat(1.0), Rgba::WHITE)]));
        src.enqueue(CaptureFrame::default());
        assert_eq!(src.pending(), 2);
        assert_eq!(src.poll_frame().map(|f| f.len()), Some(1));
        assert_eq!(src.poll_frame().map(|f| f.len()), Some(0));
        assert!(src.poll_frame().is_none());
    }
}
