//! Gradient compositing: rebuild one payload by picking, for every cell, the
//! historical frame its gradient time points at.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::buffer::TemporalBuffer;
use crate::error::{Result, SpaceTimeError};
use crate::gradient::GradientMode;
use crate::payload::CellPayload;
use crate::vec::Resolution;

/// Counters from one compositing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeStats {
    /// Cells visited.
    pub cells: usize,
    /// Cells whose selected frame held at least one sample.
    pub filled_cells: usize,
    /// Samples appended to the output.
    pub samples: usize,
    /// Frames available to the pass.
    pub frames: usize,
}

/// Composites a history at the resolution fixed by its gradient mode.
///
/// Holds no state besides the mode; changing mode means building a new
/// compositor and clearing the history it reads from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GradientCompositor {
    mode: GradientMode,
}

impl GradientCompositor {
    pub fn new(mode: GradientMode) -> Self {
        Self { mode }
    }

    #[inline]
    pub fn mode(&self) -> GradientMode {
        self.mode
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.mode.resolution()
    }

    /// Composite into a fresh payload. An empty history yields an empty payload.
    pub fn composite<T, R>(&self, buffer: &TemporalBuffer<T>, rng: &mut R) -> Result<T>
    where
        T: CellPayload,
        R: Rng + ?Sized,
    {
        let mut out = T::default();
        self.composite_into(buffer, &mut out, rng)?;
        Ok(out)
    }

    /// Clear `out` and composite into it, reusing its allocation.
    pub fn composite_into<T, R>(
        &self,
        buffer: &TemporalBuffer<T>,
        out: &mut T,
        rng: &mut R,
    ) -> Result<CompositeStats>
    where
        T: CellPayload,
        R: Rng + ?Sized,
    {
        composite_into(buffer, self.resolution(), self.mode, out, rng)
    }
}

/// Composite `buffer` at `resolution` under `mode` into a fresh payload.
pub fn composite<T, R>(
    buffer: &TemporalBuffer<T>,
    resolution: Resolution,
    mode: GradientMode,
    rng: &mut R,
) -> Result<T>
where
    T: CellPayload,
    R: Rng + ?Sized,
{
    let mut out = T::default();
    composite_into(buffer, resolution, mode, &mut out, rng)?;
    Ok(out)
}

/// Walk every cell of `resolution` (x outer, z inner), resolve its gradient
/// time to a frame and append that frame's cell onto `out`.
///
/// Every frame in the history must have been built at `resolution`; stale
/// frames from another resolution fail with `ResolutionMismatch` before any
/// output is written.
pub fn composite_into<T, R>(
    buffer: &TemporalBuffer<T>,
    resolution: Resolution,
    mode: GradientMode,
    out: &mut T,
    rng: &mut R,
) -> Result<CompositeStats>
where
    T: CellPayload,
    R: Rng + ?Sized,
{
    out.clear();
    let mut stats = CompositeStats {
        frames: buffer.len(),
        ..CompositeStats::default()
    };
    if buffer.is_empty() {
        return Ok(stats);
    }
    if let Some(stale) = buffer.iter().find(|g| g.resolution() != resolution) {
        return Err(SpaceTimeError::ResolutionMismatch {
            expected: resolution,
            found: stale.resolution(),
        });
    }

    for cell in resolution.cells() {
        let t = mode.time_for(cell, resolution, rng);
        let frame = buffer.frame_at_time(t)?;
        let payload = frame.cell(cell)?;
        stats.cells += 1;
        if payload.is_empty() {
            continue;
        }
        stats.filled_cells += 1;
        stats.samples += payload.len();
        out.extend_from(payload);
    }
    log::trace!(
        "composite {} over {} frames: {} samples from {} of {} cells",
        mode,
        stats.frames,
        stats.samples,
        stats.filled_cells,
        stats.cells
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;
    use crate::grid::VoxelGrid;
    use crate::payload::PointBatch;
    use crate::vec::{Rgba, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_history_composites_to_nothing() {
        let buf = TemporalBuffer::<PointBatch>::new(4).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut out = PointBatch::new();
        out.push(Vec3::splat(1.0), Rgba::WHITE);
        let stats = GradientCompositor::new(GradientMode::Spherical)
            .composite_into(&buf, &mut out, &mut rng)
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(stats, CompositeStats::default());
    }

    #[test]
    fn stale_resolution_is_rejected() {
        let mut buf = TemporalBuffer::new(2).unwrap();
        let grid: VoxelGrid =
            VoxelGrid::new(Resolution::new(3, 1, 1), Bounds::default()).unwrap();
        buf.push(grid);
        let mut rng = StdRng::seed_from_u64(0);
        let err = GradientCompositor::new(GradientMode::LeftRight)
            .composite(&buf, &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            SpaceTimeError::ResolutionMismatch {
                expected: Resolution::new(500, 1, 1),
                found: Resolution::new(3, 1, 1),
            }
        );
    }
}
