//! Per-cell payloads.
//!
//! A grid stores one payload per cell. Bucketing appends samples into a
//! payload; compositing appends whole payloads onto an output payload.

use serde::{Deserialize, Serialize};

use crate::vec::{Rgba, Vec3};

/// Contract every cell payload satisfies.
pub trait CellPayload: Default {
    /// Append one sample to this cell.
    fn push_sample(&mut self, position: Vec3, color: Rgba);

    /// Append every sample held by `other`, preserving order.
    fn extend_from(&mut self, other: &Self);

    /// Number of samples held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all samples, keeping allocations where possible.
    fn clear(&mut self);
}

/// Ordered positions with index-aligned colors.
///
/// `positions().len() == colors().len()` always holds; the fields are private
/// so the two sequences can only grow together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointBatch {
    positions: Vec<Vec3>,
    colors: Vec<Rgba>,
}

impl PointBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            positions: Vec::with_capacity(n),
            colors: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn push(&mut self, position: Vec3, color: Rgba) {
        self.positions.push(position);
        self.colors.push(color);
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Rgba)> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.colors.iter().copied())
    }

    /// Split into `(positions, colors)` for renderers that want flat arrays.
    pub fn into_parts(self) -> (Vec<Vec3>, Vec<Rgba>) {
        (self.positions, self.colors)
    }
}

impl CellPayload for PointBatch {
    #[inline]
    fn push_sample(&mut self, position: Vec3, color: Rgba) {
        self.push(position, color);
    }

    fn extend_from(&mut self, other: &Self) {
        self.positions.extend_from_slice(&other.positions);
        self.colors.extend_from_slice(&other.colors);
    }

    #[inline]
    fn len(&self) -> usize {
        PointBatch::len(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        PointBatch::is_empty(self)
    }

    fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
    }
}

impl FromIterator<(Vec3, Rgba)> for PointBatch {
    fn from_iter<I: IntoIterator<Item = (Vec3, Rgba)>>(iter: I) -> Self {
        let mut batch = PointBatch::new();
        batch.extend(iter);
        batch
    }
}

impl Extend<(Vec3, Rgba)> for PointBatch {
    fn extend<I: IntoIterator<Item = (Vec3, Rgba)>>(&mut self, iter: I) {
        for (p, c) in iter {
            self.push(p, c);
        }
    }
}
