//! TemporalBuffer: bounded, newest-first history of grids.
//!
//! Frame 0 is always the most recent grid and `len() - 1` the oldest. The
//! buffer owns every grid it holds; eviction and `clear` drop them.

use std::collections::VecDeque;

use crate::error::{Result, SpaceTimeError};
use crate::grid::VoxelGrid;
use crate::payload::PointBatch;

#[derive(Debug)]
pub struct TemporalBuffer<T = PointBatch> {
    capacity: usize,
    frames: VecDeque<VoxelGrid<T>>,
}

impl<T> TemporalBuffer<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SpaceTimeError::InvalidCapacity { capacity });
        }
        Ok(Self {
            capacity,
            frames: VecDeque::with_capacity(capacity.min(1024)),
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the eviction threshold. Frames above the new capacity are kept
    /// until the next [`TemporalBuffer::push`].
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(SpaceTimeError::InvalidCapacity { capacity });
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Insert `grid` as frame 0 and evict from the back until within capacity.
    /// Returns how many frames were evicted.
    pub fn push(&mut self, grid: VoxelGrid<T>) -> usize {
        self.frames.push_front(grid);
        let mut evicted = 0;
        while self.frames.len() > self.capacity {
            self.frames.pop_back();
            evicted += 1;
        }
        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame_at(&self, index: usize) -> Result<&VoxelGrid<T>> {
        self.frames.get(index).ok_or(SpaceTimeError::IndexOutOfRange {
            index,
            len: self.frames.len(),
        })
    }

    /// Frame index for normalized time `t` (0 = newest, 1 = oldest):
    /// `floor(t * (len - 1))`. A single-frame history resolves every `t` to 0.
    ///
    /// `t` is not clamped; values above 1 fail with `IndexOutOfRange`, negative
    /// or NaN values with `InvalidTime`.
    pub fn frame_index_for_time(&self, t: f32) -> Result<usize> {
        time_to_index(t, self.frames.len())
    }

    pub fn frame_at_time(&self, t: f32) -> Result<&VoxelGrid<T>> {
        let index = self.frame_index_for_time(t)?;
        self.frame_at(index)
    }

    /// Most recently pushed grid.
    pub fn newest(&self) -> Option<&VoxelGrid<T>> {
        self.frames.front()
    }

    pub fn oldest(&self) -> Option<&VoxelGrid<T>> {
        self.frames.back()
    }

    /// Frames newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &VoxelGrid<T>> {
        self.frames.iter()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

// Scaled in f64 so indices stay exact past 2^24 frames.
fn time_to_index(t: f32, len: usize) -> Result<usize> {
    if len == 0 {
        return Err(SpaceTimeError::EmptyBuffer);
    }
    let scaled = (f64::from(t) * (len - 1) as f64).floor();
    if scaled.is_nan() || scaled < 0.0 {
        return Err(SpaceTimeError::InvalidTime { t });
    }
    let index = scaled as usize;
    if index >= len {
        return Err(SpaceTimeError::IndexOutOfRange { index, len });
    }
    Ok(index)
}
