//! VoxelGrid: one snapshot of space, a dense 3D array of cell payloads over a
//! physical bounding box.

use crate::bounds::Bounds;
use crate::error::{Result, SpaceTimeError};
use crate::payload::{CellPayload, PointBatch};
use crate::vec::{CellIndex, Resolution, Rgba, Vec3};

#[derive(Clone, Debug)]
pub struct VoxelGrid<T = PointBatch> {
    resolution: Resolution,
    bounds: Bounds,
    cells: Vec<T>,
}

impl<T: Default> VoxelGrid<T> {
    /// Allocate `resolution.cell_count()` empty cells over `bounds`.
    pub fn new(resolution: Resolution, bounds: Bounds) -> Result<Self> {
        resolution.validate()?;
        let cells = std::iter::repeat_with(T::default)
            .take(resolution.cell_count())
            .collect();
        Ok(Self {
            resolution,
            bounds,
            cells,
        })
    }
}

impl<T> VoxelGrid<T> {
    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Cell containing `p`. Positions outside the bounds saturate to the
    /// nearest edge cell, so the result is always addressable.
    #[inline]
    pub fn index_for_position(&self, p: Vec3) -> CellIndex {
        self.bounds.cell_for(p, self.resolution)
    }

    fn slot(&self, cell: CellIndex) -> Result<usize> {
        if !self.resolution.contains(cell) {
            return Err(SpaceTimeError::OutOfBounds {
                cell,
                resolution: self.resolution,
            });
        }
        Ok(self.resolution.linear_index(cell))
    }

    pub fn cell(&self, cell: CellIndex) -> Result<&T> {
        let i = self.slot(cell)?;
        Ok(&self.cells[i])
    }

    pub fn cell_mut(&mut self, cell: CellIndex) -> Result<&mut T> {
        let i = self.slot(cell)?;
        Ok(&mut self.cells[i])
    }

    #[inline]
    pub fn cell_at(&self, x: usize, y: usize, z: usize) -> Result<&T> {
        self.cell(CellIndex::new(x, y, z))
    }

    #[inline]
    pub fn cell_at_mut(&mut self, x: usize, y: usize, z: usize) -> Result<&mut T> {
        self.cell_mut(CellIndex::new(x, y, z))
    }

    /// Cells in storage order (z-major).
    pub fn cells(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }
}

impl<T: CellPayload> VoxelGrid<T> {
    /// Bucket one sample into the cell that contains its position.
    pub fn append_sample(&mut self, position: Vec3, color: Rgba) -> CellIndex {
        let cell = self.index_for_position(position);
        let i = self.resolution.linear_index(cell);
        self.cells[i].push_sample(position, color);
        cell
    }

    /// Bucket every sample from an iterator.
    pub fn extend_samples<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = (Vec3, Rgba)>,
    {
        for (p, c) in samples {
            self.append_sample(p, c);
        }
    }

    /// Total samples across all cells.
    pub fn sample_count(&self) -> usize {
        self.cells.iter().map(CellPayload::len).sum()
    }

    /// Number of cells holding at least one sample.
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}
