//! Physical-space bounding box and the linear range mapping used to place
//! samples into cells.

use serde::{Deserialize, Serialize};

use crate::vec::{CellIndex, Resolution, Vec3};

/// Axis-aligned physical region covered by a grid.
///
/// `min == max` on an axis is allowed; every position then lands in cell 0 of
/// that axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// True when `min <= max` on every axis.
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn contains(&self, p: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }

    /// Cell holding `p`, saturating to the nearest edge cell outside the box.
    ///
    /// Each axis maps `[min, max]` onto `[0, cells]` and floors, so every cell
    /// covers the same physical width.
    pub fn cell_for(&self, p: Vec3, res: Resolution) -> CellIndex {
        CellIndex::new(
            axis_cell(p.x, self.min.x, self.max.x, res.x),
            axis_cell(p.y, self.min.y, self.max.y, res.y),
            axis_cell(p.z, self.min.z, self.max.z, res.z),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }
}

/// Linearly map `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// A zero-width input range yields `out_min`. With `clamp` the result is
/// limited to the output range, whichever way round it runs.
pub fn map_range(
    value: f64,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
    clamp: bool,
) -> f64 {
    if (in_max - in_min).abs() < f64::EPSILON {
        return out_min;
    }
    let out = (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min;
    if !clamp {
        return out;
    }
    if out_max < out_min {
        out.clamp(out_max, out_min)
    } else {
        out.clamp(out_min, out_max)
    }
}

// Cells are equal-width slices of [min, max]; `max` itself falls in the last cell.
fn axis_cell(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if cells <= 1 {
        return 0;
    }
    let mapped = map_range(value, min, max, 0.0, cells as f64, true);
    if mapped.is_nan() {
        return 0;
    }
    (mapped.floor() as usize).min(cells - 1)
}
