//! Small value types shared by grids, buffers and compositors.
//!
//! Positions are physical-space `f64` triples; cells are addressed by integer
//! `CellIndex` triples inside a `Resolution`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SpaceTimeError};

/// 3D position in physical (capture) space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// Component-wise minimum.
    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// 8-bit RGBA color attached to every sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba([r, g, b, a])
    }

    #[inline]
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.0[3]
    }

    /// HSB brightness: the largest of the three color channels.
    #[inline]
    pub fn brightness(&self) -> u8 {
        self.r().max(self.g()).max(self.b())
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

impl From<[u8; 3]> for Rgba {
    fn from(c: [u8; 3]) -> Self {
        Rgba::rgb(c[0], c[1], c[2])
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Rgba(c)
    }
}

/// Integer cell coordinates inside a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl CellIndex {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

impl From<(usize, usize, usize)> for CellIndex {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Number of cells on each axis.
///
/// Construction is unchecked so mode tables can be `const`; grids call
/// [`Resolution::validate`] before allocating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Resolution {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    pub const fn cubic(n: usize) -> Self {
        Self::new(n, n, n)
    }

    pub fn validate(&self) -> Result<()> {
        if self.x == 0 || self.y == 0 || self.z == 0 {
            return Err(SpaceTimeError::InvalidResolution {
                x: self.x,
                y: self.y,
                z: self.z,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.x * self.y * self.z
    }

    #[inline]
    pub fn contains(&self, cell: CellIndex) -> bool {
        cell.x < self.x && cell.y < self.y && cell.z < self.z
    }

    /// Linear storage index, `z * x_len * y_len + y * x_len + x`.
    /// Callers must check [`Resolution::contains`] first.
    #[inline]
    pub fn linear_index(&self, cell: CellIndex) -> usize {
        cell.z * self.x * self.y + cell.y * self.x + cell.x
    }

    /// Every cell coordinate, x outermost and z innermost.
    pub fn cells(&self) -> Cells {
        Cells {
            res: *self,
            next: if self.cell_count() == 0 {
                None
            } else {
                Some(CellIndex::default())
            },
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// Iterator returned by [`Resolution::cells`].
#[derive(Clone, Debug)]
pub struct Cells {
    res: Resolution,
    next: Option<CellIndex>,
}

impl Iterator for Cells {
    type Item = CellIndex;

    fn next(&mut self) -> Option<CellIndex> {
        let current = self.next?;
        let mut n = current;
        n.z += 1;
        if n.z == self.res.z {
            n.z = 0;
            n.y += 1;
            if n.y == self.res.y {
                n.y = 0;
                n.x += 1;
            }
        }
        self.next = if n.x == self.res.x { None } else { Some(n) };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_index_is_z_major() {
        let res = Resolution::new(4, 3, 2);
        assert_eq!(res.linear_index(CellIndex::new(0, 0, 0)), 0);
        assert_eq!(res.linear_index(CellIndex::new(1, 0, 0)), 1);
        assert_eq!(res.linear_index(CellIndex::new(0, 1, 0)), 4);
        assert_eq!(res.linear_index(CellIndex::new(0, 0, 1)), 12);
        assert_eq!(res.linear_index(CellIndex::new(3, 2, 1)), 23);
    }

    #[test]
    fn cells_walk_x_outer_z_inner() {
        let res = Resolution::new(2, 2, 2);
        let cells: Vec<_> = res.cells().map(|c| (c.x, c.y, c.z)).collect();
        assert_eq!(
            cells,
            vec![
                (0, 0, 0),
                (0, 0, 1),
                (0, 1, 0),
                (0, 1, 1),
                (1, 0, 0),
                (1, 0, 1),
                (1, 1, 0),
                (1, 1, 1),
            ]
        );
    }

    #[test]
    fn cells_of_degenerate_resolution_is_empty() {
        assert_eq!(Resolution::new(3, 0, 2).cells().count(), 0);
        assert_eq!(Resolution::new(500, 1, 1).cells().count(), 500);
    }

    #[test]
    fn validate_rejects_zero_axis() {
        assert!(Resolution::new(1, 1, 1).validate().is_ok());
        let err = Resolution::new(2, 0, 2).validate().unwrap_err();
        assert_eq!(err, SpaceTimeError::InvalidResolution { x: 2, y: 0, z: 2 });
    }

    #[test]
    fn brightness_is_max_channel() {
        assert_eq!(Rgba::rgb(10, 200, 30).brightness(), 200);
        assert_eq!(Rgba::BLACK.brightness(), 0);
    }
}
