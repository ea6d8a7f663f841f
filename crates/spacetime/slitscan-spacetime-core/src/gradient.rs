//! Gradient modes: which moment in history each cell shows.
//!
//! Every mode carries a fixed grid resolution, a display name and a pure time
//! function over cell coordinates. Times are normalized: 0 is the newest frame
//! and 1 the oldest.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::vec::{CellIndex, Resolution};

/// Cells along the varying axis of the single-axis sweeps.
pub const SWEEP_CELLS: usize = 500;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientMode {
    #[default]
    MostRecent,
    LeftRight,
    RightLeft,
    TopBottom,
    BottomTop,
    FrontBack,
    BackFront,
    Spherical,
    Random,
    Oldest,
}

impl GradientMode {
    /// All modes in index order (0..=9).
    pub const ALL: [GradientMode; 10] = [
        GradientMode::MostRecent,
        GradientMode::LeftRight,
        GradientMode::RightLeft,
        GradientMode::TopBottom,
        GradientMode::BottomTop,
        GradientMode::FrontBack,
        GradientMode::BackFront,
        GradientMode::Spherical,
        GradientMode::Random,
        GradientMode::Oldest,
    ];

    /// Mode for a host-facing index. Anything outside 0..=9 selects
    /// `MostRecent`.
    pub fn from_index(index: i32) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or_default()
    }

    pub fn index(self) -> u8 {
        match self {
            GradientMode::MostRecent => 0,
            GradientMode::LeftRight => 1,
            GradientMode::RightLeft => 2,
            GradientMode::TopBottom => 3,
            GradientMode::BottomTop => 4,
            GradientMode::FrontBack => 5,
            GradientMode::BackFront => 6,
            GradientMode::Spherical => 7,
            GradientMode::Random => 8,
            GradientMode::Oldest => 9,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GradientMode::MostRecent => "most recent",
            GradientMode::LeftRight => "left-right",
            GradientMode::RightLeft => "right-left",
            GradientMode::TopBottom => "top-bottom",
            GradientMode::BottomTop => "bottom-top",
            GradientMode::FrontBack => "front-back",
            GradientMode::BackFront => "back-front",
            GradientMode::Spherical => "spherical",
            GradientMode::Random => "random",
            GradientMode::Oldest => "oldest",
        }
    }

    /// Grid resolution the mode composites at. Sweeps use a long thin grid
    /// along their axis; the constant modes only need a token grid.
    pub fn resolution(self) -> Resolution {
        match self {
            GradientMode::MostRecent | GradientMode::Oldest => Resolution::cubic(2),
            GradientMode::LeftRight | GradientMode::RightLeft => {
                Resolution::new(SWEEP_CELLS, 1, 1)
            }
            GradientMode::TopBottom | GradientMode::BottomTop => {
                Resolution::new(1, SWEEP_CELLS, 1)
            }
            GradientMode::FrontBack | GradientMode::BackFront => {
                Resolution::new(1, 1, SWEEP_CELLS)
            }
            GradientMode::Spherical => Resolution::cubic(30),
            GradientMode::Random => Resolution::cubic(40),
        }
    }

    /// Repeated composites over unchanged history give identical output for
    /// every mode except `Random`, which resamples each cell on every pass.
    pub fn is_deterministic(self) -> bool {
        !matches!(self, GradientMode::Random)
    }

    /// Time for `cell` before clamping. Spherical reaches 3.0 in the corners.
    pub fn raw_time<R: Rng + ?Sized>(
        self,
        cell: CellIndex,
        res: Resolution,
        rng: &mut R,
    ) -> f32 {
        match self {
            GradientMode::MostRecent => 0.0,
            GradientMode::LeftRight => fraction(cell.x, res.x),
            GradientMode::RightLeft => 1.0 - fraction(cell.x, res.x),
            GradientMode::TopBottom => fraction(cell.y, res.y),
            GradientMode::BottomTop => 1.0 - fraction(cell.y, res.y),
            GradientMode::FrontBack => fraction(cell.z, res.z),
            GradientMode::BackFront => 1.0 - fraction(cell.z, res.z),
            GradientMode::Spherical => {
                // squared distance from the centre, no sqrt
                let nx = centred(cell.x, res.x);
                let ny = centred(cell.y, res.y);
                let nz = centred(cell.z, res.z);
                nx * nx + ny * ny + nz * nz
            }
            GradientMode::Random => rng.gen::<f32>(),
            GradientMode::Oldest => 1.0,
        }
    }

    /// Time for `cell`, clamped to [0, 1].
    pub fn time_for<R: Rng + ?Sized>(
        self,
        cell: CellIndex,
        res: Resolution,
        rng: &mut R,
    ) -> f32 {
        let t = self.raw_time(cell, res, rng);
        if t.is_nan() {
            return 0.0;
        }
        t.clamp(0.0, 1.0)
    }
}

#[inline]
fn fraction(i: usize, n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    i as f32 / n as f32
}

/// Map `0..n` onto [-1, 1] so the first and last cells sit on the edges.
/// A single-cell axis sits at the centre.
#[inline]
fn centred(i: usize, n: usize) -> f32 {
    if n <= 1 {
        return 0.0;
    }
    i as f32 / (n - 1) as f32 * 2.0 - 1.0
}

impl fmt::Display for GradientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GradientMode {
    type Err = String;

    /// Accepts an index ("7"), a display name ("most recent") or the serde
    /// name ("most-recent").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(i) = s.parse::<u8>() {
            return Self::ALL
                .get(i as usize)
                .copied()
                .ok_or_else(|| format!("gradient mode index {i} out of range 0-9"));
        }
        let wanted = s.replace(' ', "-").to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().replace(' ', "-") == wanted)
            .ok_or_else(|| format!("unknown gradient mode '{s}'"))
    }
}
