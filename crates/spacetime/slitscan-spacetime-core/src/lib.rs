//! slitscan-spacetime-core: the space-time continuum behind the slit-scan effect.
//!
//! A [`VoxelGrid`] buckets one frame of point samples by physical position. A
//! [`TemporalBuffer`] keeps a bounded, newest-first history of those grids.
//! [`GradientCompositor`] rebuilds a single point cloud by letting every cell
//! pick a moment in that history according to a [`GradientMode`].
//!
//! The crate is engine-agnostic: capture and rendering live elsewhere.

pub mod bounds;
pub mod buffer;
pub mod composite;
pub mod error;
pub mod gradient;
pub mod grid;
pub mod payload;
pub mod vec;

pub use bounds::{map_range, Bounds};
pub use buffer::TemporalBuffer;
pub use composite::{composite, composite_into, CompositeStats, GradientCompositor};
pub use error::{Result, SpaceTimeError};
pub use gradient::{GradientMode, SWEEP_CELLS};
pub use grid::VoxelGrid;
pub use payload::{CellPayload, PointBatch};
pub use vec::{CellIndex, Resolution, Rgba, Vec3};
