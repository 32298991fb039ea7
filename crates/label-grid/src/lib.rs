//! Dense grids for label-map editing.
//!
//! This crate provides the storage and addressing used by the region-grow
//! engine in `label-grow`:
//!
//! - [`Volume`] - Dense 3D grid of samples (background intensities or labels)
//! - [`GridIndex`] / [`PlaneIndex`] - Signed 3D and 2D indices
//! - [`Dims`] / [`PlaneDims`] - Grid extents and storage offsets
//! - [`SlicePlane`] - The `JK`, `IK` and `IJ` orthogonal planes
//! - [`PlaneView`] / [`PlaneViewMut`] - Borrowed 2D slices of a volume
//! - [`Lattice`], [`Grid`], [`GridMut`] - Addressing shared by 2D and 3D grids
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no GUI or host-application dependencies.
//!
//! # Index Conventions
//!
//! Volumes are addressed as `(i, j, k)` with `i` varying fastest in memory.
//! Indices are `i32` so a neighbour of a border cell can be formed and then
//! rejected by a bounds check.
//!
//! # Example
//!
//! ```
//! use label_grid::{Dims, GridIndex, PlaneIndex, SlicePlane, Volume};
//!
//! let background = Volume::from_fn(Dims::new(8, 8, 4), |idx| idx.i as f32);
//! let slice = background.plane(SlicePlane::IJ, 2).unwrap();
//!
//! assert_eq!(slice.dims().nu, 8);
//! assert_eq!(slice.get(PlaneIndex::new(3, 5)), Some(&3.0));
//! assert_eq!(background.get(GridIndex::new(3, 5, 2)), Some(&3.0));
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for indices, dimensions, planes and
//!   volumes. Deserialized volumes are checked against their dimensions.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod dims;
mod error;
mod index;
mod plane;
mod volume;

pub use dims::{Dims, DimsIter, Lattice, PlaneDims};
pub use error::GridError;
pub use index::{GridIndex, PlaneIndex};
pub use plane::{PlaneView, PlaneViewMut, SlicePlane};
pub use volume::{Grid, GridMut, Volume};

// Re-export nalgebra types for convenience
pub use nalgebra::Point3;
