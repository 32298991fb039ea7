//! Orthogonal slice planes and borrowed 2D views into volumes.

use std::fmt;
use std::str::FromStr;

use crate::dims::{Dims, PlaneDims};
use crate::error::GridError;
use crate::index::{GridIndex, PlaneIndex};
use crate::volume::{Grid, GridMut, Volume};

/// One of the three orthogonal planes through a volume.
///
/// The name lists the two axes the plane spans; the remaining axis is the
/// plane normal and selects the slice.
///
/// | Plane | Fixed axis | `u` | `v` |
/// |-------|------------|-----|-----|
/// | `JK`  | `i`        | `j` | `k` |
/// | `IK`  | `j`        | `i` | `k` |
/// | `IJ`  | `k`        | `i` | `j` |
///
/// # Example
///
/// ```
/// use label_grid::{GridIndex, PlaneIndex, SlicePlane};
///
/// let index = GridIndex::new(4, 5, 6);
/// assert_eq!(SlicePlane::IK.project(index), PlaneIndex::new(4, 6));
/// assert_eq!(SlicePlane::IK.depth(index), 5);
/// assert_eq!(SlicePlane::IK.lift(PlaneIndex::new(4, 6), 5), index);
///
/// let plane: SlicePlane = "jk".parse().unwrap();
/// assert_eq!(plane, SlicePlane::JK);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlicePlane {
    /// Plane spanned by `j` and `k` (fixed `i`).
    JK,
    /// Plane spanned by `i` and `k` (fixed `j`).
    IK,
    /// Plane spanned by `i` and `j` (fixed `k`).
    #[default]
    IJ,
}

impl SlicePlane {
    /// All three planes.
    pub const ALL: [Self; 3] = [Self::JK, Self::IK, Self::IJ];

    /// Short name of the plane.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::JK => "JK",
            Self::IK => "IK",
            Self::IJ => "IJ",
        }
    }

    /// Drops the normal axis of `index`.
    #[must_use]
    pub const fn project(self, index: GridIndex) -> PlaneIndex {
        match self {
            Self::JK => PlaneIndex::new(index.j, index.k),
            Self::IK => PlaneIndex::new(index.i, index.k),
            Self::IJ => PlaneIndex::new(index.i, index.j),
        }
    }

    /// Component of `index` along the plane normal.
    #[must_use]
    pub const fn depth(self, index: GridIndex) -> i32 {
        match self {
            Self::JK => index.i,
            Self::IK => index.j,
            Self::IJ => index.k,
        }
    }

    /// Rebuilds a volume index from a plane index and a depth.
    #[must_use]
    pub const fn lift(self, index: PlaneIndex, depth: i32) -> GridIndex {
        match self {
            Self::JK => GridIndex::new(depth, index.u, index.v),
            Self::IK => GridIndex::new(index.u, depth, index.v),
            Self::IJ => GridIndex::new(index.u, index.v, depth),
        }
    }

    /// In-plane extent of a volume with dimensions `dims`.
    #[must_use]
    pub const fn plane_dims(self, dims: Dims) -> PlaneDims {
        match self {
            Self::JK => PlaneDims::new(dims.nj, dims.nk),
            Self::IK => PlaneDims::new(dims.ni, dims.nk),
            Self::IJ => PlaneDims::new(dims.ni, dims.nj),
        }
    }
}

impl fmt::Display for SlicePlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SlicePlane {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, GridError> {
        Self::ALL
            .into_iter()
            .find(|plane| plane.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GridError::UnknownPlane(s.to_string()))
    }
}

/// Read-only 2D view of one slice of a [`Volume`].
#[derive(Debug, Clone, Copy)]
pub struct PlaneView<'a, T> {
    volume: &'a Volume<T>,
    plane: SlicePlane,
    depth: i32,
    dims: PlaneDims,
}

impl<'a, T> PlaneView<'a, T> {
    pub(crate) fn new(volume: &'a Volume<T>, plane: SlicePlane, depth: i32) -> Self {
        Self {
            volume,
            plane,
            depth,
            dims: plane.plane_dims(volume.dims()),
        }
    }

    /// The plane this view lies on.
    #[must_use]
    pub const fn plane(&self) -> SlicePlane {
        self.plane
    }

    /// Position of the slice along the plane normal.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// In-plane extent.
    #[must_use]
    pub const fn dims(&self) -> PlaneDims {
        self.dims
    }

    /// Returns the sample at `index`, or `None` outside the slice.
    #[must_use]
    pub fn get(&self, index: PlaneIndex) -> Option<&'a T> {
        if !self.dims.contains(index) {
            return None;
        }
        self.volume.get(self.plane.lift(index, self.depth))
    }
}

impl<T> Grid for PlaneView<'_, T> {
    type Lattice = PlaneDims;
    type Value = T;

    fn lattice(&self) -> PlaneDims {
        self.dims
    }

    fn get(&self, index: PlaneIndex) -> Option<&T> {
        PlaneView::get(self, index)
    }
}

/// Mutable 2D view of one slice of a [`Volume`].
///
/// Writes through the view land in the underlying volume; cells outside
/// the slice cannot be reached.
///
/// # Example
///
/// ```
/// use label_grid::{Dims, GridIndex, PlaneIndex, SlicePlane, Volume};
///
/// let mut labels: Volume<u32> = Volume::new(Dims::new(3, 3, 3), 0);
/// {
///     let mut slice = labels.plane_mut(SlicePlane::JK, 2).unwrap();
///     slice.set(PlaneIndex::new(1, 0), 9).unwrap();
/// }
/// assert_eq!(labels.get(GridIndex::new(2, 1, 0)), Some(&9));
/// ```
#[derive(Debug)]
pub struct PlaneViewMut<'a, T> {
    volume: &'a mut Volume<T>,
    plane: SlicePlane,
    depth: i32,
    dims: PlaneDims,
}

impl<'a, T> PlaneViewMut<'a, T> {
    pub(crate) fn new(volume: &'a mut Volume<T>, plane: SlicePlane, depth: i32) -> Self {
        let dims = plane.plane_dims(volume.dims());
        Self {
            volume,
            plane,
            depth,
            dims,
        }
    }

    /// The plane this view lies on.
    #[must_use]
    pub const fn plane(&self) -> SlicePlane {
        self.plane
    }

    /// Position of the slice along the plane normal.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// In-plane extent.
    #[must_use]
    pub const fn dims(&self) -> PlaneDims {
        self.dims
    }

    /// Returns the sample at `index`, or `None` outside the slice.
    #[must_use]
    pub fn get(&self, index: PlaneIndex) -> Option<&T> {
        if !self.dims.contains(index) {
            return None;
        }
        self.volume.get(self.plane.lift(index, self.depth))
    }

    /// Returns a mutable reference to the sample at `index`.
    #[must_use]
    pub fn get_mut(&mut self, index: PlaneIndex) -> Option<&mut T> {
        if !self.dims.contains(index) {
            return None;
        }
        self.volume.get_mut(self.plane.lift(index, self.depth))
    }

    /// Overwrites the sample at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] (with the lifted volume index) if
    /// `index` lies outside the slice.
    pub fn set(&mut self, index: PlaneIndex, value: T) -> Result<(), GridError> {
        let lifted = self.plane.lift(index, self.depth);
        let slot = self
            .get_mut(index)
            .ok_or(GridError::OutOfBounds { index: lifted })?;
        *slot = value;
        Ok(())
    }
}

impl<T> Grid for PlaneViewMut<'_, T> {
    type Lattice = PlaneDims;
    type Value = T;

    fn lattice(&self) -> PlaneDims {
        self.dims
    }

    fn get(&self, index: PlaneIndex) -> Option<&T> {
        PlaneViewMut::get(self, index)
    }
}

impl<T> GridMut for PlaneViewMut<'_, T> {
    fn get_mut(&mut self, index: PlaneIndex) -> Option<&mut T> {
        PlaneViewMut::get_mut(self, index)
    }
}
