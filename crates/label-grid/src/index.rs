//! Integer grid indices.

use nalgebra::Point3;

/// A discrete 3D index into a volume, in `(i, j, k)` order.
///
/// Components are signed so that neighbours of border cells (for example
/// `i = -1`) can be represented and rejected by a bounds check instead of
/// wrapping around.
///
/// # Example
///
/// ```
/// use label_grid::GridIndex;
///
/// let index = GridIndex::new(1, 2, 3);
/// assert_eq!(index.as_array(), [1, 2, 3]);
///
/// let below = GridIndex::new(0, 0, 0).face_neighbors();
/// assert!(below.contains(&GridIndex::new(-1, 0, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridIndex {
    /// Index along the fastest-varying axis.
    pub i: i32,
    /// Index along the middle axis.
    pub j: i32,
    /// Index along the slowest-varying axis.
    pub k: i32,
}

impl GridIndex {
    /// Creates a new index.
    #[must_use]
    pub const fn new(i: i32, j: i32, k: i32) -> Self {
        Self { i, j, k }
    }

    /// The index `(0, 0, 0)`.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the index as an `[i, j, k]` array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.i, self.j, self.k]
    }

    /// Rounds a continuous index-space point to the nearest grid index.
    ///
    /// Each axis rounds half-way cases to the even neighbour. Components that
    /// are not finite map to `0`, and values beyond the `i32` range saturate.
    ///
    /// # Example
    ///
    /// ```
    /// use label_grid::GridIndex;
    /// use nalgebra::Point3;
    ///
    /// let index = GridIndex::from_point_rounded(Point3::new(1.4, 2.5, f64::NAN));
    /// assert_eq!(index, GridIndex::new(1, 2, 0));
    /// ```
    #[must_use]
    pub fn from_point_rounded(point: Point3<f64>) -> Self {
        Self::new(round_axis(point.x), round_axis(point.y), round_axis(point.z))
    }

    /// Returns the 6 face-adjacent neighbours (6-connectivity).
    ///
    /// Neighbours are not bounds-checked; callers filter them against the
    /// grid they are walking.
    #[must_use]
    pub const fn face_neighbors(self) -> [Self; 6] {
        [
            Self::new(self.i.wrapping_sub(1), self.j, self.k),
            Self::new(self.i.wrapping_add(1), self.j, self.k),
            Self::new(self.i, self.j.wrapping_sub(1), self.k),
            Self::new(self.i, self.j.wrapping_add(1), self.k),
            Self::new(self.i, self.j, self.k.wrapping_sub(1)),
            Self::new(self.i, self.j, self.k.wrapping_add(1)),
        ]
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_axis(value: f64) -> i32 {
    if value.is_finite() {
        // Float to int casts saturate at the i32 limits.
        value.round_ties_even() as i32
    } else {
        0
    }
}

impl From<(i32, i32, i32)> for GridIndex {
    fn from((i, j, k): (i32, i32, i32)) -> Self {
        Self::new(i, j, k)
    }
}

impl From<[i32; 3]> for GridIndex {
    fn from([i, j, k]: [i32; 3]) -> Self {
        Self::new(i, j, k)
    }
}

impl From<GridIndex> for [i32; 3] {
    fn from(index: GridIndex) -> Self {
        index.as_array()
    }
}

impl From<PlaneIndex> for GridIndex {
    /// Embeds a plane index as `(u, v, 0)`.
    fn from(index: PlaneIndex) -> Self {
        Self::new(index.u, index.v, 0)
    }
}

/// A discrete 2D index into a slice plane, in `(u, v)` order.
///
/// `u` is the faster-varying in-plane axis. Which volume axes `u` and `v`
/// correspond to is decided by the [`SlicePlane`](crate::SlicePlane).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneIndex {
    /// Index along the faster in-plane axis.
    pub u: i32,
    /// Index along the slower in-plane axis.
    pub v: i32,
}

impl PlaneIndex {
    /// Creates a new plane index.
    #[must_use]
    pub const fn new(u: i32, v: i32) -> Self {
        Self { u, v }
    }

    /// Returns the index as a `[u, v]` array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 2] {
        [self.u, self.v]
    }

    /// Returns the 4 edge-adjacent neighbours (4-connectivity).
    ///
    /// # Example
    ///
    /// ```
    /// use label_grid::PlaneIndex;
    ///
    /// let neighbors = PlaneIndex::new(0, 0).edge_neighbors();
    /// assert_eq!(neighbors.len(), 4);
    /// assert!(!neighbors.contains(&PlaneIndex::new(1, 1)));
    /// ```
    #[must_use]
    pub const fn edge_neighbors(self) -> [Self; 4] {
        [
            Self::new(self.u.wrapping_sub(1), self.v),
            Self::new(self.u.wrapping_add(1), self.v),
            Self::new(self.u, self.v.wrapping_sub(1)),
            Self::new(self.u, self.v.wrapping_add(1)),
        ]
    }
}

impl From<(i32, i32)> for PlaneIndex {
    fn from((u, v): (i32, i32)) -> Self {
        Self::new(u, v)
    }
}

impl From<[i32; 2]> for PlaneIndex {
    fn from([u, v]: [i32; 2]) -> Self {
        Self::new(u, v)
    }
}
