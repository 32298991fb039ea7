//! Grid extents and the addressing they imply.

use std::fmt;

use crate::error::GridError;
use crate::index::{GridIndex, PlaneIndex};

/// Addressing shared by 2D and 3D grids.
///
/// A lattice maps its index type onto dense cell numbers in `0..cell_count()`
/// and knows which indices are axis-aligned neighbours. Neighbours are
/// produced without bounds checks; [`Lattice::cell`] is the bounds check.
pub trait Lattice: Copy + PartialEq + fmt::Debug {
    /// Index type used to address cells.
    type Index: Copy + fmt::Debug + Into<GridIndex>;
    /// Fixed-size collection of neighbours.
    type Neighbors: IntoIterator<Item = Self::Index>;

    /// Extent expressed as 3D dimensions (2D lattices report `nk = 1`).
    fn extent(&self) -> Dims;

    /// Total number of cells.
    fn cell_count(&self) -> usize;

    /// Dense cell number of `index`, or `None` if it lies outside.
    fn cell(&self, index: Self::Index) -> Option<usize>;

    /// Axis-aligned neighbours of `index`.
    fn neighbors(&self, index: Self::Index) -> Self::Neighbors;
}

/// Extent of a 3D volume along the `i`, `j` and `k` axes.
///
/// Cells are stored with `i` varying fastest, then `j`, then `k`.
///
/// # Example
///
/// ```
/// use label_grid::{Dims, GridIndex};
///
/// let dims = Dims::new(4, 3, 2);
/// assert_eq!(dims.len(), 24);
/// assert_eq!(dims.offset(GridIndex::new(1, 2, 1)), Some(1 + 4 * (2 + 3 * 1)));
/// assert_eq!(dims.offset(GridIndex::new(4, 0, 0)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    /// Extent along `i`.
    pub ni: usize,
    /// Extent along `j`.
    pub nj: usize,
    /// Extent along `k`.
    pub nk: usize,
}

impl Dims {
    /// Creates dimensions without validation.
    #[must_use]
    pub const fn new(ni: usize, nj: usize, nk: usize) -> Self {
        Self { ni, nj, nk }
    }

    /// Creates dimensions, rejecting zero extents and cell counts that
    /// overflow `usize` or axes longer than `i32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] for an unusable extent.
    pub fn try_new(ni: usize, nj: usize, nk: usize) -> Result<Self, GridError> {
        let addressable = |n: usize| n > 0 && i32::try_from(n).is_ok();
        let fits = ni.checked_mul(nj).and_then(|n| n.checked_mul(nk)).is_some();
        if addressable(ni) && addressable(nj) && addressable(nk) && fits {
            Ok(Self::new(ni, nj, nk))
        } else {
            Err(GridError::InvalidDimensions { ni, nj, nk })
        }
    }

    /// Number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ni.saturating_mul(self.nj).saturating_mul(self.nk)
    }

    /// Returns `true` if any axis has zero extent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `[ni, nj, nk]`.
    #[must_use]
    pub const fn as_array(&self) -> [usize; 3] {
        [self.ni, self.nj, self.nk]
    }

    /// Checks whether `index` lies inside the volume.
    #[must_use]
    pub fn contains(&self, index: GridIndex) -> bool {
        self.offset(index).is_some()
    }

    /// Linear storage offset of `index`, or `None` if it lies outside.
    #[must_use]
    pub fn offset(&self, index: GridIndex) -> Option<usize> {
        let i = axis(index.i, self.ni)?;
        let j = axis(index.j, self.nj)?;
        let k = axis(index.k, self.nk)?;
        Some(i + self.ni * (j + self.nj * k))
    }

    /// Inverse of [`Dims::offset`].
    #[must_use]
    pub fn index_of(&self, offset: usize) -> Option<GridIndex> {
        if offset >= self.len() {
            return None;
        }
        let i = offset % self.ni;
        let rest = offset / self.ni;
        let j = rest % self.nj;
        let k = rest / self.nj;
        Some(GridIndex::new(
            i32::try_from(i).ok()?,
            i32::try_from(j).ok()?,
            i32::try_from(k).ok()?,
        ))
    }

    /// Iterates over every index in storage order.
    ///
    /// # Example
    ///
    /// ```
    /// use label_grid::{Dims, GridIndex};
    ///
    /// let all: Vec<_> = Dims::new(2, 2, 1).iter().collect();
    /// assert_eq!(all[1], GridIndex::new(1, 0, 0));
    /// assert_eq!(all.len(), 4);
    /// ```
    #[must_use]
    pub const fn iter(&self) -> DimsIter {
        DimsIter {
            dims: *self,
            next: 0,
        }
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.ni, self.nj, self.nk)
    }
}

impl From<[usize; 3]> for Dims {
    fn from([ni, nj, nk]: [usize; 3]) -> Self {
        Self::new(ni, nj, nk)
    }
}

impl IntoIterator for Dims {
    type Item = GridIndex;
    type IntoIter = DimsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Lattice for Dims {
    type Index = GridIndex;
    type Neighbors = [GridIndex; 6];

    fn extent(&self) -> Dims {
        *self
    }

    fn cell_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, index: GridIndex) -> Option<usize> {
        self.offset(index)
    }

    fn neighbors(&self, index: GridIndex) -> [GridIndex; 6] {
        index.face_neighbors()
    }
}

/// Iterator over all indices of a [`Dims`].
#[derive(Debug, Clone)]
pub struct DimsIter {
    dims: Dims,
    next: usize,
}

impl Iterator for DimsIter {
    type Item = GridIndex;

    fn next(&mut self) -> Option<GridIndex> {
        let index = self.dims.index_of(self.next)?;
        self.next += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dims.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DimsIter {}

/// Extent of a 2D slice along its `u` and `v` axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneDims {
    /// Extent along `u`.
    pub nu: usize,
    /// Extent along `v`.
    pub nv: usize,
}

impl PlaneDims {
    /// Creates plane dimensions.
    #[must_use]
    pub const fn new(nu: usize, nv: usize) -> Self {
        Self { nu, nv }
    }

    /// Number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nu.saturating_mul(self.nv)
    }

    /// Returns `true` if either axis has zero extent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks whether `index` lies inside the plane.
    #[must_use]
    pub fn contains(&self, index: PlaneIndex) -> bool {
        self.offset(index).is_some()
    }

    /// Dense offset of `index` (`u` fastest), or `None` if it lies outside.
    #[must_use]
    pub fn offset(&self, index: PlaneIndex) -> Option<usize> {
        let u = axis(index.u, self.nu)?;
        let v = axis(index.v, self.nv)?;
        Some(u + self.nu * v)
    }
}

impl fmt::Display for PlaneDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.nu, self.nv)
    }
}

impl Lattice for PlaneDims {
    type Index = PlaneIndex;
    type Neighbors = [PlaneIndex; 4];

    fn extent(&self) -> Dims {
        Dims::new(self.nu, self.nv, 1)
    }

    fn cell_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, index: PlaneIndex) -> Option<usize> {
        self.offset(index)
    }

    fn neighbors(&self, index: PlaneIndex) -> [PlaneIndex; 4] {
        index.edge_neighbors()
    }
}

fn axis(value: i32, extent: usize) -> Option<usize> {
    let value = usize::try_from(value).ok()?;
    (value < extent).then_some(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_zero_extent() {
        assert!(Dims::try_new(4, 4, 1).is_ok());
        assert_eq!(
            Dims::try_new(4, 0, 1),
            Err(GridError::InvalidDimensions {
                ni: 4,
                nj: 0,
                nk: 1
            })
        );
    }

    #[test]
    fn test_try_new_rejects_overflow() {
        assert!(Dims::try_new(usize::MAX, 2, 1).is_err());
    }

    #[test]
    fn test_offset_and_back() {
        let dims = Dims::new(3, 4, 5);
        for (expected, index) in dims.iter().enumerate() {
            assert_eq!(dims.offset(index), Some(expected));
            assert_eq!(dims.index_of(expected), Some(index));
        }
        assert_eq!(dims.index_of(dims.len()), None);
    }

    #[test]
    fn test_contains_rejects_negative_and_past_end() {
        let dims = Dims::new(2, 2, 2);
        assert!(dims.contains(GridIndex::new(1, 1, 1)));
        assert!(!dims.contains(GridIndex::new(-1, 0, 0)));
        assert!(!dims.contains(GridIndex::new(0, 2, 0)));
        assert!(!dims.contains(GridIndex::new(0, 0, i32::MIN)));
    }

    #[test]
    fn test_iter_exact_size() {
        let dims = Dims::new(3, 2, 2);
        let mut iter = dims.iter();
        assert_eq!(iter.len(), 12);
        iter.next();
        assert_eq!(iter.len(), 11);
        assert_eq!(iter.count(), 11);
    }

    #[test]
    fn test_plane_dims_offset() {
        let dims = PlaneDims::new(3, 2);
        assert_eq!(dims.offset(PlaneIndex::new(2, 1)), Some(5));
        assert_eq!(dims.offset(PlaneIndex::new(3, 0)), None);
        assert_eq!(dims.offset(PlaneIndex::new(0, -1)), None);
        assert_eq!(dims.extent(), Dims::new(3, 2, 1));
    }

    #[test]
    fn test_lattice_neighbor_counts() {
        let volume = Dims::new(3, 3, 3);
        assert_eq!(volume.neighbors(GridIndex::new(1, 1, 1)).len(), 6);
        let plane = PlaneDims::new(3, 3);
        assert_eq!(plane.neighbors(PlaneIndex::new(1, 1)).len(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dims::new(4, 5, 6).to_string(), "4x5x6");
        assert_eq!(PlaneDims::new(4, 5).to_string(), "4x5");
    }
}
