//! Dense volume storage.

use crate::dims::{Dims, Lattice};
use crate::error::GridError;
use crate::index::GridIndex;
use crate::plane::{PlaneView, PlaneViewMut, SlicePlane};

/// Read access to a dense grid addressed through a [`Lattice`].
pub trait Grid {
    /// Addressing scheme of the grid.
    type Lattice: Lattice;
    /// Stored sample type.
    type Value;

    /// Returns the grid's lattice.
    fn lattice(&self) -> Self::Lattice;

    /// Returns the sample at `index`, or `None` if it lies outside.
    fn get(&self, index: <Self::Lattice as Lattice>::Index) -> Option<&Self::Value>;
}

/// Write access to a dense grid.
pub trait GridMut: Grid {
    /// Returns a mutable reference to the sample at `index`.
    fn get_mut(&mut self, index: <Self::Lattice as Lattice>::Index) -> Option<&mut Self::Value>;
}

/// A dense 3D grid of samples.
///
/// Used both for background intensities and for label values. Samples are
/// stored with `i` varying fastest (see [`Dims`]).
///
/// # Example
///
/// ```
/// use label_grid::{Dims, GridIndex, Volume};
///
/// let mut labels: Volume<u32> = Volume::new(Dims::new(4, 4, 2), 0);
/// labels.set(GridIndex::new(1, 2, 1), 7).unwrap();
///
/// assert_eq!(labels.get(GridIndex::new(1, 2, 1)), Some(&7));
/// assert_eq!(labels.get(GridIndex::new(4, 0, 0)), None);
/// assert_eq!(labels.count(|&v| v == 7), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawVolume<T>"))]
pub struct Volume<T> {
    dims: Dims,
    data: Vec<T>,
}

impl<T> Volume<T> {
    /// Creates a volume with every cell set to `fill`.
    #[must_use]
    pub fn new(dims: Dims, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            dims,
            data: vec![fill; dims.len()],
        }
    }

    /// Wraps an existing sample buffer in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DataLength`] if `data` does not hold exactly
    /// `dims.len()` samples.
    ///
    /// # Example
    ///
    /// ```
    /// use label_grid::{Dims, GridError, Volume};
    ///
    /// let ok = Volume::from_vec(Dims::new(2, 2, 1), vec![1, 2, 3, 4]);
    /// assert!(ok.is_ok());
    ///
    /// let short = Volume::from_vec(Dims::new(2, 2, 1), vec![1, 2, 3]);
    /// assert!(matches!(short, Err(GridError::DataLength { expected: 4, actual: 3 })));
    /// ```
    pub fn from_vec(dims: Dims, data: Vec<T>) -> Result<Self, GridError> {
        if data.len() != dims.len() {
            return Err(GridError::DataLength {
                expected: dims.len(),
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// Builds a volume by evaluating `f` at every index.
    pub fn from_fn(dims: Dims, f: impl FnMut(GridIndex) -> T) -> Self {
        Self {
            dims,
            data: dims.iter().map(f).collect(),
        }
    }

    /// Returns the volume dimensions.
    #[must_use]
    pub const fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the volume has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the sample at `index`.
    #[must_use]
    pub fn get(&self, index: GridIndex) -> Option<&T> {
        self.data.get(self.dims.offset(index)?)
    }

    /// Returns a mutable reference to the sample at `index`.
    #[must_use]
    pub fn get_mut(&mut self, index: GridIndex) -> Option<&mut T> {
        let offset = self.dims.offset(index)?;
        self.data.get_mut(offset)
    }

    /// Overwrites the sample at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `index` lies outside the volume.
    pub fn set(&mut self, index: GridIndex, value: T) -> Result<(), GridError> {
        let slot = self
            .get_mut(index)
            .ok_or(GridError::OutOfBounds { index })?;
        *slot = value;
        Ok(())
    }

    /// Samples in storage order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the volume and returns its samples in storage order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Counts the samples matching `predicate`.
    pub fn count(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        self.data.iter().filter(|v| predicate(v)).count()
    }

    /// Borrows the 2D slice of this volume lying on `plane` at `depth`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `depth` is outside the volume
    /// along the plane's normal axis.
    pub fn plane(&self, plane: SlicePlane, depth: i32) -> Result<PlaneView<'_, T>, GridError> {
        check_depth(self.dims, plane, depth)?;
        Ok(PlaneView::new(self, plane, depth))
    }

    /// Mutably borrows the 2D slice of this volume lying on `plane` at `depth`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `depth` is outside the volume
    /// along the plane's normal axis.
    pub fn plane_mut(
        &mut self,
        plane: SlicePlane,
        depth: i32,
    ) -> Result<PlaneViewMut<'_, T>, GridError> {
        check_depth(self.dims, plane, depth)?;
        Ok(PlaneViewMut::new(self, plane, depth))
    }
}

fn check_depth(dims: Dims, plane: SlicePlane, depth: i32) -> Result<(), GridError> {
    let index = plane.lift(crate::PlaneIndex::new(0, 0), depth);
    if dims.contains(index) {
        Ok(())
    } else {
        Err(GridError::OutOfBounds { index })
    }
}

impl<T> Grid for Volume<T> {
    type Lattice = Dims;
    type Value = T;

    fn lattice(&self) -> Dims {
        self.dims
    }

    fn get(&self, index: GridIndex) -> Option<&T> {
        Volume::get(self, index)
    }
}

impl<T> GridMut for Volume<T> {
    fn get_mut(&mut self, index: GridIndex) -> Option<&mut T> {
        Volume::get_mut(self, index)
    }
}

/// Serialized form of a [`Volume`], validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawVolume<T> {
    dims: Dims,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawVolume<T>> for Volume<T> {
    type Error = GridError;

    fn try_from(raw: RawVolume<T>) -> Result<Self, GridError> {
        Self::from_vec(raw.dims, raw.data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ramp() -> Volume<i32> {
        Volume::from_fn(Dims::new(3, 2, 2), |idx| idx.i + 10 * idx.j + 100 * idx.k)
    }

    #[test]
    fn test_new_fills() {
        let volume = Volume::new(Dims::new(2, 3, 4), 5u8);
        assert_eq!(volume.len(), 24);
        assert!(volume.as_slice().iter().all(|&v| v == 5));
    }

    #[test]
    fn test_from_fn_storage_order() {
        let volume = ramp();
        assert_eq!(volume.as_slice()[..4], [0, 1, 2, 10]);
        assert_eq!(volume.get(GridIndex::new(2, 1, 1)), Some(&112));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut volume = ramp();
        let err = volume.set(GridIndex::new(0, 0, 2), 1).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                index: GridIndex::new(0, 0, 2)
            }
        );
    }

    #[test]
    fn test_plane_depth_checked() {
        let volume = ramp();
        assert!(volume.plane(SlicePlane::IJ, 1).is_ok());
        assert!(volume.plane(SlicePlane::IJ, 2).is_err());
        assert!(volume.plane(SlicePlane::JK, 2).is_ok());
        assert!(volume.plane(SlicePlane::JK, 3).is_err());
        assert!(volume.plane(SlicePlane::IK, -1).is_err());
    }

    #[test]
    fn test_grid_trait_matches_inherent() {
        let volume = ramp();
        let via_trait = Grid::get(&volume, GridIndex::new(1, 1, 0));
        assert_eq!(via_trait, Some(&11));
        assert_eq!(Grid::lattice(&volume), Dims::new(3, 2, 2));
    }

    #[test]
    fn test_into_vec_round_trip() {
        let volume = ramp();
        let dims = volume.dims();
        let data = volume.clone().into_vec();
        assert_eq!(Volume::from_vec(dims, data).unwrap(), volume);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_bad_length() {
        let json = r#"{"dims":{"ni":2,"nj":2,"nk":1},"data":[1,2,3]}"#;
        let parsed: Result<Volume<i32>, _> = serde_json::from_str(json);
        assert!(parsed.is_err());

        let volume = ramp();
        let json = serde_json::to_string(&volume).unwrap();
        let back: Volume<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, volume);
    }
}
