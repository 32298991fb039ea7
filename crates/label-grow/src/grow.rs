//! Region growing over label grids.
//!
//! Grows a connected region of similar-intensity cells from a seed and
//! paints it with the target label.

use std::collections::VecDeque;

use label_grid::{Dims, Grid, GridIndex, GridMut, Lattice, SlicePlane, Volume};
use tracing::{debug, info};

use crate::error::{GrowError, GrowResult};
use crate::params::{FillConfig, FillMode, Label, UNLABELED};
use crate::result::FillResult;
use crate::visited::VisitedMask;

/// Starting point of a fill.
///
/// `plane` names the slice being viewed when the seed was picked; it decides
/// which 2D slice a [`FillMode::Plane`] fill walks and is ignored by
/// [`FillMode::Volume`] fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seed {
    /// Volume index of the seed cell.
    pub index: GridIndex,
    /// Active viewing plane.
    pub plane: SlicePlane,
}

impl Seed {
    /// Creates a seed on a given viewing plane.
    #[must_use]
    pub const fn new(index: GridIndex, plane: SlicePlane) -> Self {
        Self { index, plane }
    }

    /// Creates a seed viewed on the `IJ` plane.
    #[must_use]
    pub const fn at(index: GridIndex) -> Self {
        Self::new(index, SlicePlane::IJ)
    }
}

impl From<GridIndex> for Seed {
    fn from(index: GridIndex) -> Self {
        Self::at(index)
    }
}

/// Grow a region from `seed` and paint it into `labels`.
///
/// In [`FillMode::Plane`] both grids are reduced to the slice through the
/// seed on `seed.plane` and growth is 4-connected; cells outside that slice
/// are never touched. In [`FillMode::Volume`] growth is 6-connected through
/// the whole volume.
///
/// # Arguments
///
/// * `background` - Intensities compared against the accepted band
/// * `labels` - Label grid, mutated in place
/// * `seed` - Starting cell and viewing plane
/// * `config` - Fill configuration
///
/// # Returns
///
/// A [`FillResult`] whose `voxels_changed` counts cells whose label changed
/// to `config.target_label`.
///
/// # Errors
///
/// Returns an error, without touching `labels`, if:
/// - The configuration is invalid
/// - The grids differ in shape
/// - The seed lies outside the grids
///
/// Allocation failure of the paint-over mask is also reported before any
/// cell changes.
///
/// # Example
///
/// ```
/// use label_grid::{Dims, GridIndex, Volume};
/// use label_grow::{FillConfig, Seed, grow_region};
///
/// let background = Volume::from_vec(
///     Dims::new(3, 3, 1),
///     vec![10, 10, 50, 10, 10, 50, 50, 50, 50],
/// )
/// .unwrap();
/// let mut labels = Volume::new(background.dims(), 0);
///
/// let config = FillConfig::plane().with_tolerance(5.0).with_max_voxels(100);
/// let result = grow_region(&background, &mut labels, Seed::at(GridIndex::origin()), &config)
///     .unwrap();
///
/// assert_eq!(result.voxels_changed, 4);
/// assert_eq!(labels.as_slice(), &[1, 1, 0, 1, 1, 0, 0, 0, 0]);
/// ```
pub fn grow_region<T>(
    background: &Volume<T>,
    labels: &mut Volume<Label>,
    seed: Seed,
    config: &FillConfig,
) -> GrowResult<FillResult>
where
    T: Copy + Into<f64>,
{
    check_preconditions(background.dims(), labels.dims(), seed, config)?;

    match config.fill_mode {
        FillMode::Volume => flood(background, labels, seed.index, config),
        FillMode::Plane => {
            let depth = seed.plane.depth(seed.index);
            let background = background.plane(seed.plane, depth)?;
            let mut labels = labels.plane_mut(seed.plane, depth)?;
            flood(
                &background,
                &mut labels,
                seed.plane.project(seed.index),
                config,
            )
        }
    }
}

/// Grow a region over caller-supplied views.
///
/// The connectivity follows the views' lattice (4 for 2D, 6 for 3D);
/// `config.fill_mode` is not consulted.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the views differ in
/// shape or the seed lies outside them.
pub fn grow_view<B, L>(
    background: &B,
    labels: &mut L,
    seed: <B::Lattice as Lattice>::Index,
    config: &FillConfig,
) -> GrowResult<FillResult>
where
    B: Grid,
    B::Value: Copy + Into<f64>,
    L: GridMut<Lattice = B::Lattice, Value = Label>,
{
    config.validate()?;

    let lattice = background.lattice();
    if lattice != labels.lattice() {
        return Err(GrowError::ShapeMismatch {
            background: lattice.extent(),
            labels: labels.lattice().extent(),
        });
    }
    if lattice.cell(seed).is_none() {
        return Err(GrowError::OutOfBounds {
            index: seed.into(),
            dims: lattice.extent(),
        });
    }

    flood(background, labels, seed, config)
}

/// Validates everything that can be checked without touching the grids.
pub(crate) fn check_preconditions(
    background: Dims,
    labels: Dims,
    seed: Seed,
    config: &FillConfig,
) -> GrowResult<()> {
    config.validate()?;

    if background != labels {
        return Err(GrowError::ShapeMismatch { background, labels });
    }

    if !background.contains(seed.index) {
        return Err(GrowError::OutOfBounds {
            index: seed.index,
            dims: background,
        });
    }

    Ok(())
}

/// Breadth-first traversal shared by every view type.
///
/// Expects the seed to be in bounds and the lattices to match.
fn flood<B, L>(
    background: &B,
    labels: &mut L,
    seed: <B::Lattice as Lattice>::Index,
    config: &FillConfig,
) -> GrowResult<FillResult>
where
    B: Grid,
    B::Value: Copy + Into<f64>,
    L: GridMut<Lattice = B::Lattice, Value = Label>,
{
    let lattice = background.lattice();
    let seed_value: f64 = match background.get(seed) {
        Some(&value) => value.into(),
        None => {
            return Err(GrowError::OutOfBounds {
                index: seed.into(),
                dims: lattice.extent(),
            });
        }
    };
    let range = config.range_for(seed_value);
    let target = config.target_label;

    let mut visited = if config.paint_over {
        Some(VisitedMask::try_new(lattice.cell_count())?)
    } else {
        None
    };

    debug!(
        seed = ?seed,
        seed_value,
        lo = range.lo,
        hi = range.hi,
        paint_over = config.paint_over,
        max_voxels = config.max_voxels,
        "Starting region grow"
    );

    let mut worklist = VecDeque::from([seed]);
    let mut voxels_changed = 0usize;
    let mut voxels_examined = 0usize;
    let mut budget_exhausted = false;

    while let Some(index) = worklist.pop_front() {
        // Neighbours are pushed unchecked; the edge of the grid ends here.
        let Some(cell) = lattice.cell(index) else {
            continue;
        };
        let (Some(&sample), Some(label)) = (background.get(index), labels.get_mut(index)) else {
            continue;
        };
        voxels_examined += 1;

        let previous = *label;
        if let Some(mask) = visited.as_mut() {
            // Cells already carrying the target are expanded once per call.
            if previous == target && !mask.mark(cell) {
                continue;
            }
        } else if previous != UNLABELED {
            continue;
        }

        if !range.contains(sample.into()) {
            continue;
        }

        *label = target;
        if previous != target {
            voxels_changed += 1;
        }

        if voxels_changed > config.max_voxels {
            budget_exhausted = true;
            debug!(
                voxels_changed,
                pending = worklist.len(),
                "Voxel budget exceeded, abandoning worklist"
            );
            break;
        }

        worklist.extend(lattice.neighbors(index));
    }

    info!(
        voxels_changed,
        voxels_examined, budget_exhausted, "Region grow complete"
    );

    Ok(FillResult {
        voxels_changed,
        voxels_examined,
        range,
        budget_exhausted,
    })
}
