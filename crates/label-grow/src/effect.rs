//! The click-driven wand effect.
//!
//! Wraps [`grow_region`] with the steps an editor performs around each
//! click: snapping the picked point to the grid, snapshotting for undo, and
//! announcing that the label grid changed.

use label_grid::{GridIndex, Point3, SlicePlane, Volume};
use tracing::debug;

use crate::error::GrowResult;
use crate::grow::{Seed, check_preconditions, grow_region};
use crate::params::{FillConfig, Label};
use crate::result::FillResult;

/// Callbacks into the embedding editor around a fill.
pub trait EditHooks {
    /// Called once the fill is known to be valid, before any label changes.
    fn save_state(&mut self);

    /// Called after the label grid was updated.
    fn label_modified(&mut self, result: &FillResult);
}

impl EditHooks for () {
    fn save_state(&mut self) {}

    fn label_modified(&mut self, _result: &FillResult) {}
}

/// A magic-wand label tool bound to one configuration.
///
/// # Example
///
/// ```
/// use label_grid::{Dims, Point3, SlicePlane, Volume};
/// use label_grow::{FillConfig, WandEffect};
///
/// let background = Volume::new(Dims::new(5, 5, 3), 40i16);
/// let mut labels = Volume::new(background.dims(), 0);
///
/// let wand = WandEffect::new(FillConfig::plane().with_target_label(2));
/// let result = wand
///     .apply(&background, &mut labels, Point3::new(2.2, 1.7, 0.9), SlicePlane::IJ, &mut ())
///     .unwrap();
///
/// // Only the k = 1 slice is painted.
/// assert_eq!(result.voxels_changed, 25);
/// assert_eq!(labels.count(|&l| l == 2), 25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WandEffect {
    config: FillConfig,
}

impl WandEffect {
    /// Creates a wand using `config`.
    #[must_use]
    pub const fn new(config: FillConfig) -> Self {
        Self { config }
    }

    /// The configuration this wand applies.
    #[must_use]
    pub const fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: FillConfig) {
        self.config = config;
    }

    /// Fill from a picked point given in continuous index space.
    ///
    /// The point is rounded to the nearest cell (see
    /// [`GridIndex::from_point_rounded`]). `plane` is the slice orientation
    /// the point was picked on.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`grow_region`]. Precondition failures are
    /// reported before `hooks.save_state` runs, so no snapshot is taken for
    /// a click that cannot fill.
    pub fn apply<T>(
        &self,
        background: &Volume<T>,
        labels: &mut Volume<Label>,
        point: Point3<f64>,
        plane: SlicePlane,
        hooks: &mut impl EditHooks,
    ) -> GrowResult<FillResult>
    where
        T: Copy + Into<f64>,
    {
        let index = GridIndex::from_point_rounded(point);
        debug!(?point, ?index, %plane, "Wand click");
        self.apply_at(background, labels, Seed::new(index, plane), hooks)
    }

    /// Fill from an already-snapped seed.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`grow_region`].
    pub fn apply_at<T>(
        &self,
        background: &Volume<T>,
        labels: &mut Volume<Label>,
        seed: Seed,
        hooks: &mut impl EditHooks,
    ) -> GrowResult<FillResult>
    where
        T: Copy + Into<f64>,
    {
        check_preconditions(background.dims(), labels.dims(), seed, &self.config)?;
        hooks.save_state();
        let result = grow_region(background, labels, seed, &self.config)?;
        hooks.label_modified(&result);
        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GrowError;
    use label_grid::Dims;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        snapshots: Vec<Vec<Label>>,
    }

    struct Session<'a> {
        recorder: &'a mut Recorder,
        labels_before: Vec<Label>,
    }

    impl EditHooks for Session<'_> {
        fn save_state(&mut self) {
            self.recorder.events.push("save".to_string());
            self.recorder.snapshots.push(self.labels_before.clone());
        }

        fn label_modified(&mut self, result: &FillResult) {
            self.recorder
                .events
                .push(format!("modified:{}", result.voxels_changed));
        }
    }

    fn grids() -> (Volume<u8>, Volume<Label>) {
        let background = Volume::from_fn(Dims::new(4, 4, 2), |idx| if idx.i < 2 { 10 } else { 200 });
        let labels = Volume::new(background.dims(), 0);
        (background, labels)
    }

    #[test]
    fn hooks_run_in_order() {
        let (background, mut labels) = grids();
        let mut recorder = Recorder::default();
        let mut session = Session {
            labels_before: labels.as_slice().to_vec(),
            recorder: &mut recorder,
        };

        let wand = WandEffect::new(FillConfig::plane().with_tolerance(5.0));
        let result = wand
            .apply(
                &background,
                &mut labels,
                Point3::new(0.4, 0.4, 1.2),
                SlicePlane::IJ,
                &mut session,
            )
            .unwrap();

        assert_eq!(result.voxels_changed, 8);
        assert_eq!(recorder.events, vec!["save", "modified:8"]);
        assert_eq!(recorder.snapshots.len(), 1);
        assert!(recorder.snapshots[0].iter().all(|&l| l == 0));
    }

    #[test]
    fn failed_precondition_skips_hooks() {
        let (background, mut labels) = grids();
        let mut recorder = Recorder::default();
        let mut session = Session {
            labels_before: Vec::new(),
            recorder: &mut recorder,
        };

        let wand = WandEffect::default();
        let err = wand
            .apply(
                &background,
                &mut labels,
                Point3::new(10.0, 0.0, 0.0),
                SlicePlane::IJ,
                &mut session,
            )
            .unwrap_err();

        assert!(matches!(err, GrowError::OutOfBounds { .. }));
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn picked_point_rounds_to_nearest() {
        let (background, mut labels) = grids();
        let wand = WandEffect::new(FillConfig::plane().with_tolerance(5.0).with_target_label(4));

        // 2.5 rounds to 2, which is in the bright half.
        wand.apply(
            &background,
            &mut labels,
            Point3::new(2.5, 0.0, 0.0),
            SlicePlane::IJ,
            &mut (),
        )
        .unwrap();

        assert_eq!(labels.get(GridIndex::new(2, 0, 0)), Some(&4));
        assert_eq!(labels.get(GridIndex::new(1, 0, 0)), Some(&0));
        assert_eq!(labels.count(|&l| l == 4), 8);
    }

    #[test]
    fn set_config_replaces() {
        let mut wand = WandEffect::default();
        wand.set_config(FillConfig::volume());
        assert_eq!(wand.config().fill_mode, crate::FillMode::Volume);
    }
}
