//! Tolerance-gated region growing for label maps.
//!
//! This crate implements the "magic wand" used when editing segmentation
//! label maps: starting from a picked cell, it grows a connected region of
//! cells whose background intensity falls in a band and paints them with a
//! target label.
//!
//! - Growth is 4-connected inside one slice ([`FillMode::Plane`]) or
//!   6-connected through the volume ([`FillMode::Volume`])
//! - The band is either `seed ± tolerance` or an explicit `[min, max]`
//! - Cells already carrying another label are left alone unless
//!   `paint_over` is set
//! - A voxel budget caps how many cells one call may change
//!
//! # Quick Start
//!
//! ```
//! use label_grid::{Dims, GridIndex, Volume};
//! use label_grow::{FillConfig, Seed, grow_region};
//!
//! let background = Volume::from_fn(Dims::new(16, 16, 8), |idx| {
//!     if idx.i < 8 { 100.0f32 } else { 900.0 }
//! });
//! let mut labels = Volume::new(background.dims(), 0);
//!
//! let config = FillConfig::volume().with_tolerance(20.0).with_target_label(5);
//! let result = grow_region(&background, &mut labels, Seed::at(GridIndex::new(2, 3, 4)), &config)
//!     .unwrap();
//!
//! assert_eq!(result.voxels_changed, 8 * 16 * 8);
//! println!("{result}");
//! ```
//!
//! # Budget Semantics
//!
//! The budget is checked after each cell is painted, so a call that hits the
//! budget changes `max_voxels + 1` cells and reports
//! [`FillResult::budget_exhausted`]. Cells already painted are kept; callers
//! that want to roll back snapshot the label grid first (see [`EditHooks`]).
//!
//! # Repeated Clicks
//!
//! Cells that already carry the target label are not counted again, so
//! clicking the same region with a wider tolerance and `paint_over` grows
//! it step by step.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod effect;
mod error;
mod grow;
mod parameters;
mod params;
mod result;
mod visited;

pub use effect::{EditHooks, WandEffect};
pub use error::{GrowError, GrowResult};
pub use grow::{Seed, grow_region, grow_view};
pub use parameters::{
    FILL_MODE_KEY, LABEL_KEY, MAX_PIXELS_KEY, PAINT_OVER_KEY, PAINT_THRESHOLD_KEY,
    ParameterSource, THRESHOLD_MAX_KEY, THRESHOLD_MIN_KEY, TOLERANCE_KEY,
};
pub use params::{FillConfig, FillMode, IntensityRange, Label, UNLABELED};
pub use result::FillResult;
pub use visited::VisitedMask;
