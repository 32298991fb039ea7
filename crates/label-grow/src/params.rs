//! Parameters for region growing.

use std::fmt;
use std::str::FromStr;

use crate::error::{GrowError, GrowResult};

/// Label value stored in a label grid.
pub type Label = u32;

/// Label value of cells that belong to no segment.
pub const UNLABELED: Label = 0;

/// Scope of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillMode {
    /// Grow inside the 2D slice through the seed (4-connected).
    #[default]
    Plane,
    /// Grow through the whole volume (6-connected).
    Volume,
}

impl FillMode {
    /// Name of the mode as stored in parameter sets.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plane => "Plane",
            Self::Volume => "Volume",
        }
    }
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FillMode {
    type Err = GrowError;

    fn from_str(s: &str) -> GrowResult<Self> {
        let s = s.trim();
        [Self::Plane, Self::Volume]
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GrowError::invalid_config(format!("unknown fill mode {s:?}")))
    }
}

/// Inclusive band of background intensities accepted by a fill.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntensityRange {
    /// Lowest accepted intensity.
    pub lo: f64,
    /// Highest accepted intensity.
    pub hi: f64,
}

impl IntensityRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Band of `tolerance` either side of `center`.
    #[must_use]
    pub fn around(center: f64, tolerance: f64) -> Self {
        Self::new(center - tolerance, center + tolerance)
    }

    /// Checks `lo <= value <= hi`. `NaN` is never contained.
    ///
    /// # Example
    ///
    /// ```
    /// use label_grow::IntensityRange;
    ///
    /// let range = IntensityRange::new(5.0, 15.0);
    /// assert!(range.contains(5.0));
    /// assert!(range.contains(15.0));
    /// assert!(!range.contains(15.000_001));
    /// assert!(!range.contains(f64::NAN));
    /// ```
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl fmt::Display for IntensityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Configuration for one region-grow call.
///
/// Defaults match the wand tool's built-in values: tolerance 50, a budget of
/// 10 000 voxels, no painting over other labels, threshold mode off and
/// plane-restricted growth.
///
/// # Example
///
/// ```
/// use label_grow::{FillConfig, FillMode};
///
/// let config = FillConfig::default();
/// assert_eq!(config.max_voxels, 10_000);
/// assert!(!config.paint_over);
///
/// let config = FillConfig::volume()
///     .with_target_label(3)
///     .with_threshold(100.0, 250.0)
///     .with_paint_over(true);
/// assert_eq!(config.fill_mode, FillMode::Volume);
/// assert!(config.use_explicit_threshold);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FillConfig {
    /// Label written into accepted cells.
    pub target_label: Label,

    /// Half-width of the band around the seed intensity.
    /// Ignored when `use_explicit_threshold` is set.
    pub tolerance: f64,

    /// Use `[threshold_min, threshold_max]` instead of the tolerance band.
    pub use_explicit_threshold: bool,

    /// Lower bound of the explicit threshold band.
    pub threshold_min: f64,

    /// Upper bound of the explicit threshold band.
    pub threshold_max: f64,

    /// Relabel cells that already carry a different non-zero label.
    pub paint_over: bool,

    /// Number of changed cells after which growth stops. The cell that
    /// crosses the budget is kept, so a call changes at most
    /// `max_voxels + 1` cells.
    pub max_voxels: usize,

    /// Whether to grow in the seed's slice or through the volume.
    pub fill_mode: FillMode,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            target_label: 1,
            tolerance: 50.0,
            use_explicit_threshold: false,
            threshold_min: 25.0,
            threshold_max: 25.0,
            paint_over: false,
            max_voxels: 10_000,
            fill_mode: FillMode::Plane,
        }
    }
}

impl FillConfig {
    /// Default configuration restricted to the seed's slice.
    #[must_use]
    pub fn plane() -> Self {
        Self::default()
    }

    /// Default configuration growing through the whole volume.
    #[must_use]
    pub fn volume() -> Self {
        Self {
            fill_mode: FillMode::Volume,
            ..Self::default()
        }
    }

    /// Set the label to paint.
    #[must_use]
    pub const fn with_target_label(mut self, label: Label) -> Self {
        self.target_label = label;
        self
    }

    /// Switch to a tolerance band of `tolerance` around the seed intensity.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self.use_explicit_threshold = false;
        self
    }

    /// Switch to the explicit band `[min, max]`.
    #[must_use]
    pub const fn with_threshold(mut self, min: f64, max: f64) -> Self {
        self.threshold_min = min;
        self.threshold_max = max;
        self.use_explicit_threshold = true;
        self
    }

    /// Set the paint-over policy.
    #[must_use]
    pub const fn with_paint_over(mut self, paint_over: bool) -> Self {
        self.paint_over = paint_over;
        self
    }

    /// Set the voxel budget.
    #[must_use]
    pub const fn with_max_voxels(mut self, max_voxels: usize) -> Self {
        self.max_voxels = max_voxels;
        self
    }

    /// Set the fill mode.
    #[must_use]
    pub const fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Checks that the configuration can drive a fill.
    ///
    /// Only `NaN` is rejected, since it would silently turn every click into
    /// a no-op. Any other band is accepted as written: an inverted or
    /// negative band matches nothing, and an infinite one matches every
    /// sample.
    ///
    /// # Errors
    ///
    /// Returns [`GrowError::InvalidConfig`] if the band in use has a `NaN`
    /// tolerance or bound.
    pub fn validate(&self) -> GrowResult<()> {
        if self.use_explicit_threshold {
            if self.threshold_min.is_nan() || self.threshold_max.is_nan() {
                return Err(GrowError::invalid_config(format!(
                    "threshold bounds must not be NaN, got [{}, {}]",
                    self.threshold_min, self.threshold_max
                )));
            }
        } else if self.tolerance.is_nan() {
            return Err(GrowError::invalid_config("tolerance must not be NaN"));
        }
        Ok(())
    }

    /// Intensity band accepted for a fill seeded on a cell of intensity
    /// `seed_value`.
    ///
    /// # Example
    ///
    /// ```
    /// use label_grow::{FillConfig, IntensityRange};
    ///
    /// let config = FillConfig::default().with_tolerance(5.0);
    /// assert_eq!(config.range_for(10.0), IntensityRange::new(5.0, 15.0));
    ///
    /// let config = config.with_threshold(0.0, 3.0);
    /// assert_eq!(config.range_for(10.0), IntensityRange::new(0.0, 3.0));
    /// ```
    #[must_use]
    pub fn range_for(&self, seed_value: f64) -> IntensityRange {
        if self.use_explicit_threshold {
            IntensityRange::new(self.threshold_min, self.threshold_max)
        } else {
            IntensityRange::around(seed_value, self.tolerance)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_values() {
        let config = FillConfig::default();
        assert_eq!(config.target_label, 1);
        assert_relative_eq!(config.tolerance, 50.0);
        assert!(!config.use_explicit_threshold);
        assert_relative_eq!(config.threshold_min, 25.0);
        assert_relative_eq!(config.threshold_max, 25.0);
        assert!(!config.paint_over);
        assert_eq!(config.max_voxels, 10_000);
        assert_eq!(config.fill_mode, FillMode::Plane);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(FillConfig::plane().fill_mode, FillMode::Plane);
        assert_eq!(FillConfig::volume().fill_mode, FillMode::Volume);
    }

    #[test]
    fn test_with_tolerance_leaves_threshold_mode() {
        let config = FillConfig::default()
            .with_threshold(1.0, 2.0)
            .with_tolerance(3.0);
        assert!(!config.use_explicit_threshold);
        assert_relative_eq!(config.tolerance, 3.0);
    }

    #[test]
    fn test_range_for_tolerance() {
        let range = FillConfig::default().with_tolerance(2.5).range_for(-1.0);
        assert_relative_eq!(range.lo, -3.5);
        assert_relative_eq!(range.hi, 1.5);
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let range = IntensityRange::around(10.0, 5.0);
        assert!(range.contains(5.0));
        assert!(range.contains(15.0));
        assert!(!range.contains(4.999));
        assert!(!range.contains(15.001));
    }

    #[test]
    fn test_validate_rejects_nan_only() {
        let config = FillConfig::default().with_tolerance(f64::NAN);
        assert!(matches!(config.validate(), Err(GrowError::InvalidConfig(_))));

        let config = FillConfig::default().with_threshold(f64::NAN, 5.0);
        assert!(matches!(config.validate(), Err(GrowError::InvalidConfig(_))));

        // The tolerance is not consulted in threshold mode.
        let mut config = FillConfig::default().with_threshold(5.0, 5.0);
        config.tolerance = f64::NAN;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unusual_bands_are_valid() {
        for config in [
            FillConfig::default().with_tolerance(-1.0),
            FillConfig::default().with_tolerance(f64::INFINITY),
            FillConfig::default().with_threshold(50.0, 25.0),
            FillConfig::default().with_threshold(f64::NEG_INFINITY, f64::INFINITY),
        ] {
            assert!(config.validate().is_ok(), "{config:?}");
        }
    }

    #[test]
    fn test_inverted_band_matches_nothing() {
        let range = FillConfig::default().with_threshold(50.0, 25.0).range_for(30.0);
        assert!(!range.contains(30.0));
        assert!(!range.contains(25.0));

        let range = FillConfig::default().with_tolerance(-1.0).range_for(30.0);
        assert!(!range.contains(30.0));
    }

    #[test]
    fn test_infinite_band_matches_everything() {
        let range = FillConfig::default().with_tolerance(f64::INFINITY).range_for(0.0);
        assert!(range.contains(f64::MAX));
        assert!(range.contains(f64::MIN));
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn test_fill_mode_parse() {
        assert_eq!("Plane".parse::<FillMode>().unwrap(), FillMode::Plane);
        assert_eq!(" volume ".parse::<FillMode>().unwrap(), FillMode::Volume);
        let err = "Slab".parse::<FillMode>().unwrap_err();
        assert!(format!("{err}").contains("Slab"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_partial_config_uses_defaults() {
        let config: FillConfig =
            serde_json::from_str(r#"{"target_label": 4, "fill_mode": "Volume"}"#).unwrap();
        assert_eq!(config.target_label, 4);
        assert_eq!(config.fill_mode, FillMode::Volume);
        assert_eq!(config.max_voxels, 10_000);
    }
}
