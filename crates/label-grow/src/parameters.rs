//! Loading fill configuration from a string-keyed parameter store.
//!
//! Editors keep tool settings as text values under `Owner,name` keys. Any
//! key that is missing falls back to the [`FillConfig`] default.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use crate::error::{GrowError, GrowResult};
use crate::params::{FillConfig, FillMode};

/// Key of the tolerance half-width.
pub const TOLERANCE_KEY: &str = "WandEffect,tolerance";
/// Key of the voxel budget.
pub const MAX_PIXELS_KEY: &str = "WandEffect,maxPixels";
/// Key of the fill mode (`Plane` or `Volume`).
pub const FILL_MODE_KEY: &str = "WandEffect,fillMode";
/// Key of the paint-over flag.
pub const PAINT_OVER_KEY: &str = "LabelEffect,paintOver";
/// Key of the explicit-threshold flag.
pub const PAINT_THRESHOLD_KEY: &str = "LabelEffect,paintThreshold";
/// Key of the explicit threshold lower bound.
pub const THRESHOLD_MIN_KEY: &str = "LabelEffect,paintThresholdMin";
/// Key of the explicit threshold upper bound.
pub const THRESHOLD_MAX_KEY: &str = "LabelEffect,paintThresholdMax";
/// Key of the label to paint.
pub const LABEL_KEY: &str = "label";

/// A read-only source of named string parameters.
pub trait ParameterSource {
    /// Returns the raw value stored under `key`, if any.
    fn parameter(&self, key: &str) -> Option<String>;
}

impl<S: std::hash::BuildHasher> ParameterSource for HashMap<String, String, S> {
    fn parameter(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn parameter(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<P: ParameterSource + ?Sized> ParameterSource for &P {
    fn parameter(&self, key: &str) -> Option<String> {
        (**self).parameter(key)
    }
}

impl FillConfig {
    /// Builds a configuration from a parameter store.
    ///
    /// Flags are integers where any non-zero value means enabled. The voxel
    /// budget may be written as a float and is truncated.
    ///
    /// # Errors
    ///
    /// Returns [`GrowError::InvalidConfig`] naming the key if a value does
    /// not parse, the budget is negative or not finite, the fill mode is
    /// unknown, or the resulting configuration fails
    /// [`FillConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use label_grow::{FillConfig, FillMode};
    ///
    /// let mut store = HashMap::new();
    /// store.insert("WandEffect,tolerance".to_string(), "12.5".to_string());
    /// store.insert("WandEffect,fillMode".to_string(), "Volume".to_string());
    /// store.insert("label".to_string(), "6".to_string());
    ///
    /// let config = FillConfig::from_parameters(&store).unwrap();
    /// assert_eq!(config.fill_mode, FillMode::Volume);
    /// assert_eq!(config.target_label, 6);
    /// assert_eq!(config.max_voxels, 10_000);
    /// ```
    pub fn from_parameters(source: &impl ParameterSource) -> GrowResult<Self> {
        let defaults = Self::default();

        let config = Self {
            target_label: read(source, LABEL_KEY)?.unwrap_or(defaults.target_label),
            tolerance: read(source, TOLERANCE_KEY)?.unwrap_or(defaults.tolerance),
            use_explicit_threshold: read_flag(source, PAINT_THRESHOLD_KEY)?
                .unwrap_or(defaults.use_explicit_threshold),
            threshold_min: read(source, THRESHOLD_MIN_KEY)?.unwrap_or(defaults.threshold_min),
            threshold_max: read(source, THRESHOLD_MAX_KEY)?.unwrap_or(defaults.threshold_max),
            paint_over: read_flag(source, PAINT_OVER_KEY)?.unwrap_or(defaults.paint_over),
            max_voxels: read_budget(source)?.unwrap_or(defaults.max_voxels),
            fill_mode: read::<FillMode>(source, FILL_MODE_KEY)?.unwrap_or(defaults.fill_mode),
        };

        config.validate()?;
        Ok(config)
    }

    /// Writes this configuration back as parameter strings, using the same
    /// keys [`FillConfig::from_parameters`] reads.
    #[must_use]
    pub fn to_parameters(&self) -> BTreeMap<String, String> {
        let flag = |on: bool| if on { "1" } else { "0" }.to_string();
        [
            (LABEL_KEY, self.target_label.to_string()),
            (TOLERANCE_KEY, self.tolerance.to_string()),
            (PAINT_THRESHOLD_KEY, flag(self.use_explicit_threshold)),
            (THRESHOLD_MIN_KEY, self.threshold_min.to_string()),
            (THRESHOLD_MAX_KEY, self.threshold_max.to_string()),
            (PAINT_OVER_KEY, flag(self.paint_over)),
            (MAX_PIXELS_KEY, self.max_voxels.to_string()),
            (FILL_MODE_KEY, self.fill_mode.to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
    }
}

fn read<T>(source: &impl ParameterSource, key: &str) -> GrowResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    source
        .parameter(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| GrowError::invalid_config(format!("{key}: {raw:?}: {e}")))
        })
        .transpose()
}

fn read_flag(source: &impl ParameterSource, key: &str) -> GrowResult<Option<bool>> {
    Ok(read::<i64>(source, key)?.map(|v| v != 0))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn read_budget(source: &impl ParameterSource) -> GrowResult<Option<usize>> {
    let Some(budget) = read::<f64>(source, MAX_PIXELS_KEY)? else {
        return Ok(None);
    };
    if !budget.is_finite() || budget < 0.0 {
        return Err(GrowError::invalid_config(format!(
            "{MAX_PIXELS_KEY}: budget must be finite and non-negative, got {budget}"
        )));
    }
    // Checked non-negative above; huge budgets saturate.
    Ok(Some(budget.trunc() as usize))
}
