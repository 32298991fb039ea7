//! Fill result types.

use crate::params::IntensityRange;

/// Outcome of one region-grow call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillResult {
    /// Cells whose label changed to the target label.
    pub voxels_changed: usize,

    /// In-bounds worklist entries examined, duplicates included.
    pub voxels_examined: usize,

    /// Intensity band that was applied.
    pub range: IntensityRange,

    /// Whether growth stopped because the voxel budget was crossed.
    pub budget_exhausted: bool,
}

impl FillResult {
    /// Returns `true` if no label changed.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        self.voxels_changed == 0
    }
}

impl std::fmt::Display for FillResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FillResult: {} voxels changed, {} examined, range {}",
            self.voxels_changed, self.voxels_examined, self.range
        )?;
        if self.budget_exhausted {
            f.write_str(" (budget exhausted)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let result = FillResult {
            voxels_changed: 4,
            voxels_examined: 12,
            range: IntensityRange::new(5.0, 15.0),
            budget_exhausted: false,
        };
        assert!(!result.is_unchanged());
        assert_eq!(
            format!("{result}"),
            "FillResult: 4 voxels changed, 12 examined, range [5, 15]"
        );

        let result = FillResult {
            budget_exhausted: true,
            ..result
        };
        assert!(format!("{result}").ends_with("(budget exhausted)"));
    }
}
