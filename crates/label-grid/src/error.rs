//! Error types for grid operations.

use crate::GridIndex;

/// Errors that can occur while building or addressing grids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GridError {
    /// Every axis of a grid must have a non-zero extent.
    #[error("invalid grid dimensions: {ni}x{nj}x{nk}")]
    InvalidDimensions {
        /// Extent along the i axis.
        ni: usize,
        /// Extent along the j axis.
        nj: usize,
        /// Extent along the k axis.
        nk: usize,
    },

    /// An index lies outside the grid.
    #[error("index {index:?} is out of bounds")]
    OutOfBounds {
        /// The offending index.
        index: GridIndex,
    },

    /// The sample buffer does not match the grid dimensions.
    #[error("expected {expected} samples, got {actual}")]
    DataLength {
        /// Number of cells implied by the dimensions.
        expected: usize,
        /// Number of samples supplied.
        actual: usize,
    },

    /// A slice plane name was not one of `JK`, `IK` or `IJ`.
    #[error("unknown slice plane {0:?} (expected JK, IK or IJ)")]
    UnknownPlane(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GridError::InvalidDimensions {
            ni: 0,
            nj: 4,
            nk: 4,
        };
        assert_eq!(format!("{err}"), "invalid grid dimensions: 0x4x4");

        let err = GridError::DataLength {
            expected: 9,
            actual: 8,
        };
        assert!(format!("{err}").contains("expected 9"));

        let err = GridError::UnknownPlane("XY".to_string());
        assert!(format!("{err}").contains("\"XY\""));
    }
}
