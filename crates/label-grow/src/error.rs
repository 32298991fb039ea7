//! Error types for region growing.

use std::collections::TryReserveError;

use label_grid::{Dims, GridError, GridIndex};
use thiserror::Error;

/// Result type for region-grow operations.
pub type GrowResult<T> = Result<T, GrowError>;

/// Errors that can occur while growing a region.
///
/// Every variant except [`GrowError::Allocation`] is a precondition failure
/// detected before the label grid is touched.
#[derive(Debug, Error)]
pub enum GrowError {
    /// The seed lies outside the grid.
    #[error("seed {index:?} is outside the {dims} grid")]
    OutOfBounds {
        /// The seed index.
        index: GridIndex,
        /// Extent of the grid that was addressed.
        dims: Dims,
    },

    /// Background and label grids differ in shape.
    #[error("background grid is {background} but label grid is {labels}")]
    ShapeMismatch {
        /// Extent of the background grid.
        background: Dims,
        /// Extent of the label grid.
        labels: Dims,
    },

    /// The fill configuration is unusable.
    #[error("invalid fill configuration: {0}")]
    InvalidConfig(String),

    /// The per-call visited mask could not be allocated.
    #[error("failed to allocate visited mask for {cells} cells")]
    Allocation {
        /// Number of cells requested.
        cells: usize,
        /// The allocator error.
        #[source]
        source: TryReserveError,
    },

    /// A grid operation failed.
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GrowError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GrowError::OutOfBounds {
            index: GridIndex::new(5, 0, 0),
            dims: Dims::new(3, 3, 1),
        };
        assert!(format!("{err}").contains("3x3x1"));

        let err = GrowError::ShapeMismatch {
            background: Dims::new(3, 3, 1),
            labels: Dims::new(3, 4, 1),
        };
        assert_eq!(
            format!("{err}"),
            "background grid is 3x3x1 but label grid is 3x4x1"
        );

        let err = GrowError::invalid_config("tolerance is NaN");
        assert_eq!(
            format!("{err}"),
            "invalid fill configuration: tolerance is NaN"
        );
    }

    #[test]
    fn test_grid_error_is_transparent() {
        let err: GrowError = GridError::UnknownPlane("XZ".to_string()).into();
        assert!(format!("{err}").starts_with("unknown slice plane"));
    }
}
