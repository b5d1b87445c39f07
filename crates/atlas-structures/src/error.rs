// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

/// Result type for atlas operations
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Errors that can occur while building masks, halves and layers.
///
/// # Examples
/// ```
/// use atlas_structures::{AtlasError, AtlasResult};
///
/// fn check_axis(axis: usize, ndim: usize) -> AtlasResult<()> {
///     if axis >= ndim {
///         return Err(AtlasError::InvalidAxis { axis, ndim });
///     }
///     Ok(())
/// }
///
/// assert!(check_axis(3, 3).is_err());
/// assert!(check_axis(0, 3).is_ok());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// The region query is empty or names an attribute the region map does not know
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid axis: axis {axis} is out of bounds for a volume of dimension {ndim}")]
    InvalidAxis { axis: usize, ndim: usize },

    /// Layer metadata is missing mandatory keys or is inconsistent
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    /// Voxel grids that should share shape, voxel dimensions and offset do not
    #[error("Property mismatch: {0}")]
    PropertyMismatch(String),

    #[error("Invalid vector field: {0}")]
    InvalidVectorField(String),

    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
