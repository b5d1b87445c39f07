// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

/*!
Voxel grid metadata and consistency checks across atlas files.

Atlas files used together (annotation, orientation field, density, ...) must
live on the same voxel grid: same spatial shape, same voxel dimensions and
same offset.
*/

use ndarray::{ArrayBase, Data, Dimension};

use atlas_structures::{AtlasError, AtlasResult};

/// Relative tolerance of float comparisons
const RELATIVE_TOLERANCE: f64 = 1e-5;

/// Absolute tolerance of float comparisons
const ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Placement of a voxel array in space.
///
/// `raw_shape` is the full array shape, possibly with trailing component axes
/// (e.g. `(W, H, D, 3)` for direction vectors). The spatial shape is its first
/// `voxel_dimensions.len()` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGridMeta {
    raw_shape: Vec<usize>,
    voxel_dimensions: Vec<f64>,
    offset: Vec<f64>,
}

impl VoxelGridMeta {
    /// # Errors
    ///
    /// Returns `AtlasError::PropertyMismatch` if `voxel_dimensions` and
    /// `offset` have different lengths or more entries than `raw_shape` has axes.
    pub fn new(raw_shape: Vec<usize>, voxel_dimensions: Vec<f64>, offset: Vec<f64>) -> AtlasResult<Self> {
        if voxel_dimensions.len() != offset.len() {
            return Err(AtlasError::PropertyMismatch(format!(
                "voxel_dimensions has {} entries but offset has {}",
                voxel_dimensions.len(),
                offset.len()
            )));
        }
        if voxel_dimensions.len() > raw_shape.len() {
            return Err(AtlasError::PropertyMismatch(format!(
                "{} voxel dimensions for an array of dimension {}",
                voxel_dimensions.len(),
                raw_shape.len()
            )));
        }
        Ok(Self {
            raw_shape,
            voxel_dimensions,
            offset,
        })
    }

    /// Grid metadata of `array` placed with `voxel_dimensions` and `offset`
    pub fn from_array<S, D>(array: &ArrayBase<S, D>, voxel_dimensions: Vec<f64>, offset: Vec<f64>) -> AtlasResult<Self>
    where
        S: Data,
        D: Dimension,
    {
        Self::new(array.shape().to_vec(), voxel_dimensions, offset)
    }

    pub fn raw_shape(&self) -> &[usize] {
        &self.raw_shape
    }

    /// Spatial shape, without the trailing component axes
    pub fn shape(&self) -> &[usize] {
        &self.raw_shape[..self.voxel_dimensions.len()]
    }

    pub fn voxel_dimensions(&self) -> &[f64] {
        &self.voxel_dimensions
    }

    pub fn offset(&self) -> &[f64] {
        &self.offset
    }
}

/// Compare, using `comparator`, the values `accessor` extracts from every item
/// with the value of the first item.
///
/// ```
/// use atlas_volumes::compare_all;
///
/// let shapes = [vec![2, 3], vec![2, 3]];
/// assert!(compare_all(&shapes, |shape| shape.clone(), |a, b| a == b));
/// ```
pub fn compare_all<T, V, F, C>(items: &[T], accessor: F, comparator: C) -> bool
where
    F: Fn(&T) -> V,
    C: Fn(&V, &V) -> bool,
{
    let Some((first, others)) = items.split_first() else {
        return true;
    };
    let reference = accessor(first);
    others.iter().all(|other| comparator(&reference, &accessor(other)))
}

/// Assert that all grids share raw shape, voxel dimensions and offset.
///
/// # Errors
///
/// Returns `AtlasError::PropertyMismatch` naming the first property that differs.
pub fn assert_properties(grids: &[VoxelGridMeta]) -> AtlasResult<()> {
    if !compare_all(grids, |grid| grid.raw_shape().to_vec(), |a, b| a == b) {
        return Err(mismatch("shape"));
    }
    assert_placement(grids)
}

/// Assert that all grids share spatial shape, voxel dimensions and offset.
///
/// Unlike [`assert_properties`], trailing component axes are ignored: an
/// annotation of shape `(W, H, D)` and direction vectors of shape
/// `(W, H, D, 3)` are consistent.
///
/// # Errors
///
/// Returns `AtlasError::PropertyMismatch` naming the first property that differs.
pub fn assert_meta_properties(grids: &[VoxelGridMeta]) -> AtlasResult<()> {
    if !compare_all(grids, |grid| grid.shape().to_vec(), |a, b| a == b) {
        return Err(mismatch("shape"));
    }
    assert_placement(grids)
}

fn assert_placement(grids: &[VoxelGridMeta]) -> AtlasResult<()> {
    if !compare_all(grids, |grid| grid.voxel_dimensions().to_vec(), |a, b| all_close(a, b)) {
        return Err(mismatch("voxel_dimensions"));
    }
    if !compare_all(grids, |grid| grid.offset().to_vec(), |a, b| all_close(a, b)) {
        return Err(mismatch("offset"));
    }
    Ok(())
}

fn mismatch(property: &str) -> AtlasError {
    AtlasError::PropertyMismatch(format!("Need to have the same {} for all files", property))
}

fn all_close(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| (x - y).abs() <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * y.abs())
}
