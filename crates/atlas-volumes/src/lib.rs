// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

/*!
# Atlas Volumes

Helpers operating on voxelized brain-atlas volumes held in `ndarray` arrays:
- Region masks from hierarchical region queries
- Splitting a volume into two halves (e.g. hemispheres) along an axis
- Layered volumes and per-layer masks built from layer metadata
- Vector field normalisation
- Consistency checks of voxel grid metadata across atlas files

Every operation is pure: inputs are borrowed, outputs are freshly allocated.
With the `parallel` feature (default), the per-voxel passes run on rayon.
*/

pub mod grid;
pub mod halves;
pub mod layers;
pub mod mask;
pub mod vector_field;

pub use grid::{assert_meta_properties, assert_properties, compare_all, VoxelGridMeta};
pub use halves::{split_into_halves, split_into_halves_with_offset, VolumeHalves, DEFAULT_SPLIT_AXIS};
pub use layers::{create_layered_volume, get_layer_masks};
pub use mask::{get_region_mask, query_region_mask, region_mask_from_ids};
pub use vector_field::{normalize, normalized, zero_to_nan};
