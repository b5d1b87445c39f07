// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! Boolean masks of the voxels belonging to queried regions.

use ndarray::{Array, ArrayBase, Data, Dimension, Zip};
use tracing::{debug, instrument};

use atlas_structures::{AnnotationLabel, AtlasResult, RegionIdSet, RegionMap, RegionQuery};

/// Create a mask for the region defined by `region`.
///
/// # Arguments
/// * `region` - Query, attribute and descendants flag forwarded to the region map
/// * `annotation` - Volume of region ids containing the region to mask
/// * `region_map` - Region hierarchy lookup
///
/// # Returns
/// * `Array<bool, D>` - Same shape as `annotation`, `true` where the voxel id
///   belongs to the resolved set. All `false` if nothing matches.
///
/// # Errors
///
/// Returns `AtlasError::InvalidQuery` if the query is empty or the region map
/// does not know the attribute.
#[instrument(level = "trace", skip(annotation, region_map), fields(shape = ?annotation.shape()))]
pub fn query_region_mask<S, D, M>(
    region: &RegionQuery,
    annotation: &ArrayBase<S, D>,
    region_map: &M,
) -> AtlasResult<Array<bool, D>>
where
    S: Data,
    S::Elem: AnnotationLabel,
    D: Dimension,
    M: RegionMap + ?Sized,
{
    let ids = region.resolve(region_map)?;
    debug!(target: "atlas-volumes", "Region {} resolved to {} ids", region, ids.len());

    Ok(region_mask_from_ids(annotation, &ids))
}

/// Create a mask for the region with the given `acronym`, descendants included.
///
/// An acronym starting with `@` is interpreted as a regular expression by
/// region maps supporting it.
pub fn get_region_mask<S, D, M>(
    acronym: &str,
    annotation: &ArrayBase<S, D>,
    region_map: &M,
) -> AtlasResult<Array<bool, D>>
where
    S: Data,
    S::Elem: AnnotationLabel,
    D: Dimension,
    M: RegionMap + ?Sized,
{
    let region = RegionQuery::acronym(acronym).with_descendants(true);
    query_region_mask(&region, annotation, region_map)
}

/// Membership test of every voxel label against an already resolved id set.
pub fn region_mask_from_ids<S, D>(annotation: &ArrayBase<S, D>, ids: &RegionIdSet) -> Array<bool, D>
where
    S: Data,
    S::Elem: AnnotationLabel,
    D: Dimension,
{
    if ids.is_empty() {
        return Array::from_elem(annotation.raw_dim(), false);
    }

    let contains = |label: &S::Elem| label.region_id().is_some_and(|id| ids.contains(&id));

    #[cfg(feature = "parallel")]
    {
        Zip::from(annotation.view()).par_map_collect(contains)
    }
    #[cfg(not(feature = "parallel"))]
    {
        Zip::from(annotation.view()).map_collect(contains)
    }
}
