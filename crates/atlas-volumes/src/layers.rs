// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

/*!
Layered volumes.

Labels the voxels of a region of interest (e.g. the isocortex) by the 1-based
index of the layer they belong to, as described by layer [`Metadata`].
*/

use std::collections::HashMap;

use ndarray::{Array, ArrayBase, Data, Dimension, Zip};
use tracing::{debug, instrument};

use atlas_structures::{AnnotationLabel, AtlasError, AtlasResult, Metadata, RegionIdSet, RegionMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Create a volume whose voxels are labeled by 1-based layer indices.
///
/// For the layer at position `i` (1-based) in `metadata.layers`, voxels whose
/// id is selected both by the layer query and by the region query are set to
/// `i`. Voxels out of the region are labeled 0. If layer queries overlap, the
/// later layer wins.
///
/// # Errors
///
/// Returns `AtlasError::InvalidMetadata` if `metadata` is inconsistent and
/// `AtlasError::InvalidQuery` if a query cannot be resolved.
#[instrument(level = "trace", skip_all, fields(region = %metadata.region.name, layers = metadata.layer_count()))]
pub fn create_layered_volume<S, D, M>(
    annotation: &ArrayBase<S, D>,
    region_map: &M,
    metadata: &Metadata,
) -> AtlasResult<Array<u8, D>>
where
    S: Data,
    S::Elem: AnnotationLabel,
    D: Dimension,
    M: RegionMap + ?Sized,
{
    metadata.validate()?;

    let region_ids = metadata.region.to_query().resolve(region_map)?;
    let mut layers = Array::<u8, D>::zeros(annotation.raw_dim());

    for (position, query) in metadata.layers.to_queries().enumerate() {
        let index = u8::try_from(position + 1).map_err(|_| {
            AtlasError::InvalidMetadata(format!("Layer index {} does not fit in a u8", position + 1))
        })?;

        let layer_ids: RegionIdSet = query
            .resolve(region_map)?
            .intersection(&region_ids)
            .copied()
            .collect();
        debug!(target: "atlas-volumes", "Layer {} ({}) selects {} region ids", index, query, layer_ids.len());

        if layer_ids.is_empty() {
            continue;
        }

        let label_layer = |layer: &mut u8, label: &S::Elem| {
            if label.region_id().is_some_and(|id| layer_ids.contains(&id)) {
                *layer = index;
            }
        };

        #[cfg(feature = "parallel")]
        Zip::from(layers.view_mut())
            .and(annotation.view())
            .par_for_each(label_layer);
        #[cfg(not(feature = "parallel"))]
        Zip::from(layers.view_mut())
            .and(annotation.view())
            .for_each(label_layer);
    }

    Ok(layers)
}

/// Create a boolean mask of each layer in `metadata`, keyed by layer name.
///
/// # Errors
///
/// Same as [`create_layered_volume`].
pub fn get_layer_masks<S, D, M>(
    annotation: &ArrayBase<S, D>,
    region_map: &M,
    metadata: &Metadata,
) -> AtlasResult<HashMap<String, Array<bool, D>>>
where
    S: Data,
    S::Elem: AnnotationLabel,
    D: Dimension,
    M: RegionMap + ?Sized,
{
    let layers = create_layered_volume(annotation, region_map, metadata)?;
    let names = &metadata.layers.names;

    #[cfg(feature = "parallel")]
    let masks = names
        .par_iter()
        .enumerate()
        .map(|(position, name)| (name.clone(), layer_mask(&layers, position)))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let masks = names
        .iter()
        .enumerate()
        .map(|(position, name)| (name.clone(), layer_mask(&layers, position)))
        .collect();

    Ok(masks)
}

fn layer_mask<D: Dimension>(layers: &Array<u8, D>, position: usize) -> Array<bool, D> {
    // validate() bounds the layer count to u8::MAX, so position + 1 fits
    let index = (position + 1) as u8;
    layers.mapv(|label| label == index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_structures::{LayerDefinitions, RegionDefinition, RegionId};

    /// Region map where every query is the decimal list of ids it resolves to
    struct InlineIds;

    impl RegionMap for InlineIds {
        fn resolve(&self, _attribute: &str, query: &str, _with_descendants: bool) -> AtlasResult<RegionIdSet> {
            query
                .split(',')
                .map(|id| {
                    id.trim()
                        .parse::<RegionId>()
                        .map_err(|e| AtlasError::InvalidQuery(e.to_string()))
                })
                .collect()
        }
    }

    fn metadata(region: &str, layers: &[&str]) -> Metadata {
        Metadata {
            region: RegionDefinition {
                name: "region".to_string(),
                query: region.to_string(),
                attribute: "id".to_string(),
                with_descendants: false,
            },
            layers: LayerDefinitions {
                names: (1..=layers.len()).map(|i| format!("layer_{}", i)).collect(),
                queries: layers.iter().map(|query| query.to_string()).collect(),
                attribute: "id".to_string(),
                with_descendants: false,
            },
        }
    }

    #[test]
    fn test_layers_restricted_to_region() {
        let annotation = ndarray::arr2(&[[1u32, 2, 3], [4, 5, 6]]);
        let metadata = metadata("1,2,3,4,5", &["1,2", "3,6", "5"]);

        let layers = create_layered_volume(&annotation, &InlineIds, &metadata).unwrap();
        assert_eq!(layers, ndarray::arr2(&[[1, 1, 2], [0, 3, 0]]));
    }

    #[test]
    fn test_later_layer_wins_on_overlap() {
        let annotation = ndarray::arr1(&[1i16, 2]);
        let metadata = metadata("1,2", &["1,2", "2"]);

        let layers = create_layered_volume(&annotation, &InlineIds, &metadata).unwrap();
        assert_eq!(layers, ndarray::arr1(&[1, 2]));
    }

    #[test]
    fn test_layer_masks_by_name() {
        let annotation = ndarray::arr1(&[7u8, 8, 9, 7]);
        let metadata = metadata("7,8,9", &["7", "9"]);

        let masks = get_layer_masks(&annotation, &InlineIds, &metadata).unwrap();
        assert_eq!(masks.len(), 2);
        assert_eq!(masks["layer_1"], ndarray::arr1(&[true, false, false, true]));
        assert_eq!(masks["layer_2"], ndarray::arr1(&[false, false, true, false]));
    }

    #[test]
    fn test_inconsistent_metadata_is_rejected() {
        let annotation = ndarray::arr1(&[1u8]);
        let mut metadata = metadata("1", &["1"]);
        metadata.layers.names.push("extra".to_string());

        let result = create_layered_volume(&annotation, &InlineIds, &metadata);
        assert!(matches!(result, Err(AtlasError::InvalidMetadata(_))));
    }
}
