// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! Property tests of the voxel-wise operations.

use ndarray::{Array3, Axis, Slice};
use proptest::prelude::*;

use atlas_structures::{RegionId, RegionIdSet};
use atlas_volumes::{region_mask_from_ids, split_into_halves};

fn volume_strategy() -> impl Strategy<Value = Array3<i32>> {
    (1usize..6, 1usize..6, 1usize..6).prop_flat_map(|(w, h, d)| {
        prop::collection::vec(-50i32..50, w * h * d)
            .prop_map(move |values| Array3::from_shape_vec((w, h, d), values).unwrap())
    })
}

proptest! {
    #[test]
    fn prop_halves_partition_the_volume(volume in volume_strategy(), axis in 0usize..3) {
        let (first, second) = split_into_halves(&volume, axis).unwrap();
        let halfway = volume.len_of(Axis(axis)) / 2;

        prop_assert_eq!(first.shape(), volume.shape());
        prop_assert_eq!(second.shape(), volume.shape());
        prop_assert_eq!(&first + &second, volume.clone());

        prop_assert!(first.slice_axis(Axis(axis), Slice::from(halfway..)).iter().all(|&v| v == 0));
        prop_assert!(second.slice_axis(Axis(axis), Slice::from(..halfway)).iter().all(|&v| v == 0));
        prop_assert_eq!(
            first.slice_axis(Axis(axis), Slice::from(..halfway)),
            volume.slice_axis(Axis(axis), Slice::from(..halfway))
        );
    }

    #[test]
    fn prop_mask_is_membership(volume in volume_strategy(), ids in prop::collection::vec(-50i64..50, 0..10)) {
        let ids: RegionIdSet = ids.into_iter().collect();
        let mask = region_mask_from_ids(&volume, &ids);

        prop_assert_eq!(mask.shape(), volume.shape());
        for (voxel, label) in mask.iter().zip(volume.iter()) {
            prop_assert_eq!(*voxel, ids.contains(&RegionId::from(*label)));
        }
    }
}
