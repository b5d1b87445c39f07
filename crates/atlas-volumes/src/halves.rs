// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! Splitting a volume into two halves along an axis (e.g. left/right hemispheres).

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Slice};
use tracing::debug;

use atlas_structures::{AtlasError, AtlasResult};

/// Axis orthogonal to the midsagittal plane in the usual atlas orientation
pub const DEFAULT_SPLIT_AXIS: usize = 0;

/// `(first_half, second_half)`, both with the shape and element type of the input
pub type VolumeHalves<A, D> = (Array<A, D>, Array<A, D>);

/// Split `volume` into two halves at the middle of `axis`.
///
/// With `L = volume.len_of(axis)` and `m = L / 2`, the first half keeps the
/// indices `[0, m)` and the second half keeps `[m, L)`; the other voxels are
/// set to `A::default()`. For odd `L` the middle slice goes to the second half.
///
/// # Errors
///
/// Returns `AtlasError::InvalidAxis` if `axis >= volume.ndim()`.
///
/// # Examples
/// ```
/// use ndarray::arr2;
/// use atlas_volumes::split_into_halves;
///
/// let volume = arr2(&[[1, 2], [3, 4], [5, 6]]);
/// let (first, second) = split_into_halves(&volume, 0).unwrap();
/// assert_eq!(first, arr2(&[[1, 2], [0, 0], [0, 0]]));
/// assert_eq!(second, arr2(&[[0, 0], [3, 4], [5, 6]]));
/// ```
pub fn split_into_halves<S, D>(volume: &ArrayBase<S, D>, axis: usize) -> AtlasResult<VolumeHalves<S::Elem, D>>
where
    S: Data,
    S::Elem: Clone + Default,
    D: Dimension,
{
    split_into_halves_with_offset(volume, axis, 0)
}

/// Same as [`split_into_halves`] with the split index moved by `halfway_offset`.
///
/// The split index `L / 2 + halfway_offset` is clamped to `[0, L]`.
pub fn split_into_halves_with_offset<S, D>(
    volume: &ArrayBase<S, D>,
    axis: usize,
    halfway_offset: isize,
) -> AtlasResult<VolumeHalves<S::Elem, D>>
where
    S: Data,
    S::Elem: Clone + Default,
    D: Dimension,
{
    let ndim = volume.ndim();
    if axis >= ndim {
        return Err(AtlasError::InvalidAxis { axis, ndim });
    }

    let length = volume.len_of(Axis(axis));
    let halfway = split_index(length, halfway_offset);
    debug!(target: "atlas-volumes", "Splitting axis {} of length {} at index {}", axis, length, halfway);

    let mut first_half = volume.to_owned();
    first_half
        .slice_axis_mut(Axis(axis), Slice::from(halfway..))
        .fill(S::Elem::default());

    let mut second_half = volume.to_owned();
    second_half
        .slice_axis_mut(Axis(axis), Slice::from(..halfway))
        .fill(S::Elem::default());

    Ok((first_half, second_half))
}

fn split_index(length: usize, halfway_offset: isize) -> usize {
    let length = length as isize;
    (length / 2).saturating_add(halfway_offset).clamp(0, length) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr3, Array3, Array4};

    fn example_volume() -> Array3<i64> {
        arr3(&[[[0, 1, 2], [2, 3, 4]], [[4, 5, 6], [7, 8, 9]]])
    }

    #[test]
    fn test_split_first_axis() {
        let (first, second) = split_into_halves(&example_volume(), DEFAULT_SPLIT_AXIS).unwrap();
        assert_eq!(first, arr3(&[[[0, 1, 2], [2, 3, 4]], [[0, 0, 0], [0, 0, 0]]]));
        assert_eq!(second, arr3(&[[[0, 0, 0], [0, 0, 0]], [[4, 5, 6], [7, 8, 9]]]));
    }

    #[test]
    fn test_split_last_axis_odd_length() {
        // Middle index of an odd axis belongs to the second half
        let (first, second) = split_into_halves(&example_volume(), 2).unwrap();
        assert_eq!(first, arr3(&[[[0, 0, 0], [2, 0, 0]], [[4, 0, 0], [7, 0, 0]]]));
        assert_eq!(second, arr3(&[[[0, 1, 2], [0, 3, 4]], [[0, 5, 6], [0, 8, 9]]]));
    }

    #[test]
    fn test_length_one_axis() {
        let volume = arr1(&[5.5f32]);
        let (first, second) = split_into_halves(&volume, 0).unwrap();
        assert_eq!(first, arr1(&[0.0]));
        assert_eq!(second, volume);
    }

    #[test]
    fn test_length_two_axis() {
        let volume = arr1(&[3u8, 9]);
        let (first, second) = split_into_halves(&volume, 0).unwrap();
        assert_eq!(first, arr1(&[3, 0]));
        assert_eq!(second, arr1(&[0, 9]));
    }

    #[test]
    fn test_invalid_axis() {
        let result = split_into_halves(&example_volume(), 3);
        assert!(matches!(result, Err(AtlasError::InvalidAxis { axis: 3, ndim: 3 })));
    }

    #[test]
    fn test_boolean_volume() {
        let volume = Array3::from_elem((4, 1, 1), true);
        let (first, second) = split_into_halves(&volume, 0).unwrap();
        assert_eq!(first.iter().filter(|&&voxel| voxel).count(), 2);
        assert!(!first[[2, 0, 0]]);
        assert!(second[[2, 0, 0]]);
    }

    #[test]
    fn test_four_dimensional_volume() {
        let volume = Array4::from_elem((2, 3, 4, 3), 1.0f64);
        let (first, second) = split_into_halves(&volume, 2).unwrap();
        assert_eq!(first.shape(), volume.shape());
        assert_eq!(first.sum(), 2.0 * 3.0 * 2.0 * 3.0);
        assert_eq!(&first + &second, volume);
    }

    #[test]
    fn test_input_is_not_modified() {
        let volume = example_volume();
        let _ = split_into_halves(&volume, 1).unwrap();
        assert_eq!(volume, example_volume());
    }

    #[test]
    fn test_offset_split() {
        let volume = arr1(&[1, 2, 3, 4, 5, 6]);
        let (first, second) = split_into_halves_with_offset(&volume, 0, 1).unwrap();
        assert_eq!(first, arr1(&[1, 2, 3, 4, 0, 0]));
        assert_eq!(second, arr1(&[0, 0, 0, 0, 5, 6]));

        let (first, second) = split_into_halves_with_offset(&volume, 0, -2).unwrap();
        assert_eq!(first, arr1(&[1, 0, 0, 0, 0, 0]));
        assert_eq!(second, arr1(&[0, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_offset_is_clamped() {
        let volume = arr1(&[1, 2, 3]);
        let (first, second) = split_into_halves_with_offset(&volume, 0, 10).unwrap();
        assert_eq!(first, volume);
        assert_eq!(second, arr1(&[0, 0, 0]));

        let (first, second) = split_into_halves_with_offset(&volume, 0, -10).unwrap();
        assert_eq!(first, arr1(&[0, 0, 0]));
        assert_eq!(second, volume);
    }

    #[test]
    fn test_split_index() {
        assert_eq!(split_index(0, 0), 0);
        assert_eq!(split_index(1, 0), 0);
        assert_eq!(split_index(5, 0), 2);
        assert_eq!(split_index(5, isize::MAX), 5);
    }
}
