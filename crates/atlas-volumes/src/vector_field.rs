// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! Vector fields of shape `(..., N)`, such as direction vectors or orientation
//! quaternions. The last axis holds the `N` components of each vector.

use ndarray::{Array, ArrayBase, ArrayView1, Axis, Data, DataMut, Dimension, NdFloat};

use atlas_structures::{AtlasError, AtlasResult};

/// Turn, in place, the zero vectors of a vector field into NaN vectors.
///
/// A zero vector (or zero quaternion) cannot define a direction or an
/// orientation; NaN coordinates mark it invalid and propagate through later
/// products instead of raising.
///
/// Integer fields are rejected at compile time through the `NdFloat` bound.
///
/// # Errors
///
/// Returns `AtlasError::InvalidVectorField` for a 0-dimensional field.
pub fn zero_to_nan<A, S, D>(field: &mut ArrayBase<S, D>) -> AtlasResult<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
    D: Dimension,
{
    let components = component_axis(field.ndim())?;
    for mut vector in field.lanes_mut(components) {
        if euclidean_norm(vector.view()) == A::zero() {
            vector.fill(A::nan());
        }
    }
    Ok(())
}

/// Normalize in place each vector of the field wrt the Euclidean norm.
///
/// Zero vectors become NaN vectors. NaN vectors are left unchanged.
pub fn normalize<A, S, D>(field: &mut ArrayBase<S, D>) -> AtlasResult<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
    D: Dimension,
{
    let components = component_axis(field.ndim())?;
    for mut vector in field.lanes_mut(components) {
        let norm = euclidean_norm(vector.view());
        if norm > A::zero() {
            vector.mapv_inplace(|component| component / norm);
        } else if norm == A::zero() {
            vector.fill(A::nan());
        }
    }
    Ok(())
}

/// Normalized copy of `field`, see [`normalize`].
///
/// Integer fields are normalized after conversion, e.g. `field.mapv(f64::from)`.
pub fn normalized<A, S, D>(field: &ArrayBase<S, D>) -> AtlasResult<Array<A, D>>
where
    A: NdFloat,
    S: Data<Elem = A>,
    D: Dimension,
{
    let mut normalized = field.to_owned();
    normalize(&mut normalized)?;
    Ok(normalized)
}

fn component_axis(ndim: usize) -> AtlasResult<Axis> {
    match ndim {
        0 => Err(AtlasError::InvalidVectorField(
            "a vector field needs at least one axis for its components".to_string(),
        )),
        _ => Ok(Axis(ndim - 1)),
    }
}

fn euclidean_norm<A: NdFloat>(vector: ArrayView1<'_, A>) -> A {
    vector
        .iter()
        .fold(A::zero(), |sum, &component| sum + component * component)
        .sqrt()
}
