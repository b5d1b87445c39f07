// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

/*!
Region queries and the region map capability.

A region map resolves a symbolic query (an acronym, a name, a regular
expression prefixed with `@`) to the set of integer identifiers used to label
voxels of annotation volumes.
*/

use std::fmt::{Debug, Display, Formatter};

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::{AtlasError, AtlasResult};

/// Integer identifier of a brain region, as stored in annotation volumes
pub type RegionId = i64;

/// Set of region identifiers returned by a region map
pub type RegionIdSet = AHashSet<RegionId>;

/// Attribute holding region acronyms in region hierarchies
pub const ACRONYM_ATTRIBUTE: &str = "acronym";

/// Attribute holding full region names in region hierarchies
pub const NAME_ATTRIBUTE: &str = "name";

/// A request for the regions whose `attribute` matches `query`.
///
/// # Examples
/// ```
/// use atlas_structures::RegionQuery;
///
/// let query = RegionQuery::acronym("Isocortex").with_descendants(true);
/// assert_eq!(query.attribute, "acronym");
/// assert!(query.with_descendants);
///
/// let parsed: RegionQuery =
///     serde_json::from_str(r#"{"query": "@.*layer 1", "attribute": "name"}"#).unwrap();
/// assert!(!parsed.with_descendants);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionQuery {
    /// Value matched against `attribute`; a leading `@` makes it a regular expression
    pub query: String,

    /// Which region attribute to match, e.g. "acronym" or "name"
    pub attribute: String,

    /// Also include every descendant of the matched regions
    #[serde(default)]
    pub with_descendants: bool,
}

impl RegionQuery {
    pub fn new(query: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            attribute: attribute.into(),
            with_descendants: false,
        }
    }

    /// Query matching the `acronym` attribute
    pub fn acronym(query: impl Into<String>) -> Self {
        Self::new(query, ACRONYM_ATTRIBUTE)
    }

    /// Query matching the `name` attribute
    pub fn name(query: impl Into<String>) -> Self {
        Self::new(query, NAME_ATTRIBUTE)
    }

    pub fn with_descendants(mut self, with_descendants: bool) -> Self {
        self.with_descendants = with_descendants;
        self
    }

    /// Resolve this query against `region_map`.
    ///
    /// # Errors
    ///
    /// Returns `AtlasError::InvalidQuery` if the query string is empty or the
    /// region map does not recognise the attribute.
    pub fn resolve<M>(&self, region_map: &M) -> AtlasResult<RegionIdSet>
    where
        M: RegionMap + ?Sized,
    {
        if self.query.is_empty() {
            return Err(AtlasError::InvalidQuery(format!(
                "empty query for attribute '{}'",
                self.attribute
            )));
        }
        region_map.resolve(&self.attribute, &self.query, self.with_descendants)
    }
}

impl Display for RegionQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.attribute, self.query)?;
        if self.with_descendants {
            write!(f, " (with descendants)")?;
        }
        Ok(())
    }
}

/// Hierarchy lookup resolving region queries to region identifiers.
///
/// Implementors decide how `query` is matched against `attribute`; the mask
/// and layer builders only depend on this method.
pub trait RegionMap {
    /// Resolve `query` on `attribute` to a set of region identifiers.
    ///
    /// An empty set is a valid answer when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `AtlasError::InvalidQuery` when `attribute` is unknown.
    fn resolve(
        &self,
        attribute: &str,
        query: &str,
        with_descendants: bool,
    ) -> AtlasResult<RegionIdSet>;
}

/// Voxel label type of an annotation volume.
///
/// Implemented for every primitive integer. Labels that cannot be represented
/// as a [`RegionId`] never belong to any region.
pub trait AnnotationLabel: Copy + Send + Sync + Debug {
    fn region_id(self) -> Option<RegionId>;
}

macro_rules! impl_annotation_label {
    ($($inner:ty),* $(,)?) => {
        $(
            impl AnnotationLabel for $inner {
                #[inline]
                fn region_id(self) -> Option<RegionId> {
                    RegionId::try_from(self).ok()
                }
            }
        )*
    };
}

impl_annotation_label!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
