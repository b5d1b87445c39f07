// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

/*!
RegionHierarchy - Tree of brain regions used to resolve region queries.

Manages parent-child relationships between regions so that a query can be
expanded to every descendant of the matched regions.
*/

use std::collections::BTreeSet;
use std::path::Path;

use ahash::AHashMap;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use atlas_structures::{AtlasError, AtlasResult, RegionId, RegionIdSet, RegionMap};

use crate::node::{RawRegion, RegionNode, ID_ATTRIBUTE};

/// Key wrapping the list of root regions in AIBS `1.json` files
const AIBS_ENVELOPE_KEY: &str = "msg";

/// Hierarchical tree structure for brain regions
///
/// # Design Notes
///
/// - Root regions have no entry in `parent_map`
/// - Region ids are unique across the whole tree
/// - Children keep the order of the hierarchy file
#[derive(Debug, Clone)]
pub struct RegionHierarchy {
    /// Map of region id -> region
    regions: AHashMap<RegionId, RegionNode>,

    /// Map of region id -> parent region id
    parent_map: AHashMap<RegionId, RegionId>,

    /// Map of region id -> child region ids
    children_map: AHashMap<RegionId, Vec<RegionId>>,

    /// First root region added
    root_id: Option<RegionId>,

    /// Every attribute name carried by at least one region
    attributes: BTreeSet<String>,
}

/// How a query string is compared with attribute values
enum Matcher {
    Exact(String),
    Pattern(Regex),
}

impl Matcher {
    fn parse(query: &str) -> AtlasResult<Self> {
        match query.strip_prefix('@') {
            Some(pattern) => Regex::new(pattern).map(Matcher::Pattern).map_err(|e| {
                AtlasError::InvalidQuery(format!("invalid regular expression '{}': {}", pattern, e))
            }),
            None => Ok(Matcher::Exact(query.to_string())),
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Exact(expected) => expected == text,
            Matcher::Pattern(regex) => regex.is_match(text),
        }
    }
}

impl RegionHierarchy {
    /// Create a new empty hierarchy
    pub fn new() -> Self {
        Self {
            regions: AHashMap::new(),
            parent_map: AHashMap::new(),
            children_map: AHashMap::new(),
            root_id: None,
            attributes: BTreeSet::from([ID_ATTRIBUTE.to_string()]),
        }
    }

    /// Build a hierarchy from a JSON document.
    ///
    /// Accepts either a single root region or the AIBS envelope
    /// `{"msg": [root, ...]}`.
    ///
    /// # Errors
    ///
    /// Returns `AtlasError::Json` if a region is malformed and
    /// `AtlasError::InvalidHierarchy` if a region id appears twice.
    pub fn from_json_value(value: Value) -> AtlasResult<Self> {
        let roots: Vec<RawRegion> = match value {
            Value::Object(mut object) if object.contains_key(AIBS_ENVELOPE_KEY) => {
                let envelope = object.remove(AIBS_ENVELOPE_KEY).unwrap_or(Value::Null);
                serde_json::from_value(envelope)?
            }
            other => vec![serde_json::from_value(other)?],
        };

        let mut hierarchy = Self::new();
        for root in roots {
            hierarchy.insert_subtree(root, None)?;
        }

        debug!(target: "atlas-region-map", "Loaded region hierarchy with {} regions", hierarchy.len());
        Ok(hierarchy)
    }

    pub fn from_json_str(json: &str) -> AtlasResult<Self> {
        Self::from_json_value(serde_json::from_str(json)?)
    }

    /// Load a hierarchy file, e.g. AIBS `1.json` or BBP `hierarchy.json`.
    pub fn load_json(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(target: "atlas-region-map", "Reading region hierarchy from {}", path.display());
        Self::from_json_str(&content)
    }

    fn insert_subtree(&mut self, raw: RawRegion, parent_id: Option<RegionId>) -> AtlasResult<()> {
        let RawRegion {
            id,
            children,
            attributes,
        } = raw;

        self.add_region(RegionNode { id, attributes }, parent_id)?;
        for child in children {
            self.insert_subtree(child, Some(id))?;
        }
        Ok(())
    }

    /// Add a region to the hierarchy
    ///
    /// # Arguments
    ///
    /// * `region` - The region to add
    /// * `parent_id` - Optional parent region id (None for a root)
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Region id already exists
    /// - Parent id doesn't exist
    pub fn add_region(&mut self, region: RegionNode, parent_id: Option<RegionId>) -> AtlasResult<()> {
        let region_id = region.id;

        if self.regions.contains_key(&region_id) {
            return Err(AtlasError::InvalidHierarchy(format!(
                "Region {} already exists",
                region_id
            )));
        }

        if let Some(parent) = parent_id {
            if !self.regions.contains_key(&parent) {
                return Err(AtlasError::InvalidHierarchy(format!(
                    "Parent region {} does not exist",
                    parent
                )));
            }
        }

        self.attributes.extend(region.attributes.keys().cloned());
        self.regions.insert(region_id, region);

        if let Some(parent) = parent_id {
            self.parent_map.insert(region_id, parent);
            self.children_map.entry(parent).or_default().push(region_id);
        } else if self.root_id.is_none() {
            self.root_id = Some(region_id);
        }

        Ok(())
    }

    /// Find the ids of the regions whose `attribute` matches `query`.
    ///
    /// A query starting with `@` is a regular expression searched anywhere in
    /// the attribute value; any other query must equal the value exactly.
    /// Without descendants, only the matched regions themselves are returned,
    /// whether they are leaves or not.
    ///
    /// # Errors
    ///
    /// Returns `AtlasError::InvalidQuery` if no region carries `attribute` or
    /// the regular expression does not compile.
    pub fn find(&self, query: &str, attribute: &str, with_descendants: bool) -> AtlasResult<RegionIdSet> {
        if !self.attributes.contains(attribute) {
            return Err(AtlasError::InvalidQuery(format!(
                "Unknown attribute: {}",
                attribute
            )));
        }

        let matcher = Matcher::parse(query)?;
        let mut ids: RegionIdSet = self
            .regions
            .values()
            .filter(|region| {
                region
                    .attribute_text(attribute)
                    .is_some_and(|text| matcher.matches(&text))
            })
            .map(|region| region.id)
            .collect();

        if with_descendants {
            let matched: Vec<RegionId> = ids.iter().copied().collect();
            for region_id in matched {
                ids.extend(self.descendants(region_id));
            }
        }

        debug!(target: "atlas-region-map", "Query {}={} matched {} region ids", attribute, query, ids.len());
        Ok(ids)
    }

    /// Get a region by id
    pub fn get(&self, region_id: RegionId) -> Option<&RegionNode> {
        self.regions.get(&region_id)
    }

    /// Get the parent of a region
    pub fn parent(&self, region_id: RegionId) -> Option<RegionId> {
        self.parent_map.get(&region_id).copied()
    }

    /// Get the direct children of a region
    pub fn children(&self, region_id: RegionId) -> &[RegionId] {
        self.children_map
            .get(&region_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Get all descendant regions (recursive), excluding `region_id` itself
    pub fn descendants(&self, region_id: RegionId) -> Vec<RegionId> {
        let mut descendants = Vec::new();
        let mut to_visit = vec![region_id];

        while let Some(current) = to_visit.pop() {
            for &child in self.children(current) {
                descendants.push(child);
                to_visit.push(child);
            }
        }

        descendants
    }

    /// Get the ancestors of a region, closest first
    pub fn ancestors(&self, region_id: RegionId) -> Vec<RegionId> {
        let mut ancestors = Vec::new();
        let mut current = region_id;

        while let Some(parent) = self.parent(current) {
            ancestors.push(parent);
            current = parent;
        }

        ancestors
    }

    pub fn is_leaf(&self, region_id: RegionId) -> bool {
        self.children(region_id).is_empty()
    }

    pub fn root_id(&self) -> Option<RegionId> {
        self.root_id
    }

    /// Get the total number of regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Default for RegionHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionMap for RegionHierarchy {
    fn resolve(&self, attribute: &str, query: &str, with_descendants: bool) -> AtlasResult<RegionIdSet> {
        self.find(query, attribute, with_descendants)
    }
}
