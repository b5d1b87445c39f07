// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

/*!
Layer metadata.

Describes a region of interest and the ordered list of layers it is made of,
e.g.

```json
{
    "region": {"name": "aibs_isocortex", "query": "Isocortex", "attribute": "acronym"},
    "layers": {
        "names": ["layer 1", "layer 2", "layer 3", "layer 4", "layer 5", "layer 6"],
        "queries": ["@.*;L1$", "@.*;L2$", "@.*;L3$", "@.*;L4$", "@.*;L5$", "@.*;L6$"],
        "attribute": "acronym"
    }
}
```
*/

use std::collections::BTreeSet;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AtlasError, AtlasResult, RegionQuery};

const REGION_KEYS: [&str; 3] = ["name", "query", "attribute"];
const LAYERS_KEYS: [&str; 3] = ["names", "queries", "attribute"];

/// Region of interest containing the layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDefinition {
    pub name: String,
    pub query: String,
    pub attribute: String,
    #[serde(default)]
    pub with_descendants: bool,
}

impl RegionDefinition {
    pub fn to_query(&self) -> RegionQuery {
        RegionQuery::new(self.query.clone(), self.attribute.clone())
            .with_descendants(self.with_descendants)
    }
}

/// Ordered layer names and the queries selecting each layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDefinitions {
    pub names: Vec<String>,
    pub queries: Vec<String>,
    pub attribute: String,
    #[serde(default)]
    pub with_descendants: bool,
}

impl LayerDefinitions {
    /// Queries of every layer, in layer order
    pub fn to_queries(&self) -> impl Iterator<Item = RegionQuery> + '_ {
        self.queries.iter().map(move |query| {
            RegionQuery::new(query.clone(), self.attribute.clone())
                .with_descendants(self.with_descendants)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub region: RegionDefinition,
    pub layers: LayerDefinitions,
}

impl Metadata {
    /// Build metadata from a JSON document, reporting missing keys by name.
    pub fn from_value(value: Value) -> AtlasResult<Self> {
        assert_metadata_content(&value)?;
        let metadata: Metadata = serde_json::from_value(value)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Check the invariants the layer builder relies on.
    ///
    /// # Errors
    ///
    /// Returns `AtlasError::InvalidMetadata` if:
    /// - `names` and `queries` have different lengths
    /// - there are more layers than fit in a `u8` label
    /// - a layer name is repeated
    pub fn validate(&self) -> AtlasResult<()> {
        let layers = &self.layers;
        if layers.names.len() != layers.queries.len() {
            return Err(AtlasError::InvalidMetadata(format!(
                "The values of \"names\" and \"queries\" must be lists of the same length. Got {} names and {} queries.",
                layers.names.len(),
                layers.queries.len()
            )));
        }

        if layers.names.len() > u8::MAX as usize {
            return Err(AtlasError::InvalidMetadata(format!(
                "At most {} layers are supported, got {}",
                u8::MAX,
                layers.names.len()
            )));
        }

        let mut seen = AHashSet::with_capacity(layers.names.len());
        for name in &layers.names {
            if !seen.insert(name.as_str()) {
                return Err(AtlasError::InvalidMetadata(format!(
                    "Duplicate layer name \"{}\"",
                    name
                )));
            }
        }

        Ok(())
    }

    pub fn layer_count(&self) -> usize {
        self.layers.names.len()
    }
}

/// Raise an error if some mandatory key is missing in `metadata`.
///
/// # Errors
///
/// Returns `AtlasError::InvalidMetadata` if a mandatory key is missing or if
/// the layer names and queries are not lists of the same length.
pub fn assert_metadata_content(metadata: &Value) -> AtlasResult<()> {
    let region = metadata
        .get("region")
        .ok_or_else(|| AtlasError::InvalidMetadata("Missing \"region\" key".to_string()))?;
    check_mandatory_keys(region, "region", &REGION_KEYS)?;

    let layers = metadata
        .get("layers")
        .ok_or_else(|| AtlasError::InvalidMetadata("Missing \"layers\" key".to_string()))?;
    check_mandatory_keys(layers, "layers", &LAYERS_KEYS)?;

    match (layers["names"].as_array(), layers["queries"].as_array()) {
        (Some(names), Some(queries)) if names.len() == queries.len() => Ok(()),
        _ => Err(AtlasError::InvalidMetadata(
            "The values of \"names\" and \"queries\" must be lists of the same length.".to_string(),
        )),
    }
}

fn check_mandatory_keys(section: &Value, section_name: &str, keys: &[&str]) -> AtlasResult<()> {
    let missing: BTreeSet<&str> = keys
        .iter()
        .copied()
        .filter(|key| section.get(key).is_none())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let expected = keys
        .iter()
        .map(|key| format!("\"{}\"", key))
        .collect::<Vec<_>>()
        .join(", ");
    Err(AtlasError::InvalidMetadata(format!(
        "The \"{}\" dictionary has the following mandatory keys: {}. Missing: {:?}.",
        section_name, expected, missing
    )))
}
