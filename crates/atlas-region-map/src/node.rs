// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

/*!
RegionNode data model.

One node of the region hierarchy: its identifier plus every scalar attribute
found in the hierarchy file (acronym, name, color_hex_triplet, ...).
*/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use atlas_structures::region::{ACRONYM_ATTRIBUTE, NAME_ATTRIBUTE};
use atlas_structures::RegionId;

/// Attribute holding the region identifier
pub const ID_ATTRIBUTE: &str = "id";

/// A region of the hierarchy, without its children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionNode {
    pub id: RegionId,

    /// Remaining attributes of the region
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RegionNode {
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
    }

    /// Add an attribute, builder style
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn acronym(&self) -> Option<&str> {
        self.attributes.get(ACRONYM_ATTRIBUTE).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get(NAME_ATTRIBUTE).and_then(Value::as_str)
    }

    /// String form of `attribute`, as matched by queries.
    ///
    /// Returns `None` when the region has no such attribute or it is null.
    pub fn attribute_text(&self, attribute: &str) -> Option<String> {
        if attribute == ID_ATTRIBUTE {
            return Some(self.id.to_string());
        }
        match self.attributes.get(attribute)? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Hierarchy node as found in JSON files
#[derive(Debug, Deserialize)]
pub(crate) struct RawRegion {
    pub id: RegionId,

    #[serde(default)]
    pub children: Vec<RawRegion>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_text() {
        let node = RegionNode::new(315)
            .with_attribute("acronym", "Isocortex")
            .with_attribute("graph_order", 5)
            .with_attribute("parent_structure_id", Value::Null);

        assert_eq!(node.acronym(), Some("Isocortex"));
        assert_eq!(node.name(), None);
        assert_eq!(node.attribute_text("id").as_deref(), Some("315"));
        assert_eq!(node.attribute_text("graph_order").as_deref(), Some("5"));
        assert_eq!(node.attribute_text("parent_structure_id"), None);
        assert_eq!(node.attribute_text("color"), None);
    }

    #[test]
    fn test_raw_region_keeps_extra_attributes() {
        let raw: RawRegion = serde_json::from_str(
            r#"{"id": 1, "acronym": "root", "color_hex_triplet": "FFFFFF"}"#,
        )
        .unwrap();
        assert_eq!(raw.id, 1);
        assert!(raw.children.is_empty());
        assert_eq!(raw.attributes["color_hex_triplet"], "FFFFFF");
    }
}
