// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

/*!
# Atlas Region Map

Region hierarchy lookup for annotation volumes.

A [`RegionHierarchy`] is loaded from an AIBS-style JSON hierarchy (a tree of
regions with `id`, `acronym`, `name` and `children`) and implements the
[`RegionMap`](atlas_structures::RegionMap) capability consumed by the mask and
layer builders.

```rust
use atlas_region_map::RegionHierarchy;

let hierarchy = RegionHierarchy::from_json_str(
    r#"{"id": 315, "acronym": "Isocortex", "name": "Isocortex",
        "children": [{"id": 500, "acronym": "MO", "name": "Somatomotor areas", "children": []}]}"#,
)?;
let ids = hierarchy.find("Isocortex", "acronym", true)?;
assert_eq!(ids.len(), 2);
# Ok::<(), atlas_structures::AtlasError>(())
```
*/

pub mod hierarchy;
pub mod node;

pub use hierarchy::RegionHierarchy;
pub use node::RegionNode;
