// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! The core crate for atlas-commons. Defines the error type, the region query
//! contract and the layer metadata shared throughout the workspace.

mod error;
pub mod metadata;
pub mod region;

pub use error::{AtlasError, AtlasResult};
pub use metadata::{assert_metadata_content, LayerDefinitions, Metadata, RegionDefinition};
pub use region::{AnnotationLabel, RegionId, RegionIdSet, RegionMap, RegionQuery};
