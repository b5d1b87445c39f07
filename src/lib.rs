// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! # atlas-commons
//!
//! Common helpers to build brain atlases from voxelized annotation volumes.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! atlas-commons = "0.1"  # Default: parallel + config + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`parallel`** (default): per-voxel passes on rayon
//! - **`config`** (default): metadata file loading and common CLI options
//! - **`observability`** (default): logging initialisation
//! - **`file-logging`**: JSON log file output
//!
//! ## Usage Examples
//!
//! ### Region mask
//!
//! ```rust
//! use atlas_commons::prelude::*;
//! use ndarray::arr1;
//!
//! let hierarchy = RegionHierarchy::from_json_str(
//!     r#"{"id": 315, "acronym": "Isocortex", "name": "Isocortex",
//!         "children": [{"id": 500, "acronym": "MO", "name": "Somatomotor areas"}]}"#,
//! )?;
//! let annotation = arr1(&[0u32, 315, 500]);
//!
//! let mask = get_region_mask("Isocortex", &annotation, &hierarchy)?;
//! assert_eq!(mask, arr1(&[false, true, true]));
//! # Ok::<(), AtlasError>(())
//! ```
//!
//! ### Hemispheres
//!
//! ```rust
//! use atlas_commons::prelude::*;
//! use ndarray::Array3;
//!
//! let annotation = Array3::<u32>::ones((4, 2, 2));
//! let (left, right) = split_into_halves(&annotation, DEFAULT_SPLIT_AXIS)?;
//! assert_eq!(left.sum() + right.sum(), annotation.sum());
//! # Ok::<(), AtlasError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: atlas-structures                           │
//! │  (AtlasError, RegionQuery, RegionMap, Metadata)         │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: atlas-config, atlas-observability      │
//! │  (Metadata files, CLI options, logging)                 │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: atlas-region-map, atlas-volumes            │
//! │  (Hierarchy lookup, masks, halves, layers)              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub use ndarray;

// Re-export foundation
pub use atlas_structures as structures;

// Re-export algorithms
pub use atlas_region_map as region_map;
pub use atlas_volumes as volumes;

// Re-export infrastructure
#[cfg(feature = "config")]
pub use atlas_config as config;

#[cfg(feature = "observability")]
pub use atlas_observability as observability;

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::structures::{
        AnnotationLabel, AtlasError, AtlasResult, Metadata, RegionId, RegionIdSet, RegionMap, RegionQuery,
    };

    pub use crate::region_map::{RegionHierarchy, RegionNode};

    pub use crate::volumes::{
        create_layered_volume, get_layer_masks, get_region_mask, query_region_mask, split_into_halves,
        split_into_halves_with_offset, DEFAULT_SPLIT_AXIS,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{load_metadata, CommonAtlasArgs, ConfigError};

    #[cfg(feature = "observability")]
    pub use crate::observability::{init_logging, CrateDebugFlags, LoggingConfig, VerbosityArgs};
}
