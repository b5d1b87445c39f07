// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! # Atlas Configuration
//!
//! Loading of the layer metadata files driving atlas tools:
//! - JSON or TOML parsing, chosen by file extension
//! - Discovery through the `ATLAS_METADATA_PATH` environment variable
//! - Content checks reporting missing keys by name
//! - Common CLI options shared by atlas tools
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atlas_config::load_metadata;
//!
//! let metadata = load_metadata("metadata/isocortex.json").expect("Failed to load metadata");
//! println!("Region: {}", metadata.region.name);
//! println!("Layers: {:?}", metadata.layers.names);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod args;
pub mod loader;

pub use args::CommonAtlasArgs;
pub use loader::{find_metadata_file, find_metadata_file_in, load_metadata, load_metadata_or_find, MetadataFormat};

use atlas_structures::AtlasError;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Metadata file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read metadata file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid metadata syntax: {0}")]
    ParseError(String),

    #[error("Unsupported metadata file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid metadata: {0}")]
    Invalid(#[from] AtlasError),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
