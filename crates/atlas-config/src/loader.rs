// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! Metadata file loading
//!
//! Files are parsed into a JSON document whatever their format, so that
//! missing keys are reported by name before deserialization.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use atlas_structures::Metadata;
use serde_json::Value;
use tracing::debug;

use crate::{ConfigError, ConfigResult};

/// Environment variable pointing to the metadata file
pub const METADATA_PATH_ENV: &str = "ATLAS_METADATA_PATH";

/// File names searched, in order, when no path is given
pub const METADATA_FILE_NAMES: [&str; 2] = ["metadata.json", "metadata.toml"];

/// Supported metadata file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
    Json,
    Toml,
}

impl MetadataFormat {
    /// Format of `path`, from its extension (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(MetadataFormat::Json),
            Some("toml") => Ok(MetadataFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(format!(
                "{} (expected a .json or .toml file)",
                path.display()
            ))),
        }
    }

    fn parse(self, content: &str) -> ConfigResult<Value> {
        match self {
            MetadataFormat::Json => Ok(serde_json::from_str(content)?),
            MetadataFormat::Toml => Ok(toml::from_str(content)?),
        }
    }
}

/// Find the metadata file
///
/// Search order:
/// 1. `ATLAS_METADATA_PATH` environment variable
/// 2. Current working directory: `./metadata.json`, then `./metadata.toml`
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if the environment variable points to a
/// missing file or if no candidate exists.
pub fn find_metadata_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(METADATA_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.is_file() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Metadata file specified by {} not found: {}",
            METADATA_PATH_ENV,
            path.display()
        )));
    }

    let cwd = env::current_dir()?;
    find_metadata_file_in(&cwd)
}

/// Find the first of [`METADATA_FILE_NAMES`] existing in `directory`.
pub fn find_metadata_file_in(directory: &Path) -> ConfigResult<PathBuf> {
    let candidates: Vec<PathBuf> = METADATA_FILE_NAMES
        .iter()
        .map(|name| directory.join(name))
        .collect();

    if let Some(found) = candidates.iter().find(|path| path.is_file()) {
        return Ok(found.clone());
    }

    let search_list = candidates
        .iter()
        .map(|path| format!("  - {}", path.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "\n{}\n\nSet the {} environment variable to specify a custom location.",
        search_list, METADATA_PATH_ENV
    )))
}

/// Load and validate layer metadata from a JSON or TOML file.
///
/// # Errors
///
/// - `ConfigError::UnsupportedFormat` if the extension is neither `json` nor `toml`
/// - `ConfigError::Io` if the file cannot be read
/// - `ConfigError::ParseError` if the content is not valid for its format
/// - `ConfigError::Invalid` if a mandatory key is missing or the layers are inconsistent
pub fn load_metadata(path: impl AsRef<Path>) -> ConfigResult<Metadata> {
    let path = path.as_ref();
    let format = MetadataFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;

    let metadata = Metadata::from_value(format.parse(&content)?)?;
    debug!(
        target: "atlas-config",
        "Loaded metadata of region {} with {} layers from {}",
        metadata.region.name,
        metadata.layer_count(),
        path.display()
    );
    Ok(metadata)
}

/// Load metadata from `metadata_path`, or from [`find_metadata_file`] if `None`.
pub fn load_metadata_or_find(metadata_path: Option<&Path>) -> ConfigResult<Metadata> {
    let metadata_file = match metadata_path {
        Some(path) => path.to_path_buf(),
        None => find_metadata_file()?,
    };
    load_metadata(metadata_file)
}
