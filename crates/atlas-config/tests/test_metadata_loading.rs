// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! Metadata loading from files on disk

use std::fs;
use std::path::Path;

use atlas_config::{find_metadata_file, find_metadata_file_in, load_metadata, ConfigError};
use atlas_structures::AtlasError;

const ISOCORTEX_JSON: &str = r#"{
    "region": {"name": "isocortex", "query": "Isocortex", "attribute": "acronym", "with_descendants": true},
    "layers": {
        "names": ["layer 1", "layer 2/3", "layer 5"],
        "queries": ["@.*1$", "@.*2/3$", "@.*5$"],
        "attribute": "acronym",
        "with_descendants": true
    }
}"#;

const ISOCORTEX_TOML: &str = r#"
[region]
name = "isocortex"
query = "Isocortex"
attribute = "acronym"
with_descendants = true

[layers]
names = ["layer 1", "layer 2/3", "layer 5"]
queries = ["@.*1$", "@.*2/3$", "@.*5$"]
attribute = "acronym"
"#;

fn write(directory: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = directory.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_json_and_toml_agree() {
    let directory = tempfile::tempdir().unwrap();
    let json = load_metadata(write(directory.path(), "metadata.json", ISOCORTEX_JSON)).unwrap();
    let toml = load_metadata(write(directory.path(), "metadata.toml", ISOCORTEX_TOML)).unwrap();

    assert_eq!(json.region, toml.region);
    assert_eq!(json.layers.names, toml.layers.names);
    assert_eq!(json.layers.queries, toml.layers.queries);
    assert!(json.layers.with_descendants);
    assert!(!toml.layers.with_descendants);
    assert_eq!(json.layer_count(), 3);
}

#[test]
fn test_missing_region_key() {
    let directory = tempfile::tempdir().unwrap();
    let path = write(
        directory.path(),
        "metadata.json",
        r#"{"layers": {"names": [], "queries": [], "attribute": "acronym"}}"#,
    );

    let err = load_metadata(path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(AtlasError::InvalidMetadata(_))));
    assert!(err.to_string().contains("Missing \"region\" key"));
}

#[test]
fn test_missing_layer_keys_are_named() {
    let directory = tempfile::tempdir().unwrap();
    let path = write(
        directory.path(),
        "metadata.toml",
        "[region]\nname = \"r\"\nquery = \"Isocortex\"\nattribute = \"acronym\"\n\n[layers]\nnames = [\"layer 1\"]\n",
    );

    let err = load_metadata(path).unwrap_err().to_string();
    assert!(err.contains(r#"Missing: {"attribute", "queries"}"#), "{}", err);
}

#[test]
fn test_names_and_queries_length_mismatch() {
    let directory = tempfile::tempdir().unwrap();
    let path = write(
        directory.path(),
        "metadata.json",
        r#"{
            "region": {"name": "isocortex", "query": "Isocortex", "attribute": "acronym"},
            "layers": {"names": ["layer 1", "layer 2"], "queries": ["@.*1$"], "attribute": "acronym"}
        }"#,
    );

    let err = load_metadata(path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(AtlasError::InvalidMetadata(_))));
}

#[test]
fn test_unsupported_extension_and_missing_file() {
    let directory = tempfile::tempdir().unwrap();
    let yaml = write(directory.path(), "metadata.yaml", "region: {}");
    assert!(matches!(load_metadata(yaml), Err(ConfigError::UnsupportedFormat(_))));

    let missing = directory.path().join("absent.json");
    assert!(matches!(load_metadata(missing), Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_content() {
    let directory = tempfile::tempdir().unwrap();
    let path = write(directory.path(), "metadata.toml", "[region\nname = ");
    assert!(matches!(load_metadata(path), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_find_prefers_json() {
    let directory = tempfile::tempdir().unwrap();
    assert!(matches!(
        find_metadata_file_in(directory.path()),
        Err(ConfigError::FileNotFound(_))
    ));

    let toml = write(directory.path(), "metadata.toml", ISOCORTEX_TOML);
    assert_eq!(find_metadata_file_in(directory.path()).unwrap(), toml);

    let json = write(directory.path(), "metadata.json", ISOCORTEX_JSON);
    assert_eq!(find_metadata_file_in(directory.path()).unwrap(), json);
}

#[test]
fn test_find_from_environment() {
    let directory = tempfile::tempdir().unwrap();
    let path = write(directory.path(), "isocortex.json", ISOCORTEX_JSON);

    std::env::set_var("ATLAS_METADATA_PATH", &path);
    assert_eq!(find_metadata_file().unwrap(), path);

    std::env::set_var("ATLAS_METADATA_PATH", directory.path().join("absent.json"));
    assert!(matches!(find_metadata_file(), Err(ConfigError::FileNotFound(_))));
    std::env::remove_var("ATLAS_METADATA_PATH");
}
