// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! CLI options shared by atlas tools

use std::path::PathBuf;

use clap::Args;

/// Input files every atlas tool takes
///
/// Flatten into a tool's own parser:
/// ```rust
/// use atlas_config::CommonAtlasArgs;
/// use clap::Parser;
///
/// #[derive(Parser, Debug)]
/// struct Cli {
///     #[command(flatten)]
///     common: CommonAtlasArgs,
/// }
/// ```
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CommonAtlasArgs {
    /// Path to the whole brain annotation file
    #[arg(long, value_parser = existing_file)]
    pub annotation_path: PathBuf,

    /// Path to the hierarchy file, i.e. AIBS 1.json or BBP hierarchy.json
    #[arg(long, value_parser = existing_file)]
    pub hierarchy_path: PathBuf,
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File does not exist: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        common: CommonAtlasArgs,
    }

    #[test]
    fn test_existing_files_are_accepted() {
        let annotation = tempfile::NamedTempFile::new().unwrap();
        let hierarchy = tempfile::NamedTempFile::new().unwrap();

        let cli = Cli::try_parse_from([
            "tool",
            "--annotation-path",
            annotation.path().to_str().unwrap(),
            "--hierarchy-path",
            hierarchy.path().to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(cli.common.annotation_path, annotation.path());
        assert_eq!(cli.common.hierarchy_path, hierarchy.path());
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let hierarchy = tempfile::NamedTempFile::new().unwrap();
        let result = Cli::try_parse_from([
            "tool",
            "--annotation-path",
            "/nonexistent/annotation.nrrd",
            "--hierarchy-path",
            hierarchy.path().to_str().unwrap(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_both_paths_are_required() {
        let annotation = tempfile::NamedTempFile::new().unwrap();
        let result = Cli::try_parse_from(["tool", "--annotation-path", annotation.path().to_str().unwrap()]);
        assert!(result.is_err());
    }
}
