// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! Logging configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::VerbosityArgs;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level of crates without a debug flag (trace, debug, info, warn, error)
    pub level: String,

    /// Console log format
    pub format: LogFormat,

    /// Directory of the JSON log file, requires the `file-logging` feature
    pub log_dir: Option<PathBuf>,
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl LoggingConfig {
    /// Console text logging at the level selected by `-v` flags
    pub fn from_verbosity(verbosity: &VerbosityArgs) -> Self {
        LoggingConfig {
            level: verbosity.level().to_string().to_lowercase(),
            ..LoggingConfig::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Text,
            log_dir: None,
        }
    }
}
