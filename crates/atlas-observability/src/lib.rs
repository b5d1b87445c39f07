// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! # atlas-observability
//!
//! Logging initialisation shared by atlas tools.
//!
//! Library crates only emit `tracing` events with their crate name as target
//! (e.g. `target: "atlas-volumes"`); binaries call [`init_logging`] once.
//!
//! ## Features
//! - `file-logging`: additional JSON log file output through `tracing-appender`

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Atlas crate names usable with `--debug-{crate}` and `ATLAS_DEBUG`
pub const KNOWN_CRATES: &[&str] = &[
    "atlas-structures",
    "atlas-region-map",
    "atlas-volumes",
    "atlas-config",
];
