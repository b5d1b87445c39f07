// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! CLI flags controlling log verbosity
//!
//! - `-v` / `-vv` set the global level, see [`VerbosityArgs`]
//! - `--debug-atlas-volumes`, `--debug-all` or `ATLAS_DEBUG` enable debug
//!   logging per crate, see [`CrateDebugFlags`]

use std::collections::BTreeSet;
use std::env;

use clap::{ArgAction, Args};
use tracing::level_filters::LevelFilter;

use crate::KNOWN_CRATES;

/// Environment variable listing the crates to debug, comma-separated or `all`
pub const DEBUG_ENV: &str = "ATLAS_DEBUG";

/// Global verbosity of atlas tools
///
/// No flag logs warnings and errors, `-v` adds info, `-vv` adds debug.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerbosityArgs {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl VerbosityArgs {
    pub fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    }
}

/// Crates for which debug logging is enabled
///
/// # Example
/// ```rust
/// use atlas_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(["--debug-atlas-volumes".to_string()]);
/// assert!(flags.is_enabled("atlas-volumes"));
/// assert_eq!(flags.to_filter_string("warn"), "atlas-volumes=debug,warn");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse `--debug-{crate-name}` and `--debug-all` arguments, ignoring the others.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            match arg.strip_prefix("--debug-") {
                Some("all") => flags.enable_all(),
                Some(crate_name) if !crate_name.is_empty() => flags.enable(crate_name),
                _ => {}
            }
        }
        flags
    }

    /// Parse an `ATLAS_DEBUG` value: `all` or comma-separated crate names.
    pub fn from_env_value(value: &str) -> Self {
        let mut flags = CrateDebugFlags::default();
        flags.merge_env_value(value);
        flags
    }

    fn merge_env_value(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        value
            .split(',')
            .map(str::trim)
            .filter(|crate_name| !crate_name.is_empty())
            .for_each(|crate_name| self.enable(crate_name));
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string());
    }

    pub fn enable_all(&mut self) {
        self.enabled_crates
            .extend(KNOWN_CRATES.iter().map(|crate_name| crate_name.to_string()));
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    pub fn enabled_crates(&self) -> impl Iterator<Item = &str> {
        self.enabled_crates.iter().map(String::as_str)
    }

    /// `EnvFilter` directives: one `{crate}=debug` per enabled crate, then `default_level`.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        self.enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name))
            .chain(std::iter::once(default_level.to_string()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Debug flags from the process arguments and the `ATLAS_DEBUG` environment variable.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(value) = env::var(DEBUG_ENV) {
        flags.merge_env_value(&value);
    }
    flags
}

/// Help text for the debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  {env}={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  {env}=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", "),
        env = DEBUG_ENV
    )
}
