// Copyright 2025 Blue Brain Project, EPFL
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for atlas tools
//!
//! Console output goes to stderr so that tools can write results to stdout.

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

#[cfg(feature = "file-logging")]
use std::path::{Path, PathBuf};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the log file writer alive, logs are flushed on drop
#[derive(Default)]
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    #[cfg(feature = "file-logging")]
    log_file: Option<PathBuf>,
}

#[cfg(feature = "file-logging")]
impl LoggingGuard {
    /// Path of the JSON log file, if any
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Filter directives: `RUST_LOG` if set, otherwise the per-crate debug
/// flags on top of `config.level`.
pub fn filter_directives(config: &LoggingConfig, debug_flags: &CrateDebugFlags, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => debug_flags.to_filter_string(&config.level),
    }
}

/// Initialize the global subscriber.
///
/// # Errors
///
/// Fails if the filter directives are invalid, if the log directory cannot be
/// created, if `log_dir` is set without the `file-logging` feature or if a
/// global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(config, debug_flags, rust_log.as_deref());
    let env_filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    layers.push(match config.format {
        LogFormat::Text => console_layer.with_target(true).boxed(),
        LogFormat::Json => console_layer.json().boxed(),
    });

    #[allow(unused_mut)]
    let mut guard = LoggingGuard::default();

    if let Some(log_dir) = &config.log_dir {
        #[cfg(feature = "file-logging")]
        {
            let (file_layer, file_guard, log_file) = file_layer(log_dir)?;
            layers.push(file_layer);
            guard._file_guard = Some(file_guard);
            guard.log_file = Some(log_file);
        }
        #[cfg(not(feature = "file-logging"))]
        anyhow::bail!(
            "Logging to {} requires the file-logging feature",
            log_dir.display()
        );
    }

    Registry::default()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("Failed to install the global logging subscriber")?;

    Ok(guard)
}

/// Initialize console logging at the default level with the debug flags of
/// the process arguments and environment.
pub fn init_logging_default() -> Result<LoggingGuard> {
    init_logging(&LoggingConfig::default(), &crate::cli::parse_debug_flags())
}

#[cfg(feature = "file-logging")]
fn file_layer(
    log_dir: &Path,
) -> Result<(BoxedLayer, tracing_appender::non_blocking::WorkerGuard, PathBuf)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_name = format!("atlas_{}.log", chrono::Utc::now().format("%Y%m%d_%H%M%S"));
    let appender = tracing_appender::rolling::never(log_dir, &file_name);
    let (non_blocking, file_guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .boxed();

    Ok((layer, file_guard, log_dir.join(file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_takes_precedence() {
        let flags = CrateDebugFlags::from_env_value("atlas-volumes");
        let config = LoggingConfig::default();
        assert_eq!(filter_directives(&config, &flags, Some("trace")), "trace");
        assert_eq!(
            filter_directives(&config, &flags, Some("  ")),
            "atlas-volumes=debug,warn"
        );
        assert_eq!(filter_directives(&config, &flags, None), "atlas-volumes=debug,warn");
    }

    #[test]
    fn test_directives_are_valid_filters() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        let directives = filter_directives(&LoggingConfig::default(), &flags, None);
        assert!(EnvFilter::try_new(directives).is_ok());
    }

    #[test]
    fn test_init_twice_fails() {
        let config = LoggingConfig {
            level: "error".to_string(),
            ..LoggingConfig::default()
        };
        let flags = CrateDebugFlags::default();
        let _first = init_logging(&config, &flags);
        assert!(init_logging(&config, &flags).is_err());
    }
}
