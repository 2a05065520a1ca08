//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, backend setup, path parsing and output
//! formatting.

use crate::error::CliError;
use pathfs::config::{BackendKind, OutputFormat};
use pathfs::{AttributeKind, Attributes, Config, ConfigBuilder, ErrorKind, FileSystem, Path};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose/quiet are consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the configured backend.
    pub backend: Option<BackendKind>,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. The `--config` file, then the nearest `pathfs.yaml`, then the user file
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref file) = global.config {
        builder = builder.with_config_file(file);
    }
    if let Some(backend) = global.backend {
        builder = builder.with_config(Config {
            backend: Some(backend),
            ..Default::default()
        });
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Build the configured backend and install it as the process default.
pub fn open_file_system(config: &Config) -> Result<Arc<dyn FileSystem>, CliError> {
    let fs = config.file_system()?;
    pathfs::install_default(Arc::clone(&fs))?;
    log::debug!("using the {} backend", fs.name());
    Ok(fs)
}

/// Parse a command-line argument into a path of the default backend.
pub fn resolve_path(raw: &str) -> Result<Path, CliError> {
    Ok(pathfs::path(raw, &[])?)
}

/// The `--format` flag if given, otherwise the configured format.
pub fn output_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.unwrap_or_else(|| config.output_format())
}

/// Reject formats a command cannot render.
pub fn require_format(
    format: OutputFormat,
    allowed: &[OutputFormat],
    command: &str,
) -> Result<OutputFormat, CliError> {
    if allowed.contains(&format) {
        Ok(format)
    } else {
        Err(CliError::InvalidArguments(format!(
            "{command} does not support {format} output"
        )))
    }
}

/// POSIX attributes where the backend has them, basic ones otherwise.
pub fn read_best_attributes(fs: &dyn FileSystem, path: &Path) -> Result<Attributes, CliError> {
    match fs.read_attributes(path, AttributeKind::Posix) {
        Err(e) if e.kind() == ErrorKind::Unsupported => {
            Ok(fs.read_attributes(path, AttributeKind::Basic)?)
        }
        other => Ok(other?),
    }
}

/// A not-found error for `path`, for operations that report absence as a
/// value.
pub fn not_found(operation: &'static str, path: &Path) -> CliError {
    CliError::Library(pathfs::Error::Io {
        operation,
        path: path.to_string(),
        source: io::Error::from(io::ErrorKind::NotFound),
    })
}

/// Format a microsecond timestamp for display.
pub fn format_timestamp_us(timestamp_us: i64) -> String {
    use chrono::{DateTime, Utc};
    DateTime::<Utc>::from_timestamp_micros(timestamp_us).map_or_else(
        || timestamp_us.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Render a byte count the way `ls` output shows it: `999B`, `1.2K`, `3M`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn prettify_size(bytes: u64) -> String {
    if bytes < 1_000 {
        format!("{bytes}B")
    } else if bytes < 1_000_000 {
        format!("{:.1}K", (bytes as f64 / 100.0).round() / 10.0)
    } else {
        // Megabytes are truncated to whole units.
        format!("{}M", ((bytes as f64 / 100_000.0).round() / 10.0) as u64)
    }
}

/// Write `value` to stdout as pretty JSON.
pub fn write_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

/// Write aligned `key value` lines to stdout.
pub fn write_key_values(rows: &[(&str, String)]) -> Result<(), CliError> {
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for (key, value) in rows {
        writeln!(handle, "{key:<width$}  {value}")?;
    }
    Ok(())
}
