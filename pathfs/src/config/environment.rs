//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PATHFS_*` environment variables that
//! override configuration file values.

use std::env;
use std::path::PathBuf;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Selects the backend (`os` or `memory`).
pub const BACKEND_ENV: &str = "PATHFS_BACKEND";
/// Overrides the temporary root.
pub const TEMP_DIR_ENV: &str = "PATHFS_TEMP_DIR";
/// Selects the CLI output format.
pub const OUTPUT_FORMAT_ENV: &str = "PATHFS_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use pathfs::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a variable holds an unknown backend or
    /// output format.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(backend) = Self::var(BACKEND_ENV) {
            config.backend = Some(backend.parse().map_err(|message| Error::Validation {
                field: BACKEND_ENV.into(),
                message,
            })?);
        }

        if let Some(temp_dir) = Self::var(TEMP_DIR_ENV) {
            config.temp_dir = Some(PathBuf::from(temp_dir));
        }

        if let Some(format) = Self::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(format.parse().map_err(|message| Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message,
            })?);
        }

        Ok(())
    }

    fn var(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }
}
