//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use pathfs::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `temp_dir` is empty, relative, or
    /// contains a NUL character.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref temp_dir) = config.temp_dir {
            if temp_dir.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "temp_dir".into(),
                    message: "must not be empty".into(),
                });
            }

            // The memory backend only understands a leading `/`.
            let absolute = temp_dir.is_absolute() || temp_dir.starts_with("/");
            if !absolute {
                return Err(Error::Validation {
                    field: "temp_dir".into(),
                    message: format!("must be an absolute path, got {}", temp_dir.display()),
                });
            }

            if temp_dir.to_string_lossy().contains('\0') {
                return Err(Error::Validation {
                    field: "temp_dir".into(),
                    message: "must not contain a NUL character".into(),
                });
            }
        }

        Ok(())
    }
}
