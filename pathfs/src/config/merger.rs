//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use pathfs::config::{BackendKind, Config, ConfigMerger};
///
/// let low = Config { backend: Some(BackendKind::Os), ..Default::default() };
/// let high = Config { backend: Some(BackendKind::Memory), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.backend, Some(BackendKind::Memory));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; every field set in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.backend.is_some() {
            target.backend = source.backend;
        }

        if source.temp_dir.is_some() {
            target.temp_dir.clone_from(&source.temp_dir);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackendKind, OutputFormat};
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("source-{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_unset_fields_do_not_override() {
        let mut target = Config {
            backend: Some(BackendKind::Memory),
            temp_dir: Some(PathBuf::from("/a")),
            output_format: Some(OutputFormat::Csv),
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.backend, Some(BackendKind::Memory));
        assert_eq!(target.temp_dir, Some(PathBuf::from("/a")));
        assert_eq!(target.output_format, Some(OutputFormat::Csv));
    }

    #[test]
    fn test_merge_respects_order() {
        let merged = ConfigMerger::merge(vec![
            source(
                1,
                Config {
                    backend: Some(BackendKind::Memory),
                    temp_dir: Some(PathBuf::from("/low")),
                    ..Default::default()
                },
            ),
            source(
                2,
                Config {
                    temp_dir: Some(PathBuf::from("/high")),
                    output_format: Some(OutputFormat::Json),
                    ..Default::default()
                },
            ),
        ]);

        assert_eq!(merged.backend, Some(BackendKind::Memory));
        assert_eq!(merged.temp_dir, Some(PathBuf::from("/high")));
        assert_eq!(merged.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }
}
