//! Stat command implementation.
//!
//! Prints POSIX attributes when the backend provides them and falls back to
//! the basic set otherwise.

use crate::error::CliError;
use crate::utils::{
    format_timestamp_us, load_configuration, open_file_system, output_format,
    read_best_attributes, require_format, resolve_path, write_json, write_key_values,
    GlobalOptions,
};
use clap::Args;
use pathfs::config::OutputFormat;
use pathfs::{Attributes, FileAttributes, Path};
use serde::Serialize;
use std::str::FromStr;

/// Show the attributes of a file or directory.
#[derive(Args)]
pub struct StatCommand {
    /// File or directory to describe
    pub path: String,

    /// Output format (table or json)
    #[arg(long, value_name = "FORMAT", value_parser = OutputFormat::from_str)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct StatReport {
    path: Path,
    kind: &'static str,
    attributes: Attributes,
}

impl StatReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        let basic = self.attributes.basic();
        let mut rows = vec![
            ("path", self.path.to_string()),
            ("type", self.kind.to_string()),
            ("size", basic.size_bytes.to_string()),
        ];
        if let Attributes::Posix(posix) = &self.attributes {
            rows.push((
                "permissions",
                format!(
                    "{} ({})",
                    posix.permissions.to_octal_string(),
                    posix.permissions.to_symbolic_string()
                ),
            ));
        }
        rows.push(("created", format_timestamp_us(basic.creation_time_us)));
        rows.push(("accessed", format_timestamp_us(basic.last_access_time_us)));
        rows.push(("modified", format_timestamp_us(basic.last_modified_time_us)));
        rows
    }
}

fn kind_of(attributes: &FileAttributes) -> &'static str {
    if attributes.is_symbolic_link {
        "symbolic link"
    } else if attributes.is_directory {
        "directory"
    } else if attributes.is_file {
        "file"
    } else {
        "other"
    }
}

impl StatCommand {
    /// Execute the stat command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = require_format(
            output_format(self.format, &config),
            &[OutputFormat::Table, OutputFormat::Json],
            "stat",
        )?;
        let fs = open_file_system(&config)?;
        let path = resolve_path(&self.path)?;

        let attributes = read_best_attributes(fs.as_ref(), &path)?;
        let report = StatReport {
            kind: kind_of(attributes.basic()),
            path,
            attributes,
        };

        match format {
            OutputFormat::Json => write_json(&report),
            _ => write_key_values(&report.rows()),
        }
    }
}
