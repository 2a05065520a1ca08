//! Inspect command implementation.
//!
//! Shows how a raw string normalizes and splits into names. Purely lexical:
//! no backend is opened.

use crate::error::CliError;
use crate::utils::{
    load_configuration, output_format, require_format, write_json, write_key_values,
    GlobalOptions,
};
use clap::Args;
use pathfs::config::OutputFormat;
use pathfs::Path;
use serde::Serialize;
use std::str::FromStr;

/// Show the lexical breakdown of a path.
#[derive(Args)]
pub struct InspectCommand {
    /// Path to inspect
    pub path: String,

    /// Output format (table or json)
    #[arg(long, value_name = "FORMAT", value_parser = OutputFormat::from_str)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct PathReport {
    path: Path,
    absolute: bool,
    name_count: usize,
    names: Vec<Path>,
    file_name: Option<Path>,
    parent: Option<Path>,
}

impl PathReport {
    fn new(path: Path) -> Self {
        Self {
            absolute: path.is_absolute(),
            name_count: path.name_count(),
            names: path.names().collect(),
            file_name: path.file_name(),
            parent: path.parent(),
            path,
        }
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let names = self
            .names
            .iter()
            .map(quoted)
            .collect::<Vec<_>>()
            .join(" ");
        vec![
            ("path", quoted(&self.path)),
            ("absolute", self.absolute.to_string()),
            ("name count", self.name_count.to_string()),
            ("names", names),
            ("file name", self.file_name.as_ref().map_or_else(|| "-".to_string(), quoted)),
            ("parent", self.parent.as_ref().map_or_else(|| "-".to_string(), quoted)),
        ]
    }
}

/// The empty path would otherwise print as nothing at all.
fn quoted(path: &Path) -> String {
    if path.is_empty() {
        "\"\"".to_string()
    } else {
        path.to_string()
    }
}

impl InspectCommand {
    /// Execute the inspect command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = require_format(
            output_format(self.format, &config),
            &[OutputFormat::Table, OutputFormat::Json],
            "inspect",
        )?;

        let report = PathReport::new(Path::parse(&self.path)?);
        match format {
            OutputFormat::Json => write_json(&report),
            _ => write_key_values(&report.rows()),
        }
    }
}
