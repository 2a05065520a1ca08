//! List command implementation.
//!
//! Each entry is described by its permissions, the total size of the tree
//! below it, its last access time and its name. A file lists itself.

use crate::error::CliError;
use crate::utils::{
    format_timestamp_us, load_configuration, open_file_system, output_format, prettify_size,
    read_best_attributes, resolve_path, write_json, GlobalOptions,
};
use clap::Args;
use pathfs::config::OutputFormat;
use pathfs::{Attributes, FileSystem, FileSystemExt, Path, PermissionSet};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// Column headers for CSV output.
const COLUMN_HEADERS: [&str; 6] = [
    "permissions",
    "size_bytes",
    "size",
    "last_access",
    "name",
    "path",
];

/// List a directory, or describe a single file.
#[derive(Args)]
pub struct LsCommand {
    /// File or directory to list
    pub path: String,

    /// Descend into subdirectories, parents before their children
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = OutputFormat::from_str)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct Entry {
    permissions: Option<PermissionSet>,
    size_bytes: u64,
    size: String,
    last_access: String,
    name: String,
    path: Path,
}

impl Entry {
    fn describe(fs: &dyn FileSystem, path: &Path) -> Result<Self, CliError> {
        let (basic, permissions) = match read_best_attributes(fs, path)? {
            Attributes::Posix(posix) => (posix.basic, Some(posix.permissions)),
            Attributes::Basic(basic) => (basic, None),
        };
        let size_bytes = fs.total_size(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.to_string(), |name| name.to_string());

        Ok(Self {
            permissions,
            size_bytes,
            size: prettify_size(size_bytes),
            last_access: format_timestamp_us(basic.last_access_time_us),
            name,
            path: path.clone(),
        })
    }
}

impl LsCommand {
    /// Execute the ls command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config)?;
        let path = resolve_path(&self.path)?;

        let targets = collect_targets(fs.as_ref(), &path, self.recursive)?;
        let entries = targets
            .iter()
            .map(|target| Entry::describe(fs.as_ref(), target))
            .collect::<Result<Vec<_>, _>>()?;

        match output_format(self.format, &config) {
            OutputFormat::Table => format_as_table(&entries),
            OutputFormat::Json => write_json(&entries),
            OutputFormat::Csv => format_as_csv(&entries),
        }
    }
}

/// The entries to describe: the directory's children, or the file itself.
fn collect_targets(fs: &dyn FileSystem, path: &Path, recursive: bool) -> Result<Vec<Path>, CliError> {
    // Fails with not-found before anything is printed.
    let attributes = fs.read_basic_attributes(path)?;
    if !attributes.is_directory {
        return Ok(vec![path.clone()]);
    }

    if recursive {
        let mut walked = Vec::new();
        fs.walk_directory(path, &mut |entry| walked.push(entry.clone()))?;
        Ok(walked)
    } else {
        Ok(fs.list(path)?)
    }
}

/// Tab-separated lines in `ls` column order, without a header.
fn format_as_table(entries: &[Entry]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    for entry in entries {
        let permissions = entry
            .permissions
            .map_or_else(|| "-".to_string(), PermissionSet::to_symbolic_string);
        writeln!(
            handle,
            "{}\t{}\t{}\t{}",
            permissions, entry.size, entry.last_access, entry.name
        )?;
    }

    Ok(())
}

fn format_as_csv(entries: &[Entry]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    writer.write_record(COLUMN_HEADERS)?;
    for entry in entries {
        writer.write_record([
            entry
                .permissions
                .map(PermissionSet::to_octal_string)
                .unwrap_or_default(),
            entry.size_bytes.to_string(),
            entry.size.clone(),
            entry.last_access.clone(),
            entry.name.clone(),
            entry.path.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
