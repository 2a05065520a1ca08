//! Disk usage command implementation.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_file_system, prettify_size, resolve_path, GlobalOptions,
};
use clap::Args;
use pathfs::FileSystemExt;

/// Show the total size of a file or directory tree.
#[derive(Args)]
pub struct DuCommand {
    /// File or directory to measure
    pub path: String,

    /// Print sizes as 999B, 1.2K, 3M
    #[arg(long)]
    pub human: bool,
}

impl DuCommand {
    /// Execute the du command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config)?;
        let path = resolve_path(&self.path)?;

        let total = fs.total_size(&path)?;
        let size = if self.human {
            prettify_size(total)
        } else {
            total.to_string()
        };
        println!("{size}\t{path}");
        Ok(())
    }
}
