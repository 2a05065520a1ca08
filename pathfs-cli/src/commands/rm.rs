//! Remove command implementation.
//!
//! Without `--recursive` only files and empty directories can be removed.

use crate::error::CliError;
use crate::utils::{
    load_configuration, not_found, open_file_system, resolve_path, GlobalOptions,
};
use clap::Args;
use pathfs::{FileSystem, FileSystemExt, Path};

/// Delete a file or directory.
#[derive(Args)]
pub struct RmCommand {
    /// File or directory to delete
    pub path: String,

    /// Delete a directory together with everything below it
    #[arg(short, long)]
    pub recursive: bool,

    /// Do not fail when the target does not exist
    #[arg(short, long)]
    pub force: bool,
}

impl RmCommand {
    /// Execute the rm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config)?;
        let path = resolve_path(&self.path)?;
        self.remove(fs.as_ref(), &path)
    }

    fn remove(&self, fs: &dyn FileSystem, path: &Path) -> Result<(), CliError> {
        let removed = if self.recursive {
            fs.delete_recursively(path)?
        } else {
            fs.delete(path)?
        };

        if !removed && !self.force {
            return Err(not_found("rm", path));
        }
        Ok(())
    }
}
