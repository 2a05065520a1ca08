//! Touch command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_file_system, resolve_path, GlobalOptions};
use clap::Args;
use pathfs::FileSystem;

/// Create an empty file.
#[derive(Args)]
pub struct TouchCommand {
    /// File to create; its parent must exist
    pub path: String,
}

impl TouchCommand {
    /// Execute the touch command. Fails if the file already exists.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config)?;
        let path = resolve_path(&self.path)?;

        fs.create_file(&path)?;
        Ok(())
    }
}
