//! Copy command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_file_system, resolve_path, GlobalOptions};
use clap::Args;
use pathfs::FileSystem;

/// Copy a file, or recreate a directory without its contents.
#[derive(Args)]
pub struct CpCommand {
    /// Existing file or directory
    pub source: String,

    /// Destination; must not exist
    pub target: String,
}

impl CpCommand {
    /// Execute the cp command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config)?;
        let source = resolve_path(&self.source)?;
        let target = resolve_path(&self.target)?;

        fs.copy(&source, &target)?;
        log::info!("copied {source} to {target}");
        Ok(())
    }
}
