//! Move command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_file_system, resolve_path, GlobalOptions};
use clap::Args;
use pathfs::FileSystem;

/// Move or rename a file or directory.
#[derive(Args)]
pub struct MvCommand {
    /// Existing file or directory
    pub source: String,

    /// Destination; must not exist
    pub target: String,
}

impl MvCommand {
    /// Execute the mv command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config)?;
        let source = resolve_path(&self.source)?;
        let target = resolve_path(&self.target)?;

        fs.move_path(&source, &target)?;
        log::info!("moved {source} to {target}");
        Ok(())
    }
}
