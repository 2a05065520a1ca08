//! Cat command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_file_system, resolve_path, GlobalOptions};
use clap::Args;
use pathfs::{FileSystem, FileSystemExt};
use std::io::{self, Write};

/// Write the contents of a file to stdout.
#[derive(Args)]
pub struct CatCommand {
    /// File to print
    pub path: String,
}

impl CatCommand {
    /// Execute the cat command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config)?;
        let path = resolve_path(&self.path)?;

        if fs.is_directory(&path)? {
            return Err(CliError::SemanticFailure(format!("{path}: is a directory")));
        }

        let mut reader = fs.open_read(&path)?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        io::copy(&mut reader, &mut handle)?;
        handle.flush()?;
        Ok(())
    }
}
