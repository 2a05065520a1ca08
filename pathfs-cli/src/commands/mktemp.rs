//! Mktemp command implementation.
//!
//! Directories always go under the backend's temporary root; files go into
//! `--dir` or, without it, the temporary root.

use crate::error::CliError;
use crate::utils::{load_configuration, open_file_system, resolve_path, GlobalOptions};
use clap::Args;
use pathfs::{FileSystem, Path};

/// Create a temporary file or directory.
#[derive(Args)]
pub struct MktempCommand {
    /// Create a directory instead of a file
    #[arg(short, long)]
    pub directory: bool,

    /// Name prefix
    #[arg(long, default_value = "pathfs-")]
    pub prefix: String,

    /// Name suffix (files only)
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Directory to create the file in (files only)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<String>,
}

impl MktempCommand {
    /// Execute the mktemp command, printing the created path.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        self.check_arguments()?;
        let config = load_configuration(global)?;
        let fs = open_file_system(&config)?;

        let created = self.create(fs.as_ref())?;
        println!("{created}");
        Ok(())
    }

    fn check_arguments(&self) -> Result<(), CliError> {
        if self.directory && (self.dir.is_some() || !self.suffix.is_empty()) {
            return Err(CliError::InvalidArguments(
                "--dir and --suffix apply to files only".to_string(),
            ));
        }
        Ok(())
    }

    fn create(&self, fs: &dyn FileSystem) -> Result<Path, CliError> {
        if self.directory {
            return Ok(fs.create_temporary_directory(&self.prefix)?);
        }

        let dir = match self.dir {
            Some(ref dir) => resolve_path(dir)?,
            None => fs.temporary_root()?,
        };
        Ok(fs.create_temporary_file(&dir, &self.prefix, &self.suffix)?)
    }
}
