//! Mkdir command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_file_system, resolve_path, GlobalOptions};
use clap::Args;
use pathfs::{FileSystem, FileSystemExt, Path};

/// Create a directory.
#[derive(Args)]
pub struct MkdirCommand {
    /// Directory to create
    pub path: String,

    /// Create missing parents and accept an existing directory
    #[arg(short, long)]
    pub parents: bool,
}

impl MkdirCommand {
    /// Execute the mkdir command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config)?;
        let path = resolve_path(&self.path)?;

        if self.parents {
            create_with_parents(fs.as_ref(), &path)
        } else {
            fs.create_directory(&path)?;
            Ok(())
        }
    }
}

/// Create `path` and every missing ancestor, outermost first.
fn create_with_parents(fs: &dyn FileSystem, path: &Path) -> Result<(), CliError> {
    let mut chain = vec![path.clone()];
    let mut current = path.parent();
    while let Some(parent) = current {
        current = parent.parent();
        chain.push(parent);
    }

    for dir in chain.iter().rev() {
        if !fs.is_directory(dir)? {
            fs.create_directory(dir)?;
            log::info!("created directory {dir}");
        }
    }
    Ok(())
}
