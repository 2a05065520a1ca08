//! Join command implementation.
//!
//! Folds the arguments left to right, either concatenating (the default) or
//! resolving each against the result so far.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use pathfs::Path;

/// Concatenate or resolve paths.
#[derive(Args)]
pub struct JoinCommand {
    /// Starting path
    pub base: String,

    /// Paths appended to the base, in order
    #[arg(required = true)]
    pub others: Vec<String>,

    /// Resolve instead of concatenating: an absolute argument replaces the
    /// result so far
    #[arg(long)]
    pub resolve: bool,
}

impl JoinCommand {
    /// Execute the join command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let joined = self.fold()?;
        println!("{joined}");
        Ok(())
    }

    fn fold(&self) -> Result<Path, CliError> {
        let mut result = Path::parse(&self.base)?;
        for other in &self.others {
            let other = Path::parse(other)?;
            result = if self.resolve {
                result.resolve(&other)?
            } else {
                &result + &other
            };
        }
        Ok(result)
    }
}
