//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `inspect`: Lexical breakdown of a path
//! - `join`: Concatenate or resolve paths
//! - `ls`: List a directory with permissions, sizes and access times
//! - `stat`: Show the attributes of one entry
//! - `touch`: Create an empty file
//! - `mkdir`: Create a directory
//! - `cp`: Shallow copy
//! - `mv`: Move or rename
//! - `rm`: Delete, optionally recursively
//! - `du`: Total size of a tree
//! - `cat`: Write file contents to stdout
//! - `mktemp`: Create a temporary file or directory
//! - `completions`: Shell completion scripts

pub mod cat;
pub mod completions;
pub mod cp;
pub mod du;
pub mod inspect;
pub mod join;
pub mod ls;
pub mod mkdir;
pub mod mktemp;
pub mod mv;
pub mod rm;
pub mod stat;
pub mod touch;

pub use cat::CatCommand;
pub use completions::CompletionsCommand;
pub use cp::CpCommand;
pub use du::DuCommand;
pub use inspect::InspectCommand;
pub use join::JoinCommand;
pub use ls::LsCommand;
pub use mkdir::MkdirCommand;
pub use mktemp::MktempCommand;
pub use mv::MvCommand;
pub use rm::RmCommand;
pub use stat::StatCommand;
pub use touch::TouchCommand;
