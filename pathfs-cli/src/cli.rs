//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CatCommand, CompletionsCommand, CpCommand, DuCommand, InspectCommand, JoinCommand, LsCommand,
    MkdirCommand, MktempCommand, MvCommand, RmCommand, StatCommand, TouchCommand,
};
use clap::{Parser, Subcommand};
use pathfs::config::BackendKind;
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line tool for inspecting paths and driving pathfs backends.
#[derive(Parser)]
#[command(name = "pathfs")]
#[command(version, about = "Inspect paths and drive pathfs backends", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Backend to operate on (os or memory)
    #[arg(
        long,
        value_name = "BACKEND",
        global = true,
        env = "PATHFS_BACKEND",
        value_parser = BackendKind::from_str
    )]
    pub backend: Option<BackendKind>,

    /// Read configuration from this file
    #[arg(long, value_name = "FILE", global = true, env = "PATHFS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show the lexical breakdown of a path
    Inspect(InspectCommand),

    /// Concatenate or resolve paths
    Join(JoinCommand),

    /// List a directory, or describe a single file
    Ls(LsCommand),

    /// Show the attributes of a file or directory
    Stat(StatCommand),

    /// Create an empty file
    Touch(TouchCommand),

    /// Create a directory
    Mkdir(MkdirCommand),

    /// Copy a file, or recreate a directory without its contents
    Cp(CpCommand),

    /// Move or rename a file or directory
    Mv(MvCommand),

    /// Delete a file or directory
    Rm(RmCommand),

    /// Show the total size of a file or directory tree
    Du(DuCommand),

    /// Write the contents of a file to stdout
    Cat(CatCommand),

    /// Create a temporary file or directory
    Mktemp(MktempCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
