//! Build script for pathfs-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("pathfs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect paths and drive pathfs backends")
        .long_about(
            "Command-line tool for inspecting lexical paths and operating on the os or memory filesystem backends",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .help("Backend to operate on (os or memory)")
                .value_name("BACKEND")
                .global(true)
                .env("PATHFS_BACKEND"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read configuration from this file")
                .value_name("FILE")
                .global(true)
                .env("PATHFS_CONFIG"),
        )
        .subcommands(vec![
            Command::new("inspect")
                .about("Show the lexical breakdown of a path")
                .long_about("Print the normalized form, names, file name and parent of a path"),
            Command::new("join")
                .about("Concatenate or resolve paths")
                .long_about("Concatenate paths, or resolve each argument against the result with --resolve"),
            Command::new("ls")
                .about("List a directory, or describe a single file")
                .long_about("Show permissions, size, last access time and name of each entry"),
            Command::new("stat")
                .about("Show the attributes of a file or directory")
                .long_about("Show POSIX attributes where available, basic attributes otherwise"),
            Command::new("touch").about("Create an empty file"),
            Command::new("mkdir").about("Create a directory"),
            Command::new("cp")
                .about("Copy a file, or recreate a directory without its contents"),
            Command::new("mv").about("Move or rename a file or directory"),
            Command::new("rm").about("Delete a file or directory"),
            Command::new("du").about("Show the total size of a file or directory tree"),
            Command::new("cat").about("Write the contents of a file to stdout"),
            Command::new("mktemp").about("Create a temporary file or directory"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("pathfs.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
