//! # Cli
//!
//! Command-line argument parsing for the `coffee_bean` binary.

use std::path::PathBuf;

use clap::Parser;

/// Struct containing the CLI configuration for Coffee Bean.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// A source file to run. Without one, starts the REPL.
    #[arg(index = 1)]
    pub file: Option<PathBuf>,

    /// Dump the token stream and parsed statements before execution.
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}
