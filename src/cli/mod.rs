//! Command-line interface for Filepress
//!
//! This module provides the main CLI structure and command handling.
//! It uses clap for argument parsing and provides a clean, user-friendly
//! interface around the task pool.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

/// Filepress - batch file transforms under a bounded worker pool
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Recompress images in place, keeping only worthwhile rewrites
    Compress(commands::compress::CompressArgs),
    /// Append random trailer bytes so file checksums change
    Mutate(commands::mutate::MutateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        // Initialize output handler with global verbose and quiet settings
        let output = Output::new(self.verbose, self.quiet);

        match self.command {
            Some(Commands::Compress(args)) => {
                commands::compress::execute(args, &self.format, &output)
            }
            Some(Commands::Mutate(args)) => commands::mutate::execute(args, &self.format, &output),
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}
