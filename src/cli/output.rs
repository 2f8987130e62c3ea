//! Console output for Filepress
//!
//! Provides consistent, styled output formatting for the CLI, plus the
//! line sink the progress aggregator writes through.

use console::style;

use crate::pool::LineSink;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print a step in a process
    pub fn step(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("❯").cyan(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Line sink for the progress aggregator. Silent in quiet mode or when
    /// the caller renders its own machine-readable output.
    pub fn progress_sink(&self, silent: bool) -> LineSink {
        if self.quiet || silent {
            Box::new(|_: &str| {})
        } else {
            Box::new(|line: &str| println!("{line}"))
        }
    }
}
