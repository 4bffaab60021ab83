//! CLI console utilities

use colored::*;
use std::io::{self, IsTerminal, Write};

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
    color: bool,
}

impl CliConsole {
    /// Console that colours stderr only when it is a terminal
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            color: io::stderr().is_terminal(),
        }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            eprintln!("{}", self.paint(message, Color::Blue));
        }
    }

    /// Print an error line exactly as given
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.paint(message, Color::Red));
    }

    /// Write rendered command output verbatim
    pub fn output(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn paint(&self, message: &str, color: Color) -> String {
        if self.color {
            message.color(color).to_string()
        } else {
            message.to_string()
        }
    }
}
