//! Output sinks.
//!
//! The app writes usage, errors and version text through [`Console`], so
//! tests can capture output with [`MockConsole`] instead of reading stdout.

use std::io;
use std::sync::{Arc, Mutex};

use console::Term;

/// A line-oriented output sink.
pub trait Console: Send + Sync {
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Writes to standard output.
#[derive(Debug, Clone)]
pub struct RealConsole {
    term: Term,
}

impl RealConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for RealConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for RealConsole {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.term.write_line(line)
    }
}

/// Captures lines in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MockConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MockConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Captured lines joined with newlines.
    pub fn output(&self) -> String {
        self.lines().join("\n")
    }
}

impl Console for MockConsole {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| io::Error::other("console buffer poisoned"))?;
        lines.push(line.to_string());
        Ok(())
    }
}

/// Writes every line, logging instead of failing when the sink is gone.
pub(crate) fn emit(console: &dyn Console, lines: &[String]) {
    for line in lines {
        if let Err(err) = console.write_line(line) {
            tracing::warn!(error = %err, "failed to write output");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_console_captures_lines() {
        let console = MockConsole::new();
        console.write_line("Usage: app").unwrap();
        console.write_line("").unwrap();

        assert_eq!(console.lines(), vec!["Usage: app", ""]);
        assert_eq!(console.output(), "Usage: app\n");
    }

    #[test]
    fn mock_console_clones_share_buffer() {
        let console = MockConsole::new();
        let handle = console.clone();
        emit(&console, &["one".to_string(), "two".to_string()]);
        assert_eq!(handle.output(), "one\ntwo");
    }
}
